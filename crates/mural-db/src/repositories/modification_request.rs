//! PostgreSQL implementation of ModificationRequestRepository
//!
//! Approval runs in one transaction holding the mural row lock (`FOR UPDATE`),
//! so two approvals racing on the same mural are serialized: the second one
//! observes `modification_approved` and fails without writing anything.
//! Creating a request takes the same row in `FOR SHARE`, so it either lands
//! before the approval (and is swept by its cascade) or sees the final state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use mural_core::entities::{ModificationApproval, ModificationRequest, MuralState};
use mural_core::error::DomainError;
use mural_core::traits::{ModificationRequestRepository, RepoResult};
use mural_core::value_objects::{ModificationRequestId, MuralId};

use crate::mappers::ModificationRequestInsert;
use crate::models::ModificationRequestModel;

use super::error::{map_db_error, map_unique_violation};

const REQUEST_COLUMNS: &str = "id, mural_id, new_image_url, new_thumbnail_url, new_comment, \
                               request_state, original_image_url, original_thumbnail_url, \
                               processed_at, created_at";

/// PostgreSQL implementation of ModificationRequestRepository
#[derive(Clone)]
pub struct PgModificationRequestRepository {
    pool: PgPool,
}

impl PgModificationRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

}

#[async_trait]
impl ModificationRequestRepository for PgModificationRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        id: ModificationRequestId,
    ) -> RepoResult<Option<ModificationRequest>> {
        let result = sqlx::query_as::<_, ModificationRequestModel>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM modification_requests WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ModificationRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_mural(&self, mural_id: MuralId) -> RepoResult<Vec<ModificationRequest>> {
        self.list_by_murals(&[mural_id]).await
    }

    #[instrument(skip(self, mural_ids), fields(murals = mural_ids.len()))]
    async fn list_by_murals(&self, mural_ids: &[MuralId]) -> RepoResult<Vec<ModificationRequest>> {
        if mural_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = mural_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, ModificationRequestModel>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM modification_requests
            WHERE mural_id = ANY($1)
            ORDER BY created_at DESC, id
            "#
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ModificationRequest::try_from).collect()
    }

    #[instrument(skip(self, request), fields(request_id = %request.id, mural_id = %request.mural_id))]
    async fn create(&self, request: &ModificationRequest) -> RepoResult<()> {
        let insert = ModificationRequestInsert::new(request);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // FOR SHARE waits out an in-flight approval and then reads its result
        let state: Option<String> =
            sqlx::query_scalar("SELECT state FROM murals WHERE id = $1 FOR SHARE")
                .bind(insert.mural_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;

        match state.as_deref() {
            None => return Err(DomainError::MuralNotFound(request.mural_id)),
            Some(s) if s == MuralState::ModificationApproved.as_str() => {
                return Err(DomainError::MuralAlreadyModified(request.mural_id));
            }
            Some(_) => {}
        }

        sqlx::query(
            r#"
            INSERT INTO modification_requests (id, mural_id, new_image_url, new_thumbnail_url,
                                               new_comment, request_state, created_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6)
            "#,
        )
        .bind(insert.id)
        .bind(insert.mural_id)
        .bind(insert.new_image_url)
        .bind(insert.new_thumbnail_url)
        .bind(insert.new_comment)
        .bind(insert.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject(
        &self,
        id: ModificationRequestId,
        processed_at: DateTime<Utc>,
    ) -> RepoResult<Option<ModificationRequest>> {
        let result = sqlx::query_as::<_, ModificationRequestModel>(&format!(
            r#"
            UPDATE modification_requests
            SET request_state = 'rejected', processed_at = $2
            WHERE id = $1 AND request_state = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id.into_inner())
        .bind(processed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ModificationRequest::try_from).transpose()
    }

    #[instrument(skip(self, approval), fields(mural_id = %approval.mural_id, request_id = %approval.request_id))]
    async fn approve(&self, approval: &ModificationApproval) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let state: Option<String> =
            sqlx::query_scalar("SELECT state FROM murals WHERE id = $1 FOR UPDATE")
                .bind(approval.mural_id.into_inner())
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;

        match state.as_deref() {
            None => return Err(DomainError::MuralNotFound(approval.mural_id)),
            Some(s) if s == MuralState::ModificationApproved.as_str() => {
                return Err(DomainError::MuralAlreadyModified(approval.mural_id));
            }
            Some(_) => {}
        }

        let updated = sqlx::query(
            r#"
            UPDATE modification_requests
            SET request_state = 'approved',
                processed_at = $3,
                original_image_url = $4,
                original_thumbnail_url = $5
            WHERE id = $1 AND mural_id = $2 AND request_state = 'pending'
            "#,
        )
        .bind(approval.request_id.into_inner())
        .bind(approval.mural_id.into_inner())
        .bind(approval.processed_at)
        .bind(&approval.original_image.url)
        .bind(approval.original_image.thumbnail_url.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::MuralAlreadyModified(approval.mural_id))
        })?;

        if updated.rows_affected() == 0 {
            // dropping the transaction rolls it back
            return Err(DomainError::RequestNotPending);
        }

        sqlx::query(
            r#"
            UPDATE murals
            SET image_url = $2,
                thumbnail_url = $3,
                comment = $4,
                state = 'modification_approved',
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(approval.mural_id.into_inner())
        .bind(&approval.image.url)
        .bind(approval.image.thumbnail_url.as_deref())
        .bind(approval.comment.as_deref())
        .bind(approval.processed_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!("modification approval committed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject_pending_siblings(
        &self,
        mural_id: MuralId,
        keep: ModificationRequestId,
        processed_at: DateTime<Utc>,
    ) -> RepoResult<Vec<ModificationRequestId>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE modification_requests
            SET request_state = 'rejected', processed_at = $3
            WHERE mural_id = $1 AND id <> $2 AND request_state = 'pending'
            RETURNING id
            "#,
        )
        .bind(mural_id.into_inner())
        .bind(keep.into_inner())
        .bind(processed_at)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(ModificationRequestId::from_uuid).collect())
    }

    #[instrument(skip(self))]
    async fn count_murals_with_pending(&self) -> RepoResult<i64> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT mural_id)
            FROM modification_requests
            WHERE request_state = 'pending'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
