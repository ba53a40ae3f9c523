//! PostgreSQL implementation of MuralRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use mural_core::entities::{Mural, MuralState};
use mural_core::traits::{MuralRepository, RepoResult};
use mural_core::value_objects::MuralId;

use crate::mappers::{state_counts, MuralInsert};
use crate::models::{MuralModel, StateCountModel};

use super::error::map_db_error;

const MURAL_COLUMNS: &str = "id, name, submitter_label, location_url, comment, image_url, \
                             thumbnail_url, state, created_at, updated_at";

/// PostgreSQL implementation of MuralRepository
#[derive(Clone)]
pub struct PgMuralRepository {
    pool: PgPool,
}

impl PgMuralRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MuralRepository for PgMuralRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MuralId) -> RepoResult<Option<Mural>> {
        let result = sqlx::query_as::<_, MuralModel>(&format!(
            "SELECT {MURAL_COLUMNS} FROM murals WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Mural::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, states: Option<&[MuralState]>) -> RepoResult<Vec<Mural>> {
        let states: Option<Vec<&'static str>> =
            states.map(|states| states.iter().map(|s| s.as_str()).collect());

        let results = sqlx::query_as::<_, MuralModel>(&format!(
            r#"
            SELECT {MURAL_COLUMNS}
            FROM murals
            WHERE $1::text[] IS NULL OR state = ANY($1)
            ORDER BY created_at DESC, id
            "#
        ))
        .bind(states)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Mural::try_from).collect()
    }

    #[instrument(skip(self, mural), fields(mural_id = %mural.id))]
    async fn create(&self, mural: &Mural) -> RepoResult<()> {
        let insert = MuralInsert::new(mural);

        sqlx::query(
            r#"
            INSERT INTO murals (id, name, submitter_label, location_url, comment,
                                image_url, thumbnail_url, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            "#,
        )
        .bind(insert.id)
        .bind(insert.name)
        .bind(insert.submitter_label)
        .bind(insert.location_url)
        .bind(insert.comment)
        .bind(insert.image_url)
        .bind(insert.thumbnail_url)
        .bind(insert.state)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn transition_state(
        &self,
        id: MuralId,
        expected: MuralState,
        next: MuralState,
    ) -> RepoResult<Option<Mural>> {
        let result = sqlx::query_as::<_, MuralModel>(&format!(
            r#"
            UPDATE murals
            SET state = $3, updated_at = NOW()
            WHERE id = $1 AND state = $2
            RETURNING {MURAL_COLUMNS}
            "#
        ))
        .bind(id.into_inner())
        .bind(expected.as_str())
        .bind(next.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Mural::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn count_by_state(&self) -> RepoResult<Vec<(MuralState, i64)>> {
        let rows = sqlx::query_as::<_, StateCountModel>(
            r#"
            SELECT state, COUNT(*) AS count
            FROM murals
            GROUP BY state
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        state_counts(rows)
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
