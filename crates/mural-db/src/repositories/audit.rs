//! PostgreSQL implementation of AuditRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use mural_core::entities::{AuditQuery, AuditRecord};
use mural_core::traits::{AuditRepository, RepoResult};

use crate::mappers::AuditRecordInsert;
use crate::models::AuditRecordModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AuditRepository
#[derive(Clone)]
pub struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    #[instrument(skip(self, record), fields(action = %record.action, target_id = %record.target_id))]
    async fn append(&self, record: &AuditRecord) -> RepoResult<()> {
        let insert = AuditRecordInsert::new(record);

        sqlx::query(
            r#"
            INSERT INTO audit_records (id, actor_id, actor_email, actor_name, action,
                                       entity_type, entity_id, before_state, after_state,
                                       note, ip_address, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(insert.id)
        .bind(insert.actor_id)
        .bind(insert.actor_email)
        .bind(insert.actor_name)
        .bind(insert.action)
        .bind(insert.entity_type)
        .bind(insert.entity_id)
        .bind(insert.before_state)
        .bind(insert.after_state)
        .bind(insert.note)
        .bind(insert.ip_address)
        .bind(insert.user_agent)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &AuditQuery) -> RepoResult<Vec<AuditRecord>> {
        let results = sqlx::query_as::<_, AuditRecordModel>(
            r#"
            SELECT id, actor_id, actor_email, actor_name, action, entity_type, entity_id,
                   before_state, after_state, note, ip_address, user_agent, created_at
            FROM audit_records
            WHERE ($1::uuid IS NULL OR entity_id = $1)
              AND ($2::text IS NULL OR entity_type = $2)
            ORDER BY created_at DESC, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(query.target_id)
        .bind(query.target_kind.map(|k| k.as_str()))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(AuditRecord::try_from).collect()
    }
}
