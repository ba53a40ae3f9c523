//! # mural-db
//!
//! Database layer implementing the `mural-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! With the `memory` feature, [`memory::MemoryStore`] implements the same
//! traits in-process.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mural_db::{create_pool, run_migrations, DatabaseConfig, PgMuralRepository};
//!
//! async fn example(app: &mural_common::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(&app.database)).await?;
//!     run_migrations(&pool).await?;
//!     let murals = PgMuralRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

#[cfg(feature = "memory")]
pub mod memory;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgAuditRepository, PgModificationRequestRepository, PgMuralRepository,
};
