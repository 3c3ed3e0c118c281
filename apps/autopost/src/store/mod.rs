//! Persistence surface used by the pipeline.
//!
//! `main` owns the pool lifecycle and hands an `Arc<dyn Store>` to every
//! component that reads or writes records.

pub mod postgres;
pub mod seed;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::category::CategoryRow;
use crate::models::persona::PersonaRow;
use crate::models::post::{NewPost, PostRow};

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Post with fingerprint {0} already exists")]
    DuplicateFingerprint(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_post_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<PostRow>, StoreError>;

    /// Most recent posts by `posted_at`, newest first.
    async fn find_recent_posts(&self, limit: i64) -> Result<Vec<PostRow>, StoreError>;

    async fn insert_post(&self, post: NewPost) -> Result<PostRow, StoreError>;

    async fn find_category_by_name(&self, name: &str) -> Result<Option<CategoryRow>, StoreError>;

    async fn count_categories(&self) -> Result<i64, StoreError>;

    async fn insert_categories(&self, categories: &[CategoryRow]) -> Result<(), StoreError>;

    async fn count_personas(&self) -> Result<i64, StoreError>;

    async fn insert_personas(&self, personas: &[PersonaRow]) -> Result<(), StoreError>;
}
