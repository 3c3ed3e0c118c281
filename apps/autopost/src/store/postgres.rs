use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::category::CategoryRow;
use crate::models::persona::PersonaRow;
use crate::models::post::{NewPost, PostRow};
use crate::store::{Store, StoreError};

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_post_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<PostRow>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>("SELECT * FROM posts WHERE fingerprint = $1")
            .bind(fingerprint)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_recent_posts(&self, limit: i64) -> Result<Vec<PostRow>, StoreError> {
        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT * FROM posts ORDER BY posted_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_post(&self, post: NewPost) -> Result<PostRow, StoreError> {
        let fingerprint = post.fingerprint.clone();
        let result = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts
                (id, quote, category, attribution, image_path, fingerprint, publish_id,
                 posted_at, created_at, quality_score, virality_score, emotion,
                 generated_reason, opening_word, tone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.quote)
        .bind(&post.category)
        .bind(&post.attribution)
        .bind(&post.image_path)
        .bind(&post.fingerprint)
        .bind(&post.publish_id)
        .bind(post.posted_at)
        .bind(Utc::now())
        .bind(post.quality_score)
        .bind(post.virality_score)
        .bind(&post.emotion)
        .bind(&post.generated_reason)
        .bind(&post.opening_word)
        .bind(&post.tone)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => {
                debug!(post_id = %row.id, "Inserted post");
                Ok(row)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateFingerprint(fingerprint))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<CategoryRow>, StoreError> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT * FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count_categories(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_categories(&self, categories: &[CategoryRow]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for category in categories {
            sqlx::query(
                r#"
                INSERT INTO categories (name, description, keywords, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(&category.name)
            .bind(&category.description)
            .bind(&category.keywords)
            .bind(category.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn count_personas(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM personas")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_personas(&self, personas: &[PersonaRow]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for persona in personas {
            sqlx::query(
                r#"
                INSERT INTO personas (name, description, tags, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(&persona.name)
            .bind(&persona.description)
            .bind(&persona.tags)
            .bind(persona.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
