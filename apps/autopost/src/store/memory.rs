//! In-memory `Store` for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::category::CategoryRow;
use crate::models::persona::PersonaRow;
use crate::models::post::{NewPost, PostRow};
use crate::store::{Store, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<PostRow>>,
    categories: Mutex<Vec<CategoryRow>>,
    personas: Mutex<Vec<PersonaRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> Vec<PostRow> {
        self.posts.lock().unwrap().clone()
    }

    /// Inserts a post with an explicit `posted_at` offset (seconds ago) for ordering tests.
    pub fn push_post(&self, quote: &str, opening_word: &str, seconds_ago: i64) {
        let now = Utc::now();
        self.posts.lock().unwrap().push(PostRow {
            id: Uuid::new_v4(),
            quote: quote.to_string(),
            category: "self_worth".to_string(),
            attribution: "Anonymous".to_string(),
            image_path: "/tmp/seed.png".to_string(),
            fingerprint: crate::uniqueness::fingerprint::fingerprint(quote),
            publish_id: None,
            posted_at: now - chrono::Duration::seconds(seconds_ago),
            created_at: now,
            quality_score: Some(8.0),
            virality_score: Some(7.0),
            emotion: Some("hope".to_string()),
            generated_reason: None,
            opening_word: Some(opening_word.to_string()),
            tone: None,
        });
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_post_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<PostRow>, StoreError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.fingerprint == fingerprint)
            .cloned())
    }

    async fn find_recent_posts(&self, limit: i64) -> Result<Vec<PostRow>, StoreError> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        posts.truncate(limit.max(0) as usize);
        Ok(posts)
    }

    async fn insert_post(&self, post: NewPost) -> Result<PostRow, StoreError> {
        let mut posts = self.posts.lock().unwrap();
        if posts.iter().any(|p| p.fingerprint == post.fingerprint) {
            return Err(StoreError::DuplicateFingerprint(post.fingerprint));
        }
        let row = PostRow {
            id: Uuid::new_v4(),
            quote: post.quote,
            category: post.category,
            attribution: post.attribution,
            image_path: post.image_path,
            fingerprint: post.fingerprint,
            publish_id: post.publish_id,
            posted_at: post.posted_at,
            created_at: Utc::now(),
            quality_score: Some(post.quality_score),
            virality_score: Some(post.virality_score),
            emotion: Some(post.emotion),
            generated_reason: Some(post.generated_reason),
            opening_word: Some(post.opening_word),
            tone: post.tone,
        };
        posts.push(row.clone());
        Ok(row)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<CategoryRow>, StoreError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn count_categories(&self) -> Result<i64, StoreError> {
        Ok(self.categories.lock().unwrap().len() as i64)
    }

    async fn insert_categories(&self, categories: &[CategoryRow]) -> Result<(), StoreError> {
        let mut stored = self.categories.lock().unwrap();
        for category in categories {
            if !stored.iter().any(|c| c.name == category.name) {
                stored.push(category.clone());
            }
        }
        Ok(())
    }

    async fn count_personas(&self) -> Result<i64, StoreError> {
        Ok(self.personas.lock().unwrap().len() as i64)
    }

    async fn insert_personas(&self, personas: &[PersonaRow]) -> Result<(), StoreError> {
        let mut stored = self.personas.lock().unwrap();
        for persona in personas {
            if !stored.iter().any(|p| p.name == persona.name) {
                stored.push(persona.clone());
            }
        }
        Ok(())
    }
}
