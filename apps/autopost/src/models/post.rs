use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A published quote post. Append-only: inserted once, never updated.
///
/// `fingerprint` is unique across all rows and is the dedup key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub quote: String,
    pub category: String,
    pub attribution: String,
    pub image_path: String,
    pub fingerprint: String,
    pub publish_id: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub quality_score: Option<f64>,
    pub virality_score: Option<f64>,
    pub emotion: Option<String>,
    pub generated_reason: Option<String>,
    pub opening_word: Option<String>,
    pub tone: Option<String>,
}

/// Insert payload for a new post. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub quote: String,
    pub category: String,
    pub attribution: String,
    pub image_path: String,
    pub fingerprint: String,
    pub publish_id: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub quality_score: f64,
    pub virality_score: f64,
    pub emotion: String,
    pub generated_reason: String,
    pub opening_word: String,
    pub tone: Option<String>,
}
