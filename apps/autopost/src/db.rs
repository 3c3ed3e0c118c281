use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
///
/// The pipeline runs one job at a time, so a handful of connections covers the
/// scheduler plus the operator routes.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Statements run on every boot. All idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        name        TEXT PRIMARY KEY,
        description TEXT NOT NULL,
        keywords    TEXT[] NOT NULL DEFAULT '{}',
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS personas (
        name        TEXT PRIMARY KEY,
        description TEXT NOT NULL,
        tags        TEXT[] NOT NULL DEFAULT '{}',
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id               UUID PRIMARY KEY,
        quote            TEXT NOT NULL,
        category         TEXT NOT NULL,
        attribution      TEXT NOT NULL,
        image_path       TEXT NOT NULL,
        fingerprint      TEXT NOT NULL,
        publish_id       TEXT,
        posted_at        TIMESTAMPTZ NOT NULL,
        created_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
        quality_score    DOUBLE PRECISION,
        virality_score   DOUBLE PRECISION,
        emotion          TEXT,
        generated_reason TEXT,
        opening_word     TEXT,
        tone             TEXT
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS posts_fingerprint_key ON posts (fingerprint)",
    "CREATE INDEX IF NOT EXISTS posts_posted_at_idx ON posts (posted_at DESC)",
    "CREATE INDEX IF NOT EXISTS posts_category_idx ON posts (category)",
];

/// Creates tables and indexes if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema verified");
    Ok(())
}
