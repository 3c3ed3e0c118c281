use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::pipeline::orchestrator::DEFAULT_BRAND_NAME;

/// What the process does after connecting to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Publish one post and exit.
    Once,
    /// Run the scheduler and the HTTP surface until Ctrl-C.
    Serve,
    /// Seed reference data and exit.
    Seed,
}

impl FromStr for RunMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "once" => Ok(RunMode::Once),
            "serve" => Ok(RunMode::Serve),
            "seed" => Ok(RunMode::Seed),
            other => bail!("RUN_MODE must be one of once, serve, seed (got '{other}')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub facebook_page_access_token: String,
    pub facebook_page_id: String,
    pub posts_per_day: u32,
    pub min_delay_minutes: u32,
    pub max_delay_minutes: u32,
    pub image_output_dir: PathBuf,
    pub font_dir: Option<PathBuf>,
    pub brand_name: String,
    pub persona_hints: bool,
    pub run_mode: RunMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let min_delay_minutes = parse_var(&lookup, "MIN_DELAY_MINUTES", 60)?;
        let max_delay_minutes = parse_var(&lookup, "MAX_DELAY_MINUTES", 180)?;
        if min_delay_minutes > max_delay_minutes {
            bail!("MIN_DELAY_MINUTES ({min_delay_minutes}) must not exceed MAX_DELAY_MINUTES ({max_delay_minutes})");
        }

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            groq_api_key: require("GROQ_API_KEY")?,
            groq_model: or_default("GROQ_MODEL", DEFAULT_MODEL),
            facebook_page_access_token: require("FACEBOOK_PAGE_ACCESS_TOKEN")?,
            facebook_page_id: require("FACEBOOK_PAGE_ID")?,
            posts_per_day: parse_var(&lookup, "POSTS_PER_DAY", 3)?,
            min_delay_minutes,
            max_delay_minutes,
            image_output_dir: PathBuf::from(or_default("IMAGE_OUTPUT_DIR", "./output/images")),
            font_dir: lookup("FONT_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
            brand_name: or_default("BRAND_NAME", DEFAULT_BRAND_NAME),
            persona_hints: parse_var(&lookup, "PERSONA_HINTS", false)?,
            run_mode: or_default("RUN_MODE", "once").parse()?,
            port: parse_var(&lookup, "PORT", 8080)?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        _ => Ok(default),
    }
}
