//! Quote card rendering: layout → SVG → PNG on disk.
//!
//! Rasterization is CPU-bound and runs inside `spawn_blocking`. The font
//! database is loaded once when the renderer is built.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use resvg::{tiny_skia, usvg};
use thiserror::Error;
use tracing::{info, warn};

use crate::layout::{layout_card, CardSpec};

pub mod svg;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid card SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("Rasterization failed: {0}")]
    Raster(String),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait CardRenderer: Send + Sync {
    /// Renders a card and returns the path of the written image.
    async fn render(&self, quote: &str, attribution: &str) -> Result<PathBuf, RenderError>;

    /// Deletes a previously rendered card. Missing files are ignored.
    async fn discard(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => info!("Removed unused card {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove card {}: {e}", path.display()),
        }
    }
}

pub struct PngCardRenderer {
    output_dir: PathBuf,
    spec: CardSpec,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl PngCardRenderer {
    /// Loads system fonts plus any fonts under `font_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, font_dir: Option<&Path>) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        if let Some(dir) = font_dir {
            fontdb.load_fonts_dir(dir);
        }
        info!("Card renderer loaded {} font faces", fontdb.len());

        Self {
            output_dir: output_dir.into(),
            spec: CardSpec::default(),
            fontdb: Arc::new(fontdb),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl CardRenderer for PngCardRenderer {
    async fn render(&self, quote: &str, attribution: &str) -> Result<PathBuf, RenderError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self
            .output_dir
            .join(format!("quote_{}.png", Utc::now().timestamp_millis()));

        let spec = self.spec.clone();
        let fontdb = self.fontdb.clone();
        let quote = quote.to_string();
        let attribution = attribution.to_string();
        let target = path.clone();

        tokio::task::spawn_blocking(move || {
            let layout = layout_card(&spec, &quote, &attribution);
            let document = svg::build_svg(&spec, &layout);
            rasterize(&document, &spec, fontdb, &target)
        })
        .await??;

        info!("Quote card generated: {}", path.display());
        Ok(path)
    }
}

fn rasterize(
    document: &str,
    spec: &CardSpec,
    fontdb: Arc<usvg::fontdb::Database>,
    target: &Path,
) -> Result<(), RenderError> {
    let options = usvg::Options {
        fontdb,
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(document, &options)?;

    let mut pixmap = tiny_skia::Pixmap::new(spec.width as u32, spec.height as u32)
        .ok_or_else(|| RenderError::Raster("zero-sized canvas".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .save_png(target)
        .map_err(|e| RenderError::Raster(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_writes_png_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("images");
        let renderer = PngCardRenderer::new(&out, None);

        let path = renderer
            .render("Your peace is worth more than their approval.", "Daily Reminder")
            .await
            .unwrap();

        assert!(path.starts_with(&out));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("quote_") && name.ends_with(".png"), "{name}");

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn test_discard_removes_file_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PngCardRenderer::new(dir.path(), None);
        let path = renderer.render("Short and real.", "Anonymous").await.unwrap();

        renderer.discard(&path).await;
        assert!(!path.exists());
        renderer.discard(&path).await;
    }
}
