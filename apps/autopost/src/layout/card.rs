//! Quote card geometry: wraps the quote, then centers the quote block plus the
//! attribution line vertically on a square canvas.

use serde::Serialize;

use crate::layout::font_metrics::CardFont;
use crate::layout::wrap::{wrap, WrappedText};

/// Fixed card dimensions and typography, in pixels.
#[derive(Debug, Clone, Serialize)]
pub struct CardSpec {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub quote_font: CardFont,
    pub quote_size: f32,
    pub attribution_font: CardFont,
    pub attribution_size: f32,
    /// Multiplier applied to font size to get line height.
    pub line_spacing: f32,
    /// Space between the last quote line box and the attribution box.
    pub gap: f32,
    pub background: &'static str,
    pub quote_color: &'static str,
    pub attribution_color: &'static str,
}

impl Default for CardSpec {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1080.0,
            padding: 100.0,
            quote_font: CardFont::LatoBold,
            quote_size: 64.0,
            attribution_font: CardFont::DejaVuSerifBold,
            attribution_size: 48.0,
            line_spacing: 1.4,
            gap: 60.0,
            background: "#000000",
            quote_color: "#ffffff",
            attribution_color: "#dddddd",
        }
    }
}

impl CardSpec {
    pub fn max_text_width(&self) -> f32 {
        self.width - self.padding * 2.0
    }

    pub fn quote_line_height(&self) -> f32 {
        self.quote_size * self.line_spacing
    }

    pub fn attribution_height(&self) -> f32 {
        self.attribution_size * self.line_spacing
    }
}

/// One line of text anchored at its horizontal center and baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub center_x: f32,
    pub baseline_y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardLayout {
    pub quote: WrappedText,
    pub quote_lines: Vec<PlacedLine>,
    pub attribution: PlacedLine,
    /// Top of the combined quote + gap + attribution block.
    pub start_y: f32,
}

/// Lays out the card using the built-in metric tables.
pub fn layout_card(spec: &CardSpec, quote: &str, attribution: &str) -> CardLayout {
    let metrics = spec.quote_font.metrics();
    let size = spec.quote_size;
    layout_card_with(spec, quote, attribution, |s| metrics.measure_px(s, size))
}

/// Lays out the card with a caller-supplied quote measurer.
pub fn layout_card_with<F>(spec: &CardSpec, quote: &str, attribution: &str, measure: F) -> CardLayout
where
    F: Fn(&str) -> f32,
{
    let line_height = spec.quote_line_height();
    let wrapped = wrap(quote, spec.max_text_width(), line_height, measure);

    let block_height = wrapped.total_height + spec.gap + spec.attribution_height();
    let start_y = (spec.height - block_height) / 2.0;
    let center_x = spec.width / 2.0;

    let quote_lines = wrapped
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| PlacedLine {
            text: line.clone(),
            center_x,
            baseline_y: start_y + i as f32 * line_height + spec.quote_size,
        })
        .collect();

    let attribution = PlacedLine {
        text: format!("\u{2014} {attribution}"),
        center_x,
        baseline_y: start_y + wrapped.total_height + spec.gap + spec.attribution_size,
    };

    CardLayout {
        quote: wrapped,
        quote_lines,
        attribution,
        start_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> CardSpec {
        CardSpec::default()
    }

    #[test]
    fn test_default_geometry() {
        let spec = spec();
        assert_eq!(spec.max_text_width(), 880.0);
        assert!((spec.quote_line_height() - 89.6).abs() < 1e-3);
        assert!((spec.attribution_height() - 67.2).abs() < 1e-3);
    }

    #[test]
    fn test_single_line_block_is_centered() {
        let spec = spec();
        let layout = layout_card_with(&spec, "Short", "Daily Reminder", |_| 10.0);
        assert_eq!(layout.quote_lines.len(), 1);

        // block = 89.6 + 60 + 67.2 = 216.8 -> start = (1080 - 216.8) / 2 = 431.6
        assert!((layout.start_y - 431.6).abs() < 1e-3);
        assert!((layout.quote_lines[0].baseline_y - (431.6 + 64.0)).abs() < 1e-3);
        assert!((layout.attribution.baseline_y - (431.6 + 89.6 + 60.0 + 48.0)).abs() < 1e-3);
        assert_eq!(layout.quote_lines[0].center_x, 540.0);
    }

    #[test]
    fn test_lines_step_by_line_height() {
        let spec = spec();
        // Every word is 500px wide, so each word gets its own line.
        let layout = layout_card_with(&spec, "one two three", "Real Talk", |s| {
            500.0 * s.split(' ').count() as f32
        });
        assert_eq!(layout.quote_lines.len(), 3);
        let step = layout.quote_lines[1].baseline_y - layout.quote_lines[0].baseline_y;
        assert!((step - spec.quote_line_height()).abs() < 1e-3);

        let block = 3.0 * spec.quote_line_height() + spec.gap + spec.attribution_height();
        let top = layout.start_y;
        let bottom = spec.height - (top + block);
        assert!((top - bottom).abs() < 1e-3, "block must be vertically centered");
    }

    #[test]
    fn test_attribution_is_dash_prefixed() {
        let layout = layout_card(&spec(), "Protect your peace.", "Anonymous");
        assert_eq!(layout.attribution.text, "\u{2014} Anonymous");
    }

    #[test]
    fn test_realistic_quote_stays_within_padding() {
        let spec = spec();
        let metrics = spec.quote_font.metrics();
        let quote = "Stop explaining yourself to people who are committed to misunderstanding you.";
        let layout = layout_card(&spec, quote, "Real Talk");
        assert!(layout.quote_lines.len() >= 2);
        for line in &layout.quote_lines {
            assert!(metrics.measure_px(&line.text, spec.quote_size) <= spec.max_text_width());
        }
    }
}
