// Text layout for quote cards: metric tables, greedy wrap, card geometry.
// Pure and synchronous; the renderer calls it from inside spawn_blocking.

pub mod card;
pub mod font_metrics;
pub mod wrap;

pub use card::{layout_card, CardLayout, CardSpec, PlacedLine};
pub use font_metrics::CardFont;
