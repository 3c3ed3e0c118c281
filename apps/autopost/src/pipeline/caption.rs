/// Hashtags appended to every caption after the category tag.
pub const HASHTAGS: &[&str] = &["#motivation", "#inspiration", "#quotes", "#dailywisdom"];

/// Labels drawn uniformly for each post's stored attribution.
pub const ATTRIBUTIONS: &[&str] = &[
    "Anonymous",
    "Modern Life Notes",
    "Relationship Truths",
    "Daily Reminder",
    "Real Talk",
];

pub fn build_caption(quote: &str, category: &str, brand_name: &str) -> String {
    format!(
        "{quote}\n\n\u{2014} Inspired by {brand_name}\n\n#{category} {}",
        HASHTAGS.join(" ")
    )
}
