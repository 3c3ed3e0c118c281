//! Parsing of the two self-scoring responses.
//!
//! The model answers in free text that should contain a JSON object. We take the
//! first balanced `{...}` span, deserialize it, and fall back to fixed defaults
//! when that fails. The fallback is explicit in the return type so callers and
//! tests can tell which branch produced the value.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Minimum quality score that approves a draft.
pub const QUALITY_THRESHOLD: f64 = 7.0;

/// Score assumed when the quality response cannot be parsed. Fails open.
pub const QUALITY_FALLBACK_SCORE: f64 = 7.0;
pub const QUALITY_FALLBACK_REASON: &str = "parse error fallback";

pub const VIRALITY_FALLBACK_SCORE: f64 = 5.0;
pub const VIRALITY_FALLBACK_EMOTION: &str = "neutral";
pub const VIRALITY_FALLBACK_REACTION: &str = "average";

/// Either a value parsed from the model, or a documented default plus why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ScoreOutcome<T> {
    Parsed { value: T },
    Fallback { value: T, reason: String },
}

impl<T> ScoreOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            ScoreOutcome::Parsed { value } | ScoreOutcome::Fallback { value, .. } => value,
        }
    }

    #[cfg(test)]
    pub fn into_value(self) -> T {
        match self {
            ScoreOutcome::Parsed { value } | ScoreOutcome::Fallback { value, .. } => value,
        }
    }

    #[cfg(test)]
    pub fn is_fallback(&self) -> bool {
        matches!(self, ScoreOutcome::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityVerdict {
    pub score: f64,
    pub reason: String,
    /// Derived from `score >= QUALITY_THRESHOLD`; the model's own flag is not trusted.
    pub approved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralityScore {
    pub virality_score: f64,
    pub emotion: String,
    pub likely_audience_reaction: String,
}

#[derive(Debug, Deserialize)]
struct RawQuality {
    score: f64,
    #[serde(default)]
    reason: String,
}

/// Returns the first balanced `{...}` span in `text`, honoring JSON string
/// literals so braces inside strings do not count.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

fn parse_object<T: serde::de::DeserializeOwned>(response: &str) -> Result<T, String> {
    let json = extract_json_object(response).ok_or_else(|| "no JSON object in response".to_string())?;
    serde_json::from_str(json).map_err(|e| e.to_string())
}

pub fn parse_quality(response: &str) -> ScoreOutcome<QualityVerdict> {
    match parse_object::<RawQuality>(response) {
        Ok(raw) => ScoreOutcome::Parsed {
            value: QualityVerdict {
                approved: raw.score >= QUALITY_THRESHOLD,
                score: raw.score,
                reason: raw.reason,
            },
        },
        Err(reason) => {
            warn!("Failed to parse quality check JSON, approving by default: {reason}");
            ScoreOutcome::Fallback {
                value: QualityVerdict {
                    score: QUALITY_FALLBACK_SCORE,
                    reason: QUALITY_FALLBACK_REASON.to_string(),
                    approved: true,
                },
                reason,
            }
        }
    }
}

pub fn parse_virality(response: &str) -> ScoreOutcome<ViralityScore> {
    match parse_object::<ViralityScore>(response) {
        Ok(value) => ScoreOutcome::Parsed { value },
        Err(reason) => {
            warn!("Failed to parse virality JSON, using defaults: {reason}");
            ScoreOutcome::Fallback {
                value: ViralityScore {
                    virality_score: VIRALITY_FALLBACK_SCORE,
                    emotion: VIRALITY_FALLBACK_EMOTION.to_string(),
                    likely_audience_reaction: VIRALITY_FALLBACK_REACTION.to_string(),
                },
                reason,
            }
        }
    }
}
