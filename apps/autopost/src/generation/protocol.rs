//! Quote Generation Protocol — draft → quality check → virality score.
//!
//! Each step is a single completion call. A quality rejection ends the attempt
//! with `GenerationError::Rejected`; `generate` never retries on its own. The
//! separate `generate_with_retry` wrapper adds sequential retries with a linear
//! backoff of `attempt × base_delay`.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::prompts::{
    DEFAULT_VOICE, DRAFT_PROMPT_TEMPLATE, QUALITY_PROMPT_TEMPLATE, VIRALITY_PROMPT_TEMPLATE,
};
use crate::generation::scoring::{
    parse_quality, parse_virality, QualityVerdict, ScoreOutcome, ViralityScore,
};
use crate::generation::tone::{tone_guidance, Tone};
use crate::llm_client::{CompletionService, LlmError};
use crate::uniqueness::diversity::BANNED_OPENINGS;

pub const DRAFT_TEMPERATURE: f32 = 0.9;
pub const SCORING_TEMPERATURE: f32 = 0.1;
pub const MIN_WORDS: usize = 8;
pub const MAX_WORDS: usize = 18;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Quote rejected by quality filter (score {score}): {reason}")]
    Rejected { score: f64, reason: String },

    #[error("Completion call failed during {step}: {source}")]
    Upstream {
        step: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("Draft step returned no quote text")]
    EmptyDraft,
}

/// Inputs for one generation attempt.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub category: String,
    pub keywords: Vec<String>,
    pub persona_hint: Option<String>,
    pub tone: Option<Tone>,
}

/// Handoff from generation to the filters and the post record.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuote {
    pub quote: String,
    pub quality: ScoreOutcome<QualityVerdict>,
    pub virality: ScoreOutcome<ViralityScore>,
}

impl GeneratedQuote {
    pub fn quality_score(&self) -> f64 {
        self.quality.value().score
    }

    pub fn virality_score(&self) -> f64 {
        self.virality.value().virality_score
    }

    pub fn emotion(&self) -> &str {
        &self.virality.value().emotion
    }

    pub fn rationale(&self) -> &str {
        &self.virality.value().likely_audience_reaction
    }
}

// The retry wrapper is for standalone callers; the orchestrator runs `generate`
// once per attempt and owns the outer retry loop.
#[cfg_attr(not(test), allow(dead_code))]
pub struct QuoteGenerator {
    llm: Arc<dyn CompletionService>,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl QuoteGenerator {
    pub fn new(llm: Arc<dyn CompletionService>) -> Self {
        Self {
            llm,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_retry_policy(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.retry_base_delay = base_delay;
        self
    }

    /// Runs the three steps once.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedQuote, GenerationError> {
        let quote = self.draft(request).await?;
        info!("Generated raw quote: \"{quote}\"");

        let quality = self.quality_check(&quote).await?;
        let verdict = quality.value();
        info!(
            "Quality Score: {}/10 ({}) - {}",
            verdict.score,
            if verdict.approved { "Approved" } else { "Rejected" },
            verdict.reason
        );

        if !verdict.approved {
            return Err(GenerationError::Rejected {
                score: verdict.score,
                reason: verdict.reason.clone(),
            });
        }

        let virality = self.virality_score(&quote).await?;
        info!(
            "Virality Score: {}/10 - {}",
            virality.value().virality_score,
            virality.value().emotion
        );

        Ok(GeneratedQuote {
            quote,
            quality,
            virality,
        })
    }

    /// Calls `generate` up to `max_retries` times, sleeping `attempt × base_delay`
    /// after each failure. Returns the last error when every attempt fails.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn generate_with_retry(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedQuote, GenerationError> {
        let mut attempt = 1;
        loop {
            match self.generate(request).await {
                Ok(generated) => return Ok(generated),
                Err(e) if attempt < self.max_retries => {
                    warn!("Quote generation attempt {attempt} failed: {e}");
                    tokio::time::sleep(self.retry_base_delay * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("Quote generation attempt {attempt} failed, giving up: {e}");
                    return Err(e);
                }
            }
        }
    }

    async fn draft(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let prompt = build_draft_prompt(request);
        let raw = self
            .llm
            .complete(&prompt, DRAFT_TEMPERATURE)
            .await
            .map_err(|source| GenerationError::Upstream {
                step: "draft",
                source,
            })?;

        let quote = clean_draft(&raw);
        if quote.is_empty() {
            return Err(GenerationError::EmptyDraft);
        }
        Ok(quote)
    }

    async fn quality_check(
        &self,
        quote: &str,
    ) -> Result<ScoreOutcome<QualityVerdict>, GenerationError> {
        let prompt = QUALITY_PROMPT_TEMPLATE.replace("{quote}", quote);
        let response = self
            .llm
            .complete(&prompt, SCORING_TEMPERATURE)
            .await
            .map_err(|source| GenerationError::Upstream {
                step: "quality",
                source,
            })?;
        Ok(parse_quality(&response))
    }

    async fn virality_score(
        &self,
        quote: &str,
    ) -> Result<ScoreOutcome<ViralityScore>, GenerationError> {
        let prompt = VIRALITY_PROMPT_TEMPLATE.replace("{quote}", quote);
        let response = self
            .llm
            .complete(&prompt, SCORING_TEMPERATURE)
            .await
            .map_err(|source| GenerationError::Upstream {
                step: "virality",
                source,
            })?;
        Ok(parse_virality(&response))
    }
}

pub(crate) fn build_draft_prompt(request: &GenerationRequest) -> String {
    let banned = BANNED_OPENINGS
        .iter()
        .map(|w| format!("\"{w}\""))
        .collect::<Vec<_>>()
        .join(", ");

    let keywords = if request.keywords.is_empty() {
        "none".to_string()
    } else {
        request.keywords.join(", ")
    };

    let voice = match &request.persona_hint {
        Some(persona) => format!("Inspired by thinking style of: {persona}"),
        None => DEFAULT_VOICE.to_string(),
    };

    DRAFT_PROMPT_TEMPLATE
        .replace("{banned_openings}", &banned)
        .replace("{min_words}", &MIN_WORDS.to_string())
        .replace("{max_words}", &MAX_WORDS.to_string())
        .replace("{tone_guidance}", &tone_guidance(request.tone))
        .replace("{category}", &request.category)
        .replace("{keywords}", &keywords)
        .replace("{voice}", &voice)
}

/// Trims the model output and strips one layer of surrounding quote marks.
pub(crate) fn clean_draft(raw: &str) -> String {
    const QUOTE_MARKS: &[char] = &['"', '\'', '\u{201C}', '\u{201D}'];

    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix(QUOTE_MARKS).unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(QUOTE_MARKS).unwrap_or(trimmed);
    trimmed.trim().to_string()
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{CompletionService, LlmError};

    /// Routes each prompt to a canned response by step. Drafts are popped from a
    /// queue; scoring responses repeat the last configured value.
    pub struct ScriptedCompletion {
        drafts: Mutex<VecDeque<Result<String, u16>>>,
        quality: Mutex<String>,
        virality: Mutex<String>,
        calls: Mutex<Vec<(String, f32)>>,
    }

    impl ScriptedCompletion {
        pub fn new<I, S>(drafts: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                drafts: Mutex::new(drafts.into_iter().map(|d| Ok(d.into())).collect()),
                quality: Mutex::new(
                    r#"{"score": 8, "reason": "relatable", "approved": true}"#.to_string(),
                ),
                virality: Mutex::new(
                    r#"{"virality_score": 7, "emotion": "validation", "likely_audience_reaction": "people tag friends"}"#
                        .to_string(),
                ),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn empty() -> Self {
            Self::new(Vec::<String>::new())
        }

        pub fn push_draft(&self, draft: &str) {
            self.drafts.lock().unwrap().push_back(Ok(draft.to_string()));
        }

        pub fn with_quality(self, response: &str) -> Self {
            *self.quality.lock().unwrap() = response.to_string();
            self
        }

        pub fn with_virality(self, response: &str) -> Self {
            *self.virality.lock().unwrap() = response.to_string();
            self
        }

        /// Queues a draft call that fails with the given HTTP status.
        pub fn push_draft_failure(&self, status: u16) {
            self.drafts.lock().unwrap().push_back(Err(status));
        }

        pub fn calls(&self) -> Vec<(String, f32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), temperature));

            if prompt.starts_with("Evaluate the quote") {
                return Ok(self.quality.lock().unwrap().clone());
            }
            if prompt.starts_with("Estimate the virality") {
                return Ok(self.virality.lock().unwrap().clone());
            }

            match self.drafts.lock().unwrap().pop_front() {
                Some(Ok(draft)) => Ok(draft),
                Some(Err(status)) => Err(LlmError::Api {
                    status,
                    message: "scripted failure".to_string(),
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }
}
