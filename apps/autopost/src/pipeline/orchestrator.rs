//! Publication Orchestrator — one post per successful run.
//!
//! Each attempt walks a fixed sequence of stages:
//!
//! `SelectCategory → Generate → DiversityCheck → FilterUnique → Render → Publish → Persist → Done`
//!
//! Every stage carries the data produced so far, and `step` is the only
//! transition function. A soft failure (quality rejection, duplicate, banned or
//! repeated opening) or an upstream failure ends the attempt; the outer loop
//! starts over at `SelectCategory` until `max_attempts` is reached. Publish and
//! persist only ever happen on the attempt that reaches `Done`.
//!
//! Uniqueness checks read, then a later stage writes, with no transaction in
//! between. Safe only while a single runner publishes at a time.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::catalog::PERSONAS;
use crate::generation::category::{CategorySelector, SelectedCategory};
use crate::generation::protocol::{GeneratedQuote, GenerationError, GenerationRequest, QuoteGenerator};
use crate::generation::random::Dice;
use crate::generation::tone::Tone;
use crate::models::post::{NewPost, PostRow};
use crate::pipeline::caption::{build_caption, ATTRIBUTIONS};
use crate::publish::{PublishError, Publisher};
use crate::render::{CardRenderer, RenderError};
use crate::store::{Store, StoreError};
use crate::uniqueness::diversity::{check_opening, opening_word, RECENT_OPENINGS_WINDOW};
use crate::uniqueness::{DiversityVerdict, UniquenessFilter, UniquenessVerdict};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BRAND_NAME: &str = "Limitless Mindset";

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Quote rejected by quality filter (score {score}): {reason}")]
    QualityRejected { score: f64, reason: String },

    #[error("Quote already published (fingerprint {fingerprint})")]
    ExactDuplicate { fingerprint: String },

    #[error("Quote too similar to an existing post ({:.1}% similar)", .similarity * 100.0)]
    NearDuplicate { similarity: f64 },

    #[error("Quote starts with banned word \"{word}\"")]
    BannedOpening { word: String },

    #[error("Quote starts with recently used word \"{word}\"")]
    RepeatedOpening { word: String },

    #[error("Generation failed: {0}")]
    Generation(GenerationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("No post published after {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// Published, but the record could not be written. Not retried: a retry
    /// would publish a second post.
    #[error("Post {publish_id} was published but not recorded: {source}")]
    Unrecorded {
        publish_id: String,
        #[source]
        source: StoreError,
    },
}

impl PipelineError {
    /// Soft failures are content verdicts; everything else is an upstream fault.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            PipelineError::QualityRejected { .. }
                | PipelineError::ExactDuplicate { .. }
                | PipelineError::NearDuplicate { .. }
                | PipelineError::BannedOpening { .. }
                | PipelineError::RepeatedOpening { .. }
        )
    }
}

impl From<GenerationError> for PipelineError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::Rejected { score, reason } => {
                PipelineError::QualityRejected { score, reason }
            }
            other => PipelineError::Generation(other),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stages
// ────────────────────────────────────────────────────────────────────────────

/// Everything known about the quote being worked on in this attempt.
#[derive(Debug, Clone)]
struct Candidate {
    category: SelectedCategory,
    attribution: &'static str,
    tone: Tone,
    generated: GeneratedQuote,
    opening_word: String,
}

#[derive(Debug)]
enum Stage {
    SelectCategory,
    Generate {
        category: SelectedCategory,
        attribution: &'static str,
        tone: Tone,
        persona_hint: Option<String>,
    },
    DiversityCheck(Candidate),
    FilterUnique(Candidate),
    Render(Candidate),
    Publish(Candidate, PathBuf),
    Persist(Candidate, PathBuf, String),
    Done(PostRow),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::SelectCategory => "select_category",
            Stage::Generate { .. } => "generate",
            Stage::DiversityCheck(_) => "diversity_check",
            Stage::FilterUnique(_) => "filter_unique",
            Stage::Render(_) => "render",
            Stage::Publish(..) => "publish",
            Stage::Persist(..) => "persist",
            Stage::Done(_) => "done",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub brand_name: String,
    pub persona_hints: bool,
    pub max_attempts: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            persona_hints: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedPost {
    pub post: PostRow,
    pub attempts: u32,
}

pub struct Orchestrator {
    store: Arc<dyn Store>,
    selector: CategorySelector,
    generator: QuoteGenerator,
    uniqueness: UniquenessFilter,
    renderer: Arc<dyn CardRenderer>,
    publisher: Arc<dyn Publisher>,
    dice: Arc<Dice>,
    settings: PipelineSettings,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn Store>,
        generator: QuoteGenerator,
        renderer: Arc<dyn CardRenderer>,
        publisher: Arc<dyn Publisher>,
        dice: Arc<Dice>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            selector: CategorySelector::new(store.clone()),
            uniqueness: UniquenessFilter::new(store.clone()),
            store,
            generator,
            renderer,
            publisher,
            dice,
            settings,
        }
    }

    /// Runs attempts until one publishes or the bound is reached.
    pub async fn create_and_publish(&self) -> Result<PublishedPost, PipelineError> {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            info!("Creating post (attempt {attempt}/{max_attempts})...");

            match self.run_attempt().await {
                Ok(post) => {
                    info!(post_id = %post.id, "Post created and published successfully!");
                    return Ok(PublishedPost {
                        post,
                        attempts: attempt,
                    });
                }
                Err(e @ PipelineError::Unrecorded { .. }) => {
                    error!("{e}");
                    return Err(e);
                }
                Err(e) if attempt < max_attempts => {
                    if e.is_soft() {
                        warn!("Attempt {attempt} rejected: {e}, retrying...");
                    } else {
                        error!("Attempt {attempt} failed: {e}");
                    }
                }
                Err(e) if e.is_soft() => {
                    warn!("Attempt {attempt} rejected: {e}");
                    break;
                }
                Err(e) => {
                    error!("Attempt {attempt} failed: {e}");
                    return Err(e);
                }
            }
        }

        Err(PipelineError::Exhausted {
            attempts: max_attempts,
        })
    }

    /// One pass through the stages.
    pub(crate) async fn run_attempt(&self) -> Result<PostRow, PipelineError> {
        let mut stage = Stage::SelectCategory;
        loop {
            if let Stage::Done(post) = stage {
                return Ok(post);
            }
            let current = stage.name();
            stage = self.step(stage).await.map_err(|e| {
                if !e.is_soft() {
                    warn!(stage = current, "Stage failed: {e}");
                }
                e
            })?;
        }
    }

    async fn step(&self, stage: Stage) -> Result<Stage, PipelineError> {
        match stage {
            Stage::SelectCategory => {
                let category = self.selector.select(&self.dice).await;
                let attribution = self.dice.pick(ATTRIBUTIONS).copied().unwrap_or("Anonymous");
                let tone = self.dice.pick(&Tone::ALL).copied().unwrap_or(Tone::Observation);
                let persona_hint = if self.settings.persona_hints {
                    self.dice.pick(PERSONAS).map(|p| p.name.to_string())
                } else {
                    None
                };
                info!(
                    "Selected category: {}, attribution: {attribution}, tone: {}",
                    category.category.name,
                    tone.label()
                );
                Ok(Stage::Generate {
                    category,
                    attribution,
                    tone,
                    persona_hint,
                })
            }

            Stage::Generate {
                category,
                attribution,
                tone,
                persona_hint,
            } => {
                let request = GenerationRequest {
                    category: category.category.name.clone(),
                    keywords: category.category.keywords.clone(),
                    persona_hint,
                    tone: Some(tone),
                };
                let generated = self.generator.generate(&request).await?;
                info!(
                    "Generated quote: \"{}\" (Quality: {}, Virality: {})",
                    generated.quote,
                    generated.quality_score(),
                    generated.virality_score()
                );
                let opening_word = opening_word(&generated.quote);
                Ok(Stage::DiversityCheck(Candidate {
                    category,
                    attribution,
                    tone,
                    generated,
                    opening_word,
                }))
            }

            Stage::DiversityCheck(candidate) => {
                let recent = self.store.find_recent_posts(RECENT_OPENINGS_WINDOW).await?;
                let openings = recent.iter().filter_map(|p| p.opening_word.as_deref());

                match check_opening(&candidate.generated.quote, openings) {
                    DiversityVerdict::Accepted => Ok(Stage::FilterUnique(candidate)),
                    DiversityVerdict::BannedOpening { word } => {
                        Err(PipelineError::BannedOpening { word })
                    }
                    DiversityVerdict::RepeatedOpening { word } => {
                        Err(PipelineError::RepeatedOpening { word })
                    }
                }
            }

            Stage::FilterUnique(candidate) => {
                match self.uniqueness.check(&candidate.generated.quote).await? {
                    UniquenessVerdict::Unique => Ok(Stage::Render(candidate)),
                    UniquenessVerdict::ExactDuplicate { fingerprint } => {
                        Err(PipelineError::ExactDuplicate { fingerprint })
                    }
                    UniquenessVerdict::NearDuplicate { similarity, .. } => {
                        Err(PipelineError::NearDuplicate { similarity })
                    }
                }
            }

            Stage::Render(candidate) => {
                let image_path = self
                    .renderer
                    .render(&candidate.generated.quote, &self.settings.brand_name)
                    .await?;
                Ok(Stage::Publish(candidate, image_path))
            }

            Stage::Publish(candidate, image_path) => {
                let caption = build_caption(
                    &candidate.generated.quote,
                    &candidate.category.category.name,
                    &self.settings.brand_name,
                );
                match self.publisher.publish(&image_path, &caption).await {
                    Ok(publish_id) => Ok(Stage::Persist(candidate, image_path, publish_id)),
                    Err(e) => {
                        self.renderer.discard(&image_path).await;
                        Err(e.into())
                    }
                }
            }

            Stage::Persist(candidate, image_path, publish_id) => {
                let post = new_post(candidate, &image_path, &publish_id);
                match self.store.insert_post(post).await {
                    Ok(row) => Ok(Stage::Done(row)),
                    Err(source) => Err(PipelineError::Unrecorded { publish_id, source }),
                }
            }

            Stage::Done(post) => Ok(Stage::Done(post)),
        }
    }
}

fn new_post(candidate: Candidate, image_path: &std::path::Path, publish_id: &str) -> NewPost {
    let Candidate {
        category,
        attribution,
        tone,
        generated,
        opening_word,
    } = candidate;

    NewPost {
        fingerprint: crate::uniqueness::fingerprint::fingerprint(&generated.quote),
        quality_score: generated.quality_score(),
        virality_score: generated.virality_score(),
        emotion: generated.emotion().to_string(),
        generated_reason: generated.rationale().to_string(),
        quote: generated.quote,
        category: category.category.name,
        attribution: attribution.to_string(),
        image_path: image_path.display().to_string(),
        publish_id: Some(publish_id.to_string()),
        posted_at: Utc::now(),
        opening_word,
        tone: Some(tone.label().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::generation::protocol::testing::ScriptedCompletion;
    use crate::generation::protocol::DRAFT_TEMPERATURE;
    use crate::models::category::CategoryRow;
    use crate::models::persona::PersonaRow;
    use crate::publish::PageInfo;
    use crate::store::memory::MemoryStore;

    // ── fakes ───────────────────────────────────────────────────────────────

    struct TempRenderer {
        dir: tempfile::TempDir,
        renders: AtomicUsize,
    }

    impl TempRenderer {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
                renders: AtomicUsize::new(0),
            }
        }

        fn files(&self) -> usize {
            std::fs::read_dir(self.dir.path()).unwrap().count()
        }
    }

    #[async_trait]
    impl CardRenderer for TempRenderer {
        async fn render(&self, _quote: &str, _attribution: &str) -> Result<PathBuf, RenderError> {
            let n = self.renders.fetch_add(1, Ordering::SeqCst);
            let path = self.dir.path().join(format!("quote_{n}.png"));
            std::fs::write(&path, b"png")?;
            Ok(path)
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<(PathBuf, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Publisher for RecordingPublisher {
        async fn publish(&self, image_path: &Path, caption: &str) -> Result<String, PublishError> {
            if self.fail {
                return Err(PublishError::Api {
                    status: 500,
                    message: "graph down".to_string(),
                });
            }
            let mut published = self.published.lock().unwrap();
            published.push((image_path.to_path_buf(), caption.to_string()));
            Ok(format!("page_{}", published.len()))
        }

        async fn test_connection(&self) -> Result<PageInfo, PublishError> {
            Ok(PageInfo {
                id: "page".to_string(),
                name: "Test Page".to_string(),
            })
        }
    }

    /// Delegates to a `MemoryStore` but refuses every post insert.
    struct ReadOnlyStore(MemoryStore);

    #[async_trait]
    impl Store for ReadOnlyStore {
        async fn find_post_by_fingerprint(&self, f: &str) -> Result<Option<PostRow>, StoreError> {
            self.0.find_post_by_fingerprint(f).await
        }
        async fn find_recent_posts(&self, limit: i64) -> Result<Vec<PostRow>, StoreError> {
            self.0.find_recent_posts(limit).await
        }
        async fn insert_post(&self, post: NewPost) -> Result<PostRow, StoreError> {
            Err(StoreError::DuplicateFingerprint(post.fingerprint))
        }
        async fn find_category_by_name(&self, n: &str) -> Result<Option<CategoryRow>, StoreError> {
            self.0.find_category_by_name(n).await
        }
        async fn count_categories(&self) -> Result<i64, StoreError> {
            self.0.count_categories().await
        }
        async fn insert_categories(&self, c: &[CategoryRow]) -> Result<(), StoreError> {
            self.0.insert_categories(c).await
        }
        async fn count_personas(&self) -> Result<i64, StoreError> {
            self.0.count_personas().await
        }
        async fn insert_personas(&self, p: &[PersonaRow]) -> Result<(), StoreError> {
            self.0.insert_personas(p).await
        }
    }

    struct Harness {
        orchestrator: Orchestrator,
        llm: Arc<ScriptedCompletion>,
        renderer: Arc<TempRenderer>,
        publisher: Arc<RecordingPublisher>,
    }

    fn harness(store: Arc<dyn Store>, drafts: &[&str], publisher: RecordingPublisher) -> Harness {
        let llm = Arc::new(ScriptedCompletion::new(drafts.iter().copied()));
        let renderer = Arc::new(TempRenderer::new());
        let publisher = Arc::new(publisher);
        let generator = QuoteGenerator::new(llm.clone());
        let orchestrator = Orchestrator::new(
            store,
            generator,
            renderer.clone(),
            publisher.clone(),
            Arc::new(Dice::seeded(5)),
            PipelineSettings::default(),
        );
        Harness {
            orchestrator,
            llm,
            renderer,
            publisher,
        }
    }

    // ── retry bound ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_four_soft_failures_then_success_publishes_once() {
        let store = Arc::new(MemoryStore::new());
        let h = harness(
            store.clone(),
            &[
                "Never settle for someone who only texts back when bored.",
                "Always remember who stayed when things got hard.",
                "Sometimes silence is the loudest way to say goodbye.",
                "Stop watering dead plants and calling it loyalty.",
                "Real love feels calm, not like a test you keep failing.",
            ],
            RecordingPublisher::default(),
        );

        let result = h.orchestrator.create_and_publish().await.unwrap();

        assert_eq!(result.attempts, 5);
        assert_eq!(result.post.quote, "Real love feels calm, not like a test you keep failing.");
        assert_eq!(store.posts().len(), 1);
        assert_eq!(h.publisher.published.lock().unwrap().len(), 1);
        assert_eq!(h.renderer.renders.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_five_soft_failures_exhaust_without_side_effects() {
        let store = Arc::new(MemoryStore::new());
        let h = harness(
            store.clone(),
            &[
                "Never beg for attention.",
                "Never chase what runs.",
                "Always choose peace first.",
                "Stop explaining your worth.",
                "One day you will thank yourself.",
            ],
            RecordingPublisher::default(),
        );

        let err = h.orchestrator.create_and_publish().await.unwrap_err();

        assert!(matches!(err, PipelineError::Exhausted { attempts: 5 }));
        assert!(store.posts().is_empty());
        assert!(h.publisher.published.lock().unwrap().is_empty());
        assert_eq!(h.renderer.renders.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_quality_rejection_then_upstream_failure_on_last_attempt() {
        let store = Arc::new(MemoryStore::new());
        let llm = Arc::new(
            ScriptedCompletion::new(["Be yourself."])
                .with_quality(r#"{"score": 5, "reason": "cliche"}"#),
        );
        let orchestrator = Orchestrator::new(
            store.clone(),
            QuoteGenerator::new(llm.clone()),
            Arc::new(TempRenderer::new()),
            Arc::new(RecordingPublisher::default()),
            Arc::new(Dice::seeded(1)),
            PipelineSettings {
                max_attempts: 2,
                ..PipelineSettings::default()
            },
        );

        // The single draft is rejected; the second attempt runs out of drafts,
        // an upstream failure on the final attempt.
        let err = orchestrator.create_and_publish().await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(_)));
        assert!(store.posts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quality_rejection_ends_attempt_after_one_draft() {
        let store = Arc::new(MemoryStore::new());
        let llm = Arc::new(
            ScriptedCompletion::new([
                "Be yourself no matter what anyone says today.",
                "Keep going even when nobody is clapping for you.",
            ])
            .with_quality(r#"{"score": 5, "reason": "cliche"}"#),
        );
        let orchestrator = Orchestrator::new(
            store.clone(),
            QuoteGenerator::new(llm.clone()),
            Arc::new(TempRenderer::new()),
            Arc::new(RecordingPublisher::default()),
            Arc::new(Dice::seeded(3)),
            PipelineSettings {
                max_attempts: 2,
                ..PipelineSettings::default()
            },
        );

        let started = tokio::time::Instant::now();
        let err = orchestrator.create_and_publish().await.unwrap_err();

        assert!(matches!(err, PipelineError::Exhausted { attempts: 2 }));
        let drafts = llm
            .calls()
            .iter()
            .filter(|(_, temperature)| *temperature == DRAFT_TEMPERATURE)
            .count();
        assert_eq!(drafts, 2, "one draft per outer attempt");
        assert_eq!(llm.calls().len(), 4, "draft + quality per attempt, no virality");
        assert_eq!(started.elapsed(), Duration::ZERO, "no generation backoff inside an attempt");
        assert!(store.posts().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_on_final_attempt_propagates() {
        let store = Arc::new(MemoryStore::new());
        let h = harness(
            store.clone(),
            &[
                "Your peace is worth more than their approval.",
                "Real ones check on you without being asked.",
                "Healing starts when you stop replaying the ending.",
                "Growth means outgrowing people you once needed.",
                "Effort is the clearest way to say I care.",
            ],
            RecordingPublisher {
                fail: true,
                ..RecordingPublisher::default()
            },
        );

        let err = h.orchestrator.create_and_publish().await.unwrap_err();

        assert!(matches!(err, PipelineError::Publish(_)));
        assert!(store.posts().is_empty());
        assert_eq!(h.renderer.renders.load(Ordering::SeqCst), 5);
        assert_eq!(h.renderer.files(), 0, "failed attempts must not leave cards behind");
    }

    // ── stage order ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_banned_opening_rejected_before_uniqueness() {
        let store = Arc::new(MemoryStore::new());
        // An exact duplicate exists, but the banned opening must win.
        store.push_post("Never beg for attention.", "Real", 60);
        let h = harness(store, &["Never beg for attention."], RecordingPublisher::default());

        let err = h.orchestrator.run_attempt().await.unwrap_err();
        assert!(
            matches!(&err, PipelineError::BannedOpening { word } if word == "Never"),
            "got {err:?}"
        );
        assert!(err.is_soft());
    }

    #[tokio::test]
    async fn test_repeated_opening_rejected() {
        let store = Arc::new(MemoryStore::new());
        store.push_post("Real friends show up.", "Real", 60);
        let h = harness(store, &["Real love feels calm and safe."], RecordingPublisher::default());

        let err = h.orchestrator.run_attempt().await.unwrap_err();
        assert!(matches!(err, PipelineError::RepeatedOpening { .. }));
    }

    #[tokio::test]
    async fn test_exact_duplicate_is_soft_and_retried() {
        let store = Arc::new(MemoryStore::new());
        store.push_post("Your calm is not an invitation to be tested.", "Protect", 60);
        let h = harness(
            store.clone(),
            &[
                "Your calm is not an invitation to be tested.",
                "Healing starts when you stop replaying the ending.",
            ],
            RecordingPublisher::default(),
        );

        let result = h.orchestrator.create_and_publish().await.unwrap();
        assert_eq!(result.attempts, 2);
        assert_eq!(store.posts().len(), 2);
    }

    // ── publish & persist ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_successful_run_records_full_post() {
        let store = Arc::new(MemoryStore::new());
        let h = harness(
            store.clone(),
            &["\"Effort is the clearest way to say I care.\""],
            RecordingPublisher::default(),
        );

        let result = h.orchestrator.create_and_publish().await.unwrap();
        let post = &result.post;

        assert_eq!(post.quote, "Effort is the clearest way to say I care.");
        assert_eq!(post.opening_word.as_deref(), Some("Effort"));
        assert_eq!(post.publish_id.as_deref(), Some("page_1"));
        assert_eq!(post.quality_score, Some(8.0));
        assert_eq!(post.virality_score, Some(7.0));
        assert_eq!(post.emotion.as_deref(), Some("validation"));
        assert!(ATTRIBUTIONS.contains(&post.attribution.as_str()));
        assert!(post.tone.is_some());
        assert_eq!(
            post.fingerprint,
            crate::uniqueness::fingerprint::fingerprint(&post.quote)
        );

        let published = h.publisher.published.lock().unwrap();
        let (image, caption) = &published[0];
        assert_eq!(image.display().to_string(), post.image_path);
        assert_eq!(
            caption,
            &build_caption(&post.quote, &post.category, DEFAULT_BRAND_NAME)
        );
        assert_eq!(h.llm.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_persist_failure_after_publish_is_not_retried() {
        let store: Arc<dyn Store> = Arc::new(ReadOnlyStore(MemoryStore::new()));
        let h = harness(
            store,
            &[
                "Your peace is worth more than their approval.",
                "Real ones check on you without being asked.",
            ],
            RecordingPublisher::default(),
        );

        let err = h.orchestrator.create_and_publish().await.unwrap_err();

        match err {
            PipelineError::Unrecorded { publish_id, .. } => assert_eq!(publish_id, "page_1"),
            other => panic!("expected Unrecorded, got {other:?}"),
        }
        assert_eq!(h.publisher.published.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_soft_classification() {
        assert!(PipelineError::QualityRejected {
            score: 6.0,
            reason: "generic".to_string()
        }
        .is_soft());
        assert!(PipelineError::NearDuplicate { similarity: 0.9 }.is_soft());
        assert!(!PipelineError::Exhausted { attempts: 5 }.is_soft());
        assert!(!PipelineError::Generation(GenerationError::EmptyDraft).is_soft());
    }

    #[test]
    fn test_generation_rejection_maps_to_soft_failure() {
        let err: PipelineError = GenerationError::Rejected {
            score: 4.0,
            reason: "flat".to_string(),
        }
        .into();
        assert!(matches!(err, PipelineError::QualityRejected { .. }));
    }
}
