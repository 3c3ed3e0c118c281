//! Tone rotation — the registers a draft may be written in.
//!
//! The orchestrator picks one tone per attempt so consecutive posts do not all
//! read as the same kind of advice. The picked label is stored on the post.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Advice,
    Observation,
    Encouragement,
    Warning,
    Realization,
    Reflection,
    Confidence,
    Humor,
    ToughLove,
}

impl Tone {
    pub const ALL: [Tone; 9] = [
        Tone::Advice,
        Tone::Observation,
        Tone::Encouragement,
        Tone::Warning,
        Tone::Realization,
        Tone::Reflection,
        Tone::Confidence,
        Tone::Humor,
        Tone::ToughLove,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Advice => "Advice",
            Tone::Observation => "Observation",
            Tone::Encouragement => "Encouragement",
            Tone::Warning => "Warning",
            Tone::Realization => "Realization",
            Tone::Reflection => "Reflection",
            Tone::Confidence => "Confidence",
            Tone::Humor => "Humor",
            Tone::ToughLove => "Tough Love",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tone::Advice => "Direct guidance",
            Tone::Observation => "Stating a truth",
            Tone::Encouragement => "Uplifting support",
            Tone::Warning => "Cautionary insight",
            Tone::Realization => "Moment of clarity",
            Tone::Reflection => "Thoughtful insight",
            Tone::Confidence => "Self-assured statement",
            Tone::Humor => "Light but real",
            Tone::ToughLove => "Hard truth",
        }
    }

    pub fn example(&self) -> &'static str {
        match self {
            Tone::Advice => "Protect your peace even if it disappoints others.",
            Tone::Observation => "People show their true colors when they think they don't need you.",
            Tone::Encouragement => "You bring more value than you think.",
            Tone::Warning => "Love shouldn't cost your self-respect.",
            Tone::Realization => "The moment you stop chasing, you start attracting.",
            Tone::Reflection => "Silence speaks when words can't heal.",
            Tone::Confidence => "Your energy is too valuable to waste on doubt.",
            Tone::Humor => "Funny how they remember you when they need something.",
            Tone::ToughLove => "If they wanted to, they would.",
        }
    }

    /// One bullet line for the rotation list in the draft prompt.
    pub fn prompt_line(&self) -> String {
        format!(
            "- **{}**: {} (\"{}\")",
            self.label(),
            self.description(),
            self.example()
        )
    }
}

/// Renders the tone-rotation block of the draft prompt. With a chosen tone the
/// model is told to use it; without one it picks a tone itself.
pub fn tone_guidance(chosen: Option<Tone>) -> String {
    let rotation = Tone::ALL
        .iter()
        .map(Tone::prompt_line)
        .collect::<Vec<_>>()
        .join("\n");

    match chosen {
        Some(tone) => format!(
            "Tone Rotation (use {} for this quote):\n{}",
            tone.label().to_uppercase(),
            rotation
        ),
        None => format!("Tone Rotation (pick ONE for this quote):\n{rotation}"),
    }
}
