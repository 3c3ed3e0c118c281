// All prompt templates for the three generation steps.
// Placeholders in `{braces}` are filled by `protocol.rs` before sending.

/// Draft step. Fill `{category}`, `{keywords}`, `{banned_openings}`,
/// `{tone_guidance}`, `{voice}`, `{min_words}`, `{max_words}`.
pub const DRAFT_PROMPT_TEMPLATE: &str = r#"You are generating short, modern, highly relatable social media quotes for Facebook and Instagram audiences.

Goal:
Produce quotes that feel emotional, simple, and easy to understand, written in modern everyday language.

The quote must encourage engagement (shares, comments, tagging friends or partners).

Structural Diversity Rules:
- **DO NOT start with these overused words**: {banned_openings}
- **Use different sentence structures** each time
- **Vary your opening** - be creative with how you begin the quote

Content Rules:
- **MUST describe real-life situations** people experience in relationships or life.
- **Avoid abstract motivation.** Focus on specific emotional moments.
- Use simple modern English.
- No philosophical or ancient wording.
- No parables or poetic metaphors.
- Avoid complex vocabulary.
- Maximum {max_words} words.
- Minimum {min_words} words.
- Sound like real relationship or life advice people say today.
- Avoid clichés or generic motivation.
- Avoid repeating common quote phrases.
- Output only the quote text.

{tone_guidance}

Context:
Quote category: {category}
Category keywords: {keywords}
{voice}
But written in modern language.

Tone:
Direct, emotional, relatable, social-media friendly.

Return only one quote."#;

/// Quality step. Fill `{quote}`.
pub const QUALITY_PROMPT_TEMPLATE: &str = r#"Evaluate the quote for social media engagement potential.

Quote:
"{quote}"

Score the quote from 1 to 10 based on:

1. Emotional relatability
2. Simplicity of language
3. Modern conversational tone
4. Shareability
5. Likelihood people tag someone

Return JSON:
{
  "score": number,
  "reason": "short explanation",
  "approved": true/false
}

Approve only if score >= 7."#;

/// Virality step. Fill `{quote}`.
pub const VIRALITY_PROMPT_TEMPLATE: &str = r#"Estimate the virality potential of this quote for Facebook audiences.

Quote:
"{quote}"

Score from 1–10 considering:
- Emotional impact
- Share likelihood
- Relatable situations
- Tagging potential
- Simplicity

Return JSON:
{
  "virality_score": number,
  "emotion": "main emotion triggered",
  "likely_audience_reaction": "brief explanation"
}"#;

/// Voice line when no persona hint is supplied.
pub const DEFAULT_VOICE: &str = "Write in a modern, authentic voice.";
