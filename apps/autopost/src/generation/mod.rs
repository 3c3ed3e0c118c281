// Quote generation: category selection, the three-step completion protocol,
// scoring parsers, tone rotation, and injectable randomness.
// All completion calls go through llm_client.

pub mod category;
pub mod prompts;
pub mod protocol;
pub mod random;
pub mod scoring;
pub mod tone;
