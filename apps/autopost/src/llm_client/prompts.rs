// Shared prompt constants for every completion call.
// Step-specific prompts live in generation/prompts.rs.

/// System message sent with every completion request.
pub const WRITER_SYSTEM: &str = "You are a social media expert writer.";
