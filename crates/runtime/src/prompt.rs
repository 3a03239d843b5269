//! System prompts, one per tier.

/// Memory-only chatbot.
pub const NO_TOOLS: &str = include_str!("../prompts/no_tools.md");

/// Chatbot reading manually attached context.
pub const CONTEXT: &str = include_str!("../prompts/context.md");

/// Tool-using agent.
pub const AGENT: &str = include_str!("../prompts/agent.md");
