//! Chat request type.

use crate::model::{Message, Tool};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A chat completion request.
///
/// Contains everything needed to make a model call: system prompt, history
/// plus the new input, tool metadata and sampling settings. Providers
/// convert this to their wire format.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Request {
    /// The model to use.
    pub model: CompactString,

    /// The system instruction.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub system: String,

    /// The conversation messages, oldest first.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// The tools the model may call.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum tokens to generate.
    pub max_tokens: usize,
}

impl Request {
    /// Create a new request for the given model.
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    /// Set the messages for this request.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the tools for this request.
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the generation budget.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-latest".into(),
            system: String::new(),
            messages: Vec::new(),
            tools: Vec::new(),
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}
