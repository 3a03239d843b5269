//! Model and pacing settings shared by both controllers.

use compact_str::CompactString;
use std::time::Duration;
use wcore::{Message, Request, Tool};

/// Default model name.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// Default number of model calls the agent may make in one turn.
pub const DEFAULT_MAX_STEPS: usize = 8;

/// Settings for a controller.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model: CompactString,
    pub temperature: f32,
    pub max_tokens: usize,
    /// Pause between typed characters.
    pub typing_delay: Duration,
    /// Upper bound on thinking steps per agent turn.
    pub max_steps: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: 0.7,
            max_tokens: 4096,
            typing_delay: Duration::from_millis(10),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl Settings {
    /// Settings with no typing delay.
    pub fn instant() -> Self {
        Self {
            typing_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Build a request carrying these settings.
    pub fn request(&self, system: &str, messages: Vec<Message>, tools: Vec<Tool>) -> Request {
        Request::new(self.model.clone())
            .with_system(system)
            .with_messages(messages)
            .with_tools(tools)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}
