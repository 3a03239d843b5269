//! Error taxonomy shared by the turn and agent controllers.

/// Errors surfaced by the assistants.
///
/// Everything except [`Error::MissingCredential`] and [`Error::EmptyInput`]
/// is recovered at the turn boundary and shown as an error entry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API credential in the environment or the config file.
    #[error("missing API credential: set {0} or add `key` to the config file")]
    MissingCredential(&'static str),

    /// The user submitted nothing.
    #[error("input is empty")]
    EmptyInput,

    /// The model call failed (network, auth, rate limit, malformed response).
    #[error("model call failed: {0}")]
    Model(String),

    /// The model asked for a tool that is not registered.
    #[error("tool {0} is not available")]
    UnknownTool(String),

    /// A tool handler failed.
    #[error("tool {name} failed: {reason}")]
    Tool { name: String, reason: String },

    /// The agent loop did not settle within the configured number of steps.
    #[error("agent did not finish within {0} steps")]
    StepLimit(usize),

    /// The memory backend rejected an append.
    #[error("memory update failed: {0}")]
    Memory(String),
}

impl Error {
    /// Wrap a provider error, keeping its full context chain.
    pub fn model(err: anyhow::Error) -> Self {
        Self::Model(format!("{err:#}"))
    }
}

/// Result alias over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
