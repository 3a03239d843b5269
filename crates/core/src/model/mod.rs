//! Provider-neutral model interface.
//!
//! Provides the shared types used by every provider and controller:
//! `Message`, `Request`, `Response`, `Tool`, and the `Model` trait.

use anyhow::Result;
use compact_str::CompactString;
pub use message::{Message, Role};
pub use request::Request;
pub use response::{FinishReason, Response, Usage};
pub use tool::{FunctionCall, Tool, ToolCall};

mod message;
mod request;
mod response;
mod tool;

/// A hosted language model.
///
/// One request in, one completion out. Implementations make a single
/// attempt; retrying is the caller's business and the controllers never do.
///
/// Constructors are inherent methods on each provider, never called
/// polymorphically.
pub trait Model: Clone + Send + Sync {
    /// Send a chat completion request.
    fn send(&self, request: &Request) -> impl Future<Output = Result<Response>> + Send;

    /// Get the active model name.
    fn active_model(&self) -> CompactString;
}
