//! Model providers.

pub use claude::{API_KEY_ENV, Claude, ENDPOINT, Request};

mod claude;
