//! Simulated typing.

use futures_core::Stream;
use std::time::Duration;

/// Yield `text` one character at a time, pausing `delay` between characters.
///
/// The stream is finite and cannot be rewound, but each call starts again
/// from the first character. The delay is cosmetic and a zero delay skips
/// the timer entirely.
pub fn typewriter(text: &str, delay: Duration) -> impl Stream<Item = char> + '_ {
    async_stream::stream! {
        for (idx, ch) in text.chars().enumerate() {
            if idx > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            yield ch;
        }
    }
}
