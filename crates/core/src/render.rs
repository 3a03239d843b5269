//! Renderer seam between the controllers and whatever displays a session.

use crate::{Body, Entry, Transcript};

/// Consumes entries in append order.
///
/// Static entries arrive through [`Renderer::entry`]. Typed text arrives as
/// `begin_text`, one `push_char` per character, then `end_text`.
pub trait Renderer {
    /// Display a complete entry without the typing effect.
    fn entry(&mut self, entry: &Entry);

    /// A typed text run is about to start.
    fn begin_text(&mut self) {}

    /// Append one character of typed text.
    fn push_char(&mut self, ch: char);

    /// The typed text run is complete.
    fn end_text(&mut self) {}
}

/// Replay a stored transcript statically.
///
/// Composite turns are flattened so the renderer sees their sub-entries in
/// order; stored assistant text is shown whole.
pub fn render_transcript(transcript: &Transcript, renderer: &mut impl Renderer) {
    for entry in transcript {
        replay(entry, renderer);
    }
}

fn replay(entry: &Entry, renderer: &mut impl Renderer) {
    match entry.body() {
        Body::Turn { entries } => {
            for sub in entries {
                replay(sub, renderer);
            }
        }
        _ => renderer.entry(entry),
    }
}
