//! Core abstractions for the tierchat assistants.
//!
//! Holds everything the three assistant tiers share: the model trait and
//! its wire-neutral types, conversation memory, the display transcript, the
//! renderer seam and the typing effect.

pub use {
    error::{Error, Result},
    id::{EntryId, ThreadId},
    memory::{InMemory, Memory},
    model::{
        FinishReason, FunctionCall, Message, Model, Request, Response, Role, Tool, ToolCall,
        Usage,
    },
    render::{Renderer, render_transcript},
    transcript::{Body, Entry, EntryRole, Payload, Transcript},
    typing::typewriter,
};

mod error;
mod id;
mod memory;
pub mod model;
mod render;
mod transcript;
mod typing;

#[cfg(feature = "testing")]
pub mod testing;
