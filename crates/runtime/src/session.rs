//! Per-session state, owned by the caller.

use crate::data;
use wcore::{Error, InMemory, Memory, Payload, Result, ThreadId, Transcript};

/// Which chat tier a [`ChatSession`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTier {
    /// Memory only.
    NoTools,
    /// Memory plus payloads the user attaches by hand.
    Context,
}

/// A payload the user can attach to the next prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Weather,
    Restaurants,
}

impl Attachment {
    /// Label used both in the transcript and in the augmented prompt.
    pub fn label(self) -> &'static str {
        match self {
            Self::Weather => "Weather (Seoul)",
            Self::Restaurants => "Restaurants (picnic food)",
        }
    }

    /// Fetch the payload from the mock data provider.
    pub fn fetch(self) -> Result<Payload> {
        match self {
            Self::Weather => Ok(Payload::Text(data::weather())),
            Self::Restaurants => data::restaurant_records()
                .map(Payload::Records)
                .map_err(|e| Error::Tool {
                    name: self.label().to_owned(),
                    reason: e.to_string(),
                }),
        }
    }
}

/// Pending attachments for the next submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    weather: bool,
    restaurants: bool,
}

impl Toggles {
    pub fn set(&mut self, attachment: Attachment, on: bool) {
        match attachment {
            Attachment::Weather => self.weather = on,
            Attachment::Restaurants => self.restaurants = on,
        }
    }

    pub fn is_on(&self, attachment: Attachment) -> bool {
        match attachment {
            Attachment::Weather => self.weather,
            Attachment::Restaurants => self.restaurants,
        }
    }

    /// Active attachments, weather first, and reset both flags.
    pub fn take(&mut self) -> Vec<Attachment> {
        let active = [Attachment::Weather, Attachment::Restaurants]
            .into_iter()
            .filter(|a| self.is_on(*a))
            .collect();
        *self = Self::default();
        active
    }
}

/// State of one no-tools or manual-context conversation.
pub struct ChatSession<M: Memory = InMemory> {
    pub id: ThreadId,
    tier: ChatTier,
    memory: M,
    transcript: Transcript,
    toggles: Toggles,
}

impl ChatSession<InMemory> {
    /// A memory-only session.
    pub fn no_tools() -> Self {
        Self::with_memory(ChatTier::NoTools, InMemory::new())
    }

    /// A session that accepts manual attachments.
    pub fn context() -> Self {
        Self::with_memory(ChatTier::Context, InMemory::new())
    }
}

impl<M: Memory> ChatSession<M> {
    pub fn with_memory(tier: ChatTier, memory: M) -> Self {
        Self {
            id: ThreadId::new(),
            tier,
            memory,
            transcript: Transcript::new(),
            toggles: Toggles::default(),
        }
    }

    pub fn tier(&self) -> ChatTier {
        self.tier
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub(crate) fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn toggles(&self) -> &Toggles {
        &self.toggles
    }

    /// Switch an attachment on or off for the next submission.
    ///
    /// Returns false, without changing anything, on a no-tools session.
    pub fn toggle(&mut self, attachment: Attachment, on: bool) -> bool {
        if self.tier == ChatTier::NoTools {
            return false;
        }
        self.toggles.set(attachment, on);
        true
    }

    pub(crate) fn take_attachments(&mut self) -> Vec<Attachment> {
        self.toggles.take()
    }
}

/// State of one agent conversation.
///
/// Model history lives in the agent loop's checkpoint store, keyed by
/// [`AgentSession::thread`].
#[derive(Debug, Default)]
pub struct AgentSession {
    thread: ThreadId,
    transcript: Transcript,
}

impl AgentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread(&self) -> ThreadId {
        self.thread
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }
}
