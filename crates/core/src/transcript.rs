//! Display transcript.
//!
//! The transcript is everything the user saw in a session, including
//! activity the model never reads back (attached payloads, tool progress,
//! errors). Entries are immutable and the transcript is append-only.

use crate::EntryId;
use compact_str::CompactString;
use serde::Serialize;
use serde_json::Value;

/// A static tool payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// A plain string.
    Text(String),
    /// A list of structured records, displayed as a table.
    Records(Vec<Value>),
}

impl Payload {
    /// Text handed to the model: raw for strings, pretty JSON for records.
    pub fn to_prompt(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Records(records) => {
                serde_json::to_string_pretty(records).unwrap_or_else(|_| format!("{records:?}"))
            }
        }
    }
}

/// The role of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRole {
    User,
    Assistant,
    ToolResult,
    ToolInvocationStart,
    ToolInvocationEnd,
    Error,
}

/// What an entry carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Body {
    /// User input.
    User { content: String },
    /// Assistant text.
    Assistant { content: String },
    /// A payload attached to the prompt by the user.
    ToolResult { name: CompactString, payload: Payload },
    /// The agent started a tool call.
    ToolStart { name: CompactString, input: Value },
    /// The agent's tool call returned.
    ToolEnd { name: CompactString, payload: Payload },
    /// A failure shown in place of the assistant reply.
    Error { content: String },
    /// One composite agent turn, sub-entries in the order they happened.
    Turn { entries: Vec<Entry> },
}

/// A transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    id: EntryId,
    #[serde(flatten)]
    body: Body,
}

impl Entry {
    /// Wrap a body with a fresh id.
    pub fn new(body: Body) -> Self {
        Self {
            id: EntryId::new(),
            body,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Body::User {
            content: content.into(),
        })
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Body::Assistant {
            content: content.into(),
        })
    }

    pub fn tool_result(name: impl Into<CompactString>, payload: Payload) -> Self {
        Self::new(Body::ToolResult {
            name: name.into(),
            payload,
        })
    }

    pub fn tool_start(name: impl Into<CompactString>, input: Value) -> Self {
        Self::new(Body::ToolStart {
            name: name.into(),
            input,
        })
    }

    pub fn tool_end(name: impl Into<CompactString>, payload: Payload) -> Self {
        Self::new(Body::ToolEnd {
            name: name.into(),
            payload,
        })
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Body::Error {
            content: content.into(),
        })
    }

    pub fn turn(entries: Vec<Entry>) -> Self {
        Self::new(Body::Turn { entries })
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The role this entry renders as. Composite turns are assistant turns.
    pub fn role(&self) -> EntryRole {
        match self.body {
            Body::User { .. } => EntryRole::User,
            Body::Assistant { .. } | Body::Turn { .. } => EntryRole::Assistant,
            Body::ToolResult { .. } => EntryRole::ToolResult,
            Body::ToolStart { .. } => EntryRole::ToolInvocationStart,
            Body::ToolEnd { .. } => EntryRole::ToolInvocationEnd,
            Body::Error { .. } => EntryRole::Error,
        }
    }

    /// The tool behind a tool entry.
    pub fn name(&self) -> Option<&str> {
        match &self.body {
            Body::ToolResult { name, .. }
            | Body::ToolStart { name, .. }
            | Body::ToolEnd { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// The text of user, assistant and error entries.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            Body::User { content } | Body::Assistant { content } | Body::Error { content } => {
                Some(content.as_str())
            }
            _ => None,
        }
    }

    /// The payload of an attached or observed tool result.
    pub fn payload(&self) -> Option<&Payload> {
        match &self.body {
            Body::ToolResult { payload, .. } | Body::ToolEnd { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Sub-entries of a composite turn; empty for everything else.
    pub fn entries(&self) -> &[Entry] {
        match &self.body {
            Body::Turn { entries } => entries,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, Body::Error { .. })
    }
}

/// An append-only, chronologically ordered list of entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning its id.
    pub fn push(&mut self, entry: Entry) -> EntryId {
        let id = entry.id();
        self.entries.push(entry);
        id
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
