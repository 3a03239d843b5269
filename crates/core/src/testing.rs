//! Test doubles: a scripted model and a recording renderer.

use crate::{Entry, Model, Renderer, Request, Response};
use anyhow::Result;
use compact_str::CompactString;
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

/// A model that replays canned responses in order.
///
/// Every request it receives is kept for inspection. Running past the end
/// of the script is an error, like a provider refusing the call.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    script: Arc<Mutex<VecDeque<std::result::Result<Response, String>>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn reply(self, response: Response) -> Self {
        self.script.lock().push_back(Ok(response));
        self
    }

    /// Queue a failure with the given message.
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.script.lock().push_back(Err(reason.into()));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl Model for ScriptedModel {
    async fn send(&self, request: &Request) -> Result<Response> {
        self.requests.lock().push(request.clone());
        match self.script.lock().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(anyhow::anyhow!(reason)),
            None => Err(anyhow::anyhow!("script exhausted")),
        }
    }

    fn active_model(&self) -> CompactString {
        CompactString::from("scripted")
    }
}

/// Something the [`Recorder`] saw.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// A static entry.
    Entry(Entry),
    /// One typed text run, fully assembled.
    Text(String),
}

/// A renderer that records everything it is given.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Rendered>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All typed text runs, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Rendered::Text(text) => Some(text.as_str()),
                Rendered::Entry(_) => None,
            })
            .collect()
    }

    /// All static entries, in order.
    pub fn entries(&self) -> Vec<&Entry> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Rendered::Entry(entry) => Some(entry),
                Rendered::Text(_) => None,
            })
            .collect()
    }
}

impl Renderer for Recorder {
    fn entry(&mut self, entry: &Entry) {
        self.events.push(Rendered::Entry(entry.clone()));
    }

    fn begin_text(&mut self) {
        self.events.push(Rendered::Text(String::new()));
    }

    fn push_char(&mut self, ch: char) {
        match self.events.last_mut() {
            Some(Rendered::Text(text)) => text.push(ch),
            _ => self.events.push(Rendered::Text(ch.to_string())),
        }
    }
}
