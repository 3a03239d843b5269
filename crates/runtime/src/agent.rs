//! The agent tier: a decide, act, observe loop over the tool registry.

use crate::{
    prompt,
    registry::ToolRegistry,
    session::AgentSession,
    settings::Settings,
    turn::{TurnOutcome, type_out},
};
use serde_json::Value;
use std::collections::BTreeMap;
use wcore::{
    Entry, EntryId, Error, InMemory, Memory, Message, Model, Renderer, Result, ThreadId,
};

/// Where the agent is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingInput,
    /// Waiting on the model to pick the next action.
    Thinking,
    /// A tool call has been dispatched.
    ToolInvoking,
    /// A tool result came back and was fed to the model.
    ToolObserving,
    /// Final reply, no further tool calls.
    Responding,
    Done,
    /// Absorbing failure state.
    Errored,
}

/// Result of one agent submission.
#[derive(Debug, Clone)]
pub struct AgentTurn {
    /// Id of the composite entry appended to the transcript.
    pub entry: EntryId,
    /// Phases visited, in order.
    pub phases: Vec<Phase>,
    pub outcome: TurnOutcome,
}

/// Everything one turn produced before it settled.
#[derive(Default)]
struct Progress {
    phases: Vec<Phase>,
    entries: Vec<Entry>,
    /// Model messages new to this turn, committed on success.
    messages: Vec<Message>,
}

/// Runs agent turns and keeps per-thread model history.
pub struct AgentLoop<P: Model> {
    provider: P,
    registry: ToolRegistry,
    settings: Settings,
    checkpoints: BTreeMap<ThreadId, InMemory>,
}

impl<P: Model> AgentLoop<P> {
    /// An agent loop using the built-in weather and restaurant tools.
    pub fn new(provider: P, settings: Settings) -> Self {
        Self::with_registry(provider, ToolRegistry::builtin(), settings)
    }

    pub fn with_registry(provider: P, registry: ToolRegistry, settings: Settings) -> Self {
        Self {
            provider,
            registry,
            settings,
            checkpoints: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Committed model history for a thread, oldest first.
    pub fn history(&self, thread: ThreadId) -> &[Message] {
        self.checkpoints
            .get(&thread)
            .map(InMemory::messages)
            .unwrap_or_default()
    }

    /// Submit one user message.
    ///
    /// The user entry and one composite turn entry are appended to the
    /// session transcript. Sub-entries are rendered as they happen. Turn
    /// failures end in [`Phase::Errored`] with an error sub-entry and leave
    /// the thread history untouched.
    pub async fn submit(
        &mut self,
        session: &mut AgentSession,
        input: &str,
        renderer: &mut impl Renderer,
    ) -> Result<AgentTurn> {
        if input.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let user = Entry::user(input);
        renderer.entry(&user);
        session.transcript_mut().push(user);

        let thread = session.thread();
        let mut progress = Progress {
            phases: vec![Phase::AwaitingInput],
            messages: vec![Message::user(input)],
            ..Default::default()
        };

        let mut result = self.run(thread, &mut progress, renderer).await;
        if result.is_ok() {
            let committed = self
                .checkpoints
                .entry(thread)
                .or_default()
                .append(&progress.messages)
                .await;
            if let Err(e) = committed {
                result = Err(Error::Memory(format!("{e:#}")));
            }
        }

        let outcome = match result {
            Ok(text) => {
                progress.phases.push(Phase::Done);
                TurnOutcome::Replied(text)
            }
            Err(err) => {
                tracing::debug!(%thread, "agent turn failed: {err}");
                progress.phases.push(Phase::Errored);
                let description = err.to_string();
                let entry = Entry::error(description.clone());
                renderer.entry(&entry);
                progress.entries.push(entry);
                TurnOutcome::Failed(description)
            }
        };

        tracing::debug!(%thread, phases = ?progress.phases, "agent turn settled");
        let entry = session.transcript_mut().push(Entry::turn(progress.entries));
        Ok(AgentTurn {
            entry,
            phases: progress.phases,
            outcome,
        })
    }

    /// Loop until the model answers without a tool call.
    async fn run(
        &self,
        thread: ThreadId,
        progress: &mut Progress,
        renderer: &mut impl Renderer,
    ) -> Result<String> {
        let history = self.history(thread);
        let tools = self.registry.tools();

        for step in 0..self.settings.max_steps {
            progress.phases.push(Phase::Thinking);
            let mut messages = history.to_vec();
            messages.extend_from_slice(&progress.messages);
            let request = self.settings.request(prompt::AGENT, messages, tools.clone());
            tracing::debug!(%thread, step, "thinking");
            let response = self.provider.send(&request).await.map_err(Error::model)?;

            let calls = response.tool_calls();
            if calls.is_empty() {
                let text = response
                    .content()
                    .ok_or_else(|| Error::Model("the model returned an empty reply".into()))?;
                progress.phases.push(Phase::Responding);
                type_out(text, self.settings.typing_delay, renderer).await;
                progress.entries.push(Entry::assistant(text));
                progress.messages.push(response.message());
                return Ok(text.to_owned());
            }

            if let Some(text) = response.content() {
                type_out(text, self.settings.typing_delay, renderer).await;
                progress.entries.push(Entry::assistant(text));
            }
            progress.messages.push(response.message());

            for call in calls {
                let name = &call.function.name;
                progress.phases.push(Phase::ToolInvoking);
                let input = serde_json::from_str(&call.function.arguments)
                    .unwrap_or_else(|_| Value::Object(Default::default()));
                let start = Entry::tool_start(name.clone(), input);
                renderer.entry(&start);
                progress.entries.push(start);

                let payload = self.registry.call(name, &call.function.arguments).await?;

                progress.phases.push(Phase::ToolObserving);
                progress
                    .messages
                    .push(Message::tool(payload.to_prompt(), call.id.clone()));
                let end = Entry::tool_end(name.clone(), payload);
                renderer.entry(&end);
                progress.entries.push(end);
            }
        }

        Err(Error::StepLimit(self.settings.max_steps))
    }
}
