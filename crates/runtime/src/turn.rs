//! Turn controller for the no-tools and manual-context tiers.

use crate::{
    prompt,
    session::{ChatSession, ChatTier},
    settings::Settings,
};
use futures_util::StreamExt;
use std::time::Duration;
use wcore::{Entry, Error, Memory, Message, Model, Renderer, Result, Transcript};

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The assistant replied with this text.
    Replied(String),
    /// The turn failed; an error entry with this description was shown.
    Failed(String),
}

impl TurnOutcome {
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied(_))
    }
}

/// Drives one exchange per submission: a single model call, with memory.
#[derive(Clone)]
pub struct TurnController<P: Model> {
    provider: P,
    settings: Settings,
}

impl<P: Model> TurnController<P> {
    pub fn new(provider: P, settings: Settings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Submit one user message.
    ///
    /// Fails only on empty input. Model and memory failures are shown as an
    /// error entry and reported through [`TurnOutcome::Failed`], leaving the
    /// memory as it was.
    pub async fn submit<M: Memory>(
        &self,
        session: &mut ChatSession<M>,
        input: &str,
        renderer: &mut impl Renderer,
    ) -> Result<TurnOutcome> {
        if input.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let user = Entry::user(input);
        renderer.entry(&user);
        session.transcript_mut().push(user);

        let mut prompt = input.to_owned();
        for attachment in session.take_attachments() {
            let payload = match attachment.fetch() {
                Ok(payload) => payload,
                Err(err) => return Ok(fail(session.transcript_mut(), err, renderer)),
            };
            prompt.push_str(&format!(
                "\n\n[{}]\n{}",
                attachment.label(),
                payload.to_prompt()
            ));
            let entry = Entry::tool_result(attachment.label(), payload);
            renderer.entry(&entry);
            session.transcript_mut().push(entry);
        }

        let system = match session.tier() {
            ChatTier::NoTools => prompt::NO_TOOLS,
            ChatTier::Context => prompt::CONTEXT,
        };

        let text = match self.exchange(session, system, prompt).await {
            Ok(text) => text,
            Err(err) => return Ok(fail(session.transcript_mut(), err, renderer)),
        };

        type_out(&text, self.settings.typing_delay, renderer).await;
        session.transcript_mut().push(Entry::assistant(text.clone()));
        Ok(TurnOutcome::Replied(text))
    }

    /// Call the model once and commit the exchange to memory.
    async fn exchange<M: Memory>(
        &self,
        session: &mut ChatSession<M>,
        system: &str,
        prompt: String,
    ) -> Result<String> {
        let mut messages = session
            .memory()
            .load()
            .await
            .map_err(|e| Error::Memory(format!("{e:#}")))?;
        messages.push(Message::user(prompt.clone()));

        let request = self.settings.request(system, messages, Vec::new());
        tracing::debug!(
            session = %session.id,
            model = %request.model,
            history = request.messages.len() - 1,
            "sending turn"
        );
        let response = self.provider.send(&request).await.map_err(Error::model)?;
        let text = response
            .content()
            .ok_or_else(|| Error::Model("the model returned an empty reply".into()))?
            .to_owned();

        session
            .memory_mut()
            .append(&[Message::user(prompt), Message::assistant(text.clone(), &[])])
            .await
            .map_err(|e| Error::Memory(format!("{e:#}")))?;
        Ok(text)
    }
}

/// Record and show a failed turn.
fn fail(transcript: &mut Transcript, err: Error, renderer: &mut impl Renderer) -> TurnOutcome {
    tracing::debug!("turn failed: {err}");
    let description = err.to_string();
    let entry = Entry::error(description.clone());
    renderer.entry(&entry);
    transcript.push(entry);
    TurnOutcome::Failed(description)
}

/// Feed `text` to the renderer through the typing effect.
pub(crate) async fn type_out(text: &str, delay: Duration, renderer: &mut impl Renderer) {
    renderer.begin_text();
    let mut chars = std::pin::pin!(wcore::typewriter(text, delay));
    while let Some(ch) = chars.next().await {
        renderer.push_char(ch);
    }
    renderer.end_text();
}
