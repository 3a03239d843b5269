//! Chat command

use crate::{Config, repl::ChatRepl, terminal::TerminalRenderer};
use anyhow::Result;
use clap::{Args, ValueEnum};
use model::Claude;
use reqwest::Client;
use runtime::{
    AgentLoop, AgentSession, Attachment, ChatSession, Settings, TurnController, TurnOutcome,
};
use wcore::{Model, Renderer};

/// Chat command arguments
#[derive(Debug, Args)]
pub struct ChatCmd {
    /// Which assistant to talk to
    #[arg(short, long, value_enum, default_value_t = Tier::Agent)]
    pub tier: Tier,

    /// Override the configured model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Attach the Seoul weather to the message (context tier)
    #[arg(long)]
    pub weather: bool,

    /// Attach the picnic restaurant list to the message (context tier)
    #[arg(long)]
    pub restaurants: bool,

    /// The message to send (if empty, starts interactive mode)
    pub message: Option<String>,
}

/// Available assistant tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tier {
    /// Memory only, no outside information
    NoTools,
    /// Attach weather and restaurant data by hand
    Context,
    /// Let the model call the weather and restaurant tools itself
    Agent,
}

impl ChatCmd {
    /// Run the chat command
    pub async fn run(&self) -> Result<()> {
        let config = Config::load()?;
        let key = config.credential()?;
        let mut settings = config.settings();
        if let Some(model) = &self.model {
            settings.model = model.as_str().into();
        }

        let claude = Claude::anthropic(Client::new(), &key, &settings.model)?;
        let mut assistant = Assistant::new(self.tier, claude, settings);

        if let Some(message) = &self.message {
            for attachment in self.attachments() {
                if !assistant.attach(attachment) {
                    anyhow::bail!(
                        "{} can only be attached with --tier context",
                        attachment.label()
                    );
                }
            }
            let mut renderer = TerminalRenderer::stdout(true);
            assistant.submit(message, &mut renderer).await?;
            return Ok(());
        }

        ChatRepl::new(assistant)?.run().await
    }

    /// Attachments requested on the command line, weather first.
    pub fn attachments(&self) -> Vec<Attachment> {
        [
            (self.weather, Attachment::Weather),
            (self.restaurants, Attachment::Restaurants),
        ]
        .into_iter()
        .filter_map(|(on, attachment)| on.then_some(attachment))
        .collect()
    }
}

/// One of the three assistants with its session.
pub enum Assistant<P: Model> {
    Chat {
        turns: TurnController<P>,
        session: ChatSession,
    },
    Agent {
        agent: AgentLoop<P>,
        session: AgentSession,
    },
}

impl<P: Model> Assistant<P> {
    pub fn new(tier: Tier, provider: P, settings: Settings) -> Self {
        match tier {
            Tier::NoTools => Self::Chat {
                turns: TurnController::new(provider, settings),
                session: ChatSession::no_tools(),
            },
            Tier::Context => Self::Chat {
                turns: TurnController::new(provider, settings),
                session: ChatSession::context(),
            },
            Tier::Agent => Self::Agent {
                agent: AgentLoop::new(provider, settings),
                session: AgentSession::new(),
            },
        }
    }

    /// Submit one message, returning how the turn ended.
    pub async fn submit(
        &mut self,
        input: &str,
        renderer: &mut impl Renderer,
    ) -> wcore::Result<TurnOutcome> {
        match self {
            Self::Chat { turns, session } => turns.submit(session, input, renderer).await,
            Self::Agent { agent, session } => {
                Ok(agent.submit(session, input, renderer).await?.outcome)
            }
        }
    }

    /// Flip an attachment for the next message.
    ///
    /// Returns the new state, or `None` when this assistant takes no
    /// attachments.
    pub fn toggle(&mut self, attachment: Attachment) -> Option<bool> {
        match self {
            Self::Chat { session, .. } => {
                let on = !session.toggles().is_on(attachment);
                session.toggle(attachment, on).then_some(on)
            }
            Self::Agent { .. } => None,
        }
    }

    /// Switch an attachment on for the next message.
    ///
    /// Returns false when this assistant takes no attachments.
    pub fn attach(&mut self, attachment: Attachment) -> bool {
        match self {
            Self::Chat { session, .. } => session.toggle(attachment, true),
            Self::Agent { .. } => false,
        }
    }

    /// Short description for the REPL banner.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Chat { session, .. } => match session.tier() {
                runtime::ChatTier::NoTools => "no-tools chatbot",
                runtime::ChatTier::Context => {
                    "context chatbot (/weather and /restaurants attach data)"
                }
            },
            Self::Agent { .. } => "agent (calls weather-lookup and restaurant-search)",
        }
    }
}
