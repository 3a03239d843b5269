//! tierchat runtime: the three assistant tiers.
//!
//! [`TurnController`] drives the no-tools and manual-context chatbots over a
//! [`ChatSession`]. [`AgentLoop`] drives the tool-using agent over an
//! [`AgentSession`]. Both render through a [`wcore::Renderer`] and both keep
//! turn failures inside the session as error entries.
//!
//! # Example
//!
//! ```rust,ignore
//! use model::Claude;
//! use runtime::{AgentLoop, AgentSession, Settings};
//!
//! let claude = Claude::anthropic(client, &key, "claude-3-5-sonnet-latest")?;
//! let mut agent = AgentLoop::new(claude, Settings::default());
//! let mut session = AgentSession::new();
//! let turn = agent.submit(&mut session, "plan a picnic", &mut renderer).await?;
//! ```

pub use {
    agent::{AgentLoop, AgentTurn, Phase},
    registry::{Handler, RESTAURANT_SEARCH, ToolRegistry, WEATHER_LOOKUP},
    session::{AgentSession, Attachment, ChatSession, ChatTier, Toggles},
    settings::{DEFAULT_MAX_STEPS, DEFAULT_MODEL, Settings},
    turn::{TurnController, TurnOutcome},
};

mod agent;
pub mod data;
pub mod prompt;
mod registry;
mod session;
mod settings;
mod turn;
