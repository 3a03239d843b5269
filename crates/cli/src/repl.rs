//! Interactive chat REPL with persistent history.

use crate::{chat::Assistant, terminal::TerminalRenderer};
use anyhow::Result;
use console::style;
use runtime::Attachment;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use wcore::Model;

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Nothing to do.
    Empty,
    Quit,
    Help,
    Toggle(Attachment),
    /// An unrecognised slash command.
    Unknown(&'a str),
    Message(&'a str),
}

impl<'a> Line<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Empty,
            "/quit" | "/exit" => Self::Quit,
            "/help" => Self::Help,
            "/weather" => Self::Toggle(Attachment::Weather),
            "/restaurants" => Self::Toggle(Attachment::Restaurants),
            cmd if cmd.starts_with('/') => Self::Unknown(cmd),
            message => Self::Message(message),
        }
    }
}

/// Interactive chat REPL over one assistant.
pub struct ChatRepl<P: Model> {
    assistant: Assistant<P>,
    editor: rustyline::DefaultEditor,
    history_path: Option<PathBuf>,
}

impl<P: Model> ChatRepl<P> {
    pub fn new(assistant: Assistant<P>) -> Result<Self> {
        let mut editor = rustyline::DefaultEditor::new()?;
        let history_path = history_file_path();
        if let Some(ref path) = history_path {
            let _ = editor.load_history(path);
        }
        Ok(Self {
            assistant,
            editor,
            history_path,
        })
    }

    /// Run the interactive REPL loop.
    pub async fn run(&mut self) -> Result<()> {
        println!(
            "tierchat {} (Ctrl+D or /quit to exit, /help for commands)",
            style(self.assistant.describe()).bold()
        );
        println!("---");

        let mut renderer = TerminalRenderer::stdout(false);
        loop {
            let line = match self.editor.readline("> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };

            match Line::parse(&line) {
                Line::Empty => continue,
                Line::Quit => break,
                Line::Help => help(),
                Line::Toggle(attachment) => match self.assistant.toggle(attachment) {
                    Some(true) => println!("{} attached to the next message", attachment.label()),
                    Some(false) => println!("{} detached", attachment.label()),
                    None => println!("this assistant takes no attachments"),
                },
                Line::Unknown(cmd) => println!("unknown command {cmd}, try /help"),
                Line::Message(message) => {
                    let _ = self.editor.add_history_entry(message);
                    self.assistant.submit(message, &mut renderer).await?;
                }
            }
        }

        self.save_history();
        Ok(())
    }

    /// Save readline history to disk.
    fn save_history(&mut self) {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = self.editor.save_history(path);
        }
    }
}

fn help() {
    println!("/weather      toggle the Seoul weather for the next message");
    println!("/restaurants  toggle the picnic restaurant list for the next message");
    println!("/quit         leave");
}

/// Resolve the history file path at `~/.config/tierchat/history`.
fn history_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tierchat").join("history"))
}
