//! Terminal renderer.

use console::style;
use serde_json::Value;
use std::io::{Stdout, Write};
use wcore::{Body, Entry, Payload, Renderer};

/// Prints entries to a terminal as they arrive.
pub struct TerminalRenderer<W: Write = Stdout> {
    out: W,
    /// Print user entries too. Off in the REPL, where the line is already
    /// on screen.
    echo_user: bool,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout(echo_user: bool) -> Self {
        Self::new(std::io::stdout(), echo_user)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, echo_user: bool) -> Self {
        Self { out, echo_user }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        writeln!(self.out, "{text}").ok();
        self.out.flush().ok();
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn entry(&mut self, entry: &Entry) {
        match entry.body() {
            Body::User { content } => {
                if self.echo_user {
                    self.line(format_args!("{} {content}", style(">").cyan().bold()));
                }
            }
            Body::Assistant { content } => {
                self.line(format_args!("{} {content}", style("assistant:").green().bold()));
            }
            Body::ToolResult { name, payload } => {
                self.line(style(format!("[{name}]")).dim());
                self.line(payload_text(payload));
            }
            Body::ToolStart { name, input } => {
                self.line(style(format!("-> {name} {input}")).yellow());
            }
            Body::ToolEnd { name, payload } => {
                self.line(style(format!("<- {name}")).yellow());
                self.line(payload_text(payload));
            }
            Body::Error { content } => {
                self.line(style(format!("error: {content}")).red());
            }
            Body::Turn { entries } => {
                for sub in entries {
                    self.entry(sub);
                }
            }
        }
    }

    fn begin_text(&mut self) {
        write!(self.out, "{} ", style("assistant:").green().bold()).ok();
        self.out.flush().ok();
    }

    fn push_char(&mut self, ch: char) {
        write!(self.out, "{ch}").ok();
        self.out.flush().ok();
    }

    fn end_text(&mut self) {
        self.line("");
    }
}

/// Records as a table, anything else as JSON.
pub fn payload_text(payload: &Payload) -> String {
    match payload {
        Payload::Records(records) => table(records).unwrap_or_else(|| payload.to_prompt()),
        Payload::Text(text) => Value::String(text.clone()).to_string(),
    }
}

/// Lay out a list of JSON objects as an aligned table.
///
/// Columns come from the first record. Returns `None` when any record is
/// not an object.
pub fn table(records: &[Value]) -> Option<String> {
    let first = records.first()?.as_object()?;
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let object = record.as_object()?;
        let row: Vec<String> = columns
            .iter()
            .map(|column| match object.get(*column) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .collect();
        rows.push(row);
    }

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .chain([column.chars().count()])
                .max()
                .unwrap_or_default()
        })
        .collect();

    let render = |cells: &[&str]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_owned()
    };

    let mut out = vec![
        render(&columns),
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    ];
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(render(&cells));
    }
    Some(out.join("\n"))
}
