//! Line sources for the chat loop.
//!
//! Both sources do their blocking reads on a dedicated thread, so the
//! session can wait for a line and for Ctrl+C at the same time.

use anyhow::{Context, Result};
use async_trait::async_trait;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, Styled};
use std::io::BufRead;
use std::thread;
use tokio::sync::{mpsc, oneshot};

use crate::ui::is_prompt_cancelled;

/// Result of asking for one line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line, without its terminator.
    Line(String),
    /// No more input will arrive.
    EndOfInput,
    /// The user pressed Ctrl+C (or Escape) at the prompt.
    Interrupted,
}

/// Something the chat loop can read lines from.
#[async_trait]
pub trait LineSource: Send {
    async fn read_line(&mut self) -> Result<ReadOutcome>;
}

/// Interactive prompt for terminals.
pub struct PromptSource {
    render_config: RenderConfig<'static>,
}

impl PromptSource {
    pub fn new() -> Self {
        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        Self { render_config }
    }
}

impl Default for PromptSource {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt(render_config: RenderConfig<'static>) -> Result<ReadOutcome> {
    let input = Text::new("")
        .with_render_config(render_config)
        .with_help_message("Type a message, 'exit' or 'quit' to leave, Ctrl+C to quit")
        .prompt();

    match input {
        Ok(line) => Ok(ReadOutcome::Line(line)),
        Err(e) if is_prompt_cancelled(&e) => {
            println!(); // Clear line before goodbye message
            Ok(ReadOutcome::Interrupted)
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl LineSource for PromptSource {
    async fn read_line(&mut self) -> Result<ReadOutcome> {
        let render_config = self.render_config;
        let (tx, rx) = oneshot::channel();

        // Plain thread: a prompt abandoned on interrupt must not hold up
        // runtime shutdown.
        thread::spawn(move || {
            let _ = tx.send(prompt(render_config));
        });

        rx.await.context("Prompt exited without an answer")?
    }
}

/// Line reader for piped input.
///
/// A background thread reads ahead and hands complete lines over a channel.
pub struct BufReadSource {
    lines: mpsc::Receiver<Result<ReadOutcome>>,
}

impl BufReadSource {
    pub fn new<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel(1);
        thread::spawn(move || forward_lines(reader, &tx));
        Self { lines: rx }
    }
}

fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::Sender<Result<ReadOutcome>>) {
    loop {
        let outcome = read_one(&mut reader);
        let more = matches!(outcome, Ok(ReadOutcome::Line(_)));
        if tx.blocking_send(outcome).is_err() || !more {
            break;
        }
    }
}

fn read_one(reader: &mut impl BufRead) -> Result<ReadOutcome> {
    let mut line = String::new();
    let bytes_read = reader
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    if bytes_read == 0 {
        return Ok(ReadOutcome::EndOfInput);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(ReadOutcome::Line(line))
}

#[async_trait]
impl LineSource for BufReadSource {
    async fn read_line(&mut self) -> Result<ReadOutcome> {
        self.lines
            .recv()
            .await
            .unwrap_or(Ok(ReadOutcome::EndOfInput))
    }
}
