use anyhow::{Result, bail};
use futures_util::StreamExt;
use std::io::{self, Write};
use tracing::debug;

use super::input::{Input, parse_input};
use super::reader::{LineSource, ReadOutcome};
use super::ui;
use crate::completion::{
    CompletionEvent, CompletionRequest, CompletionService, DEFAULT_INSTRUCTIONS, Usage,
};
use crate::conversation::{Conversation, Message, Role};
use crate::interrupt::InterruptFlag;
use crate::models::Model;
use crate::ui::Spinner;

/// Configuration for a chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The model to chat with.
    pub model: Model,
    /// Instructions sent alongside the history on every request.
    pub instructions: String,
    /// Print token usage after each reply.
    pub stats: bool,
    /// Let the model use the hosted web search tool.
    pub web_search: bool,
}

impl SessionConfig {
    /// Creates a configuration with default instructions and no extras enabled.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            stats: false,
            web_search: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnState {
    AwaitingInput,
    Dispatching,
    Terminated,
}

struct Reply {
    text: String,
    usage: Option<Usage>,
}

/// An interactive chat session.
///
/// Owns the conversation for its whole lifetime. Each turn appends the user's
/// line, sends the entire history to the service, and appends the reply once
/// it has streamed in completely. A failed turn keeps the user's line and
/// returns to the prompt.
///
/// Replies go to `out`; errors from failed turns go to `err`.
pub struct ChatSession<S, W, E = io::Stderr> {
    config: SessionConfig,
    service: S,
    conversation: Conversation,
    out: W,
    err: E,
    interrupt: InterruptFlag,
}

impl<S: CompletionService, W: Write> ChatSession<S, W> {
    /// Creates a session whose conversation is seeded with `seed`.
    ///
    /// Errors go to stderr until [`ChatSession::with_error_output`] is used.
    pub fn new(config: SessionConfig, service: S, seed: Vec<Message>, out: W) -> Self {
        let mut conversation = Conversation::new();
        conversation.initialize(seed);

        Self {
            config,
            service,
            conversation,
            out,
            err: io::stderr(),
            interrupt: InterruptFlag::default(),
        }
    }
}

impl<S: CompletionService, W: Write, E: Write> ChatSession<S, W, E> {
    /// Sends errors from failed turns to `err`.
    pub fn with_error_output<E2: Write>(self, err: E2) -> ChatSession<S, W, E2> {
        ChatSession {
            config: self.config,
            service: self.service,
            conversation: self.conversation,
            out: self.out,
            err,
            interrupt: self.interrupt,
        }
    }

    /// Uses `interrupt` to detect Ctrl+C pressed outside the prompt.
    #[must_use]
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &[Message] {
        self.conversation.history()
    }

    pub const fn output(&self) -> &W {
        &self.out
    }

    pub const fn error_output(&self) -> &E {
        &self.err
    }

    /// Runs the read-dispatch loop until the user leaves or input ends.
    ///
    /// Only terminal I/O failures are returned as errors; failed turns are
    /// reported and the loop continues.
    pub async fn run(&mut self, input: &mut impl LineSource) -> Result<()> {
        ui::print_header(&mut self.out, &self.config)?;

        let mut state = TurnState::AwaitingInput;
        loop {
            state = match state {
                TurnState::AwaitingInput => self.await_input(input).await?,
                TurnState::Dispatching => self.dispatch().await?,
                TurnState::Terminated => break,
            };
        }

        ui::print_goodbye(&mut self.out)?;
        self.out.flush()?;
        Ok(())
    }

    async fn await_input(&mut self, input: &mut impl LineSource) -> Result<TurnState> {
        if self.interrupt.take() {
            debug!("interrupted while busy");
            return Ok(TurnState::Terminated);
        }

        let outcome = tokio::select! {
            biased;
            () = self.interrupt.raised() => {
                debug!("interrupted while waiting for input");
                ReadOutcome::Interrupted
            }
            outcome = input.read_line() => outcome?,
        };

        let line = match outcome {
            ReadOutcome::Line(line) => line,
            ReadOutcome::EndOfInput | ReadOutcome::Interrupted => {
                return Ok(TurnState::Terminated);
            }
        };

        Ok(match parse_input(&line) {
            Input::Exit => TurnState::Terminated,
            Input::Empty => TurnState::AwaitingInput,
            Input::Text(text) => {
                self.conversation.append(Role::User, text);
                TurnState::Dispatching
            }
        })
    }

    async fn dispatch(&mut self) -> Result<TurnState> {
        let request = CompletionRequest {
            model: self.config.model,
            messages: self.conversation.history(),
            instructions: &self.config.instructions,
            web_search: self.config.web_search,
        };

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "dispatching turn"
        );

        match stream_reply(&self.service, &request, &mut self.out).await {
            Ok(reply) => {
                debug!(bytes = reply.text.len(), "turn completed");
                self.conversation.append(Role::Assistant, reply.text);
                if self.config.stats {
                    ui::print_stats(&mut self.out, reply.usage.as_ref())?;
                }
            }
            Err(e) => {
                debug!(error = %e, "turn failed");
                ui::print_error(&mut self.err, &format!("{e:#}"))?;
            }
        }

        self.out.flush()?;
        Ok(TurnState::AwaitingInput)
    }
}

/// Streams one reply to `out`, returning it once the service reports completion.
async fn stream_reply<S: CompletionService>(
    service: &S,
    request: &CompletionRequest<'_>,
    out: &mut impl Write,
) -> Result<Reply> {
    let spinner = Spinner::new("Thinking...");

    let mut stream = service.stream(request).await?;
    let mut text = String::new();
    let mut started = false;

    while let Some(event_result) = stream.next().await {
        let event = match event_result {
            Ok(event) => event,
            Err(e) => {
                if started {
                    writeln!(out)?;
                }
                return Err(e);
            }
        };

        match event {
            CompletionEvent::Delta(chunk) => {
                if !started {
                    spinner.stop();
                    ui::print_separator(out)?;
                    started = true;
                }
                write!(out, "{chunk}")?;
                out.flush()?;
                text.push_str(&chunk);
            }
            CompletionEvent::Completed { usage } => {
                spinner.stop();
                if !started {
                    ui::print_separator(out)?;
                }
                writeln!(out)?;
                return Ok(Reply { text, usage });
            }
        }
    }

    if started {
        writeln!(out)?;
    }
    bail!("Response stream ended before the reply was complete")
}
