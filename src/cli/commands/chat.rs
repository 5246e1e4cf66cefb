use anyhow::Result;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;

use crate::chat::{BufReadSource, ChatSession, PromptSource, SessionConfig};
use crate::completion::ResponsesClient;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::context::load_context;
use crate::interrupt::InterruptFlag;
use crate::ui::Style;

pub struct ChatOptions {
    pub model: Option<String>,
    pub files: Vec<PathBuf>,
    pub stats: bool,
    pub web: bool,
    pub endpoint: Option<String>,
}

/// Resolves configuration, loads context files and runs the chat loop.
///
/// Every error returned from here happens before the loop starts; once the
/// session is running, failed turns are reported without ending it.
pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let resolved = load_resolved_config(&options)?;

    debug!(
        model = %resolved.model,
        endpoint = %resolved.endpoint,
        stats = resolved.stats,
        web_search = resolved.web_search,
        "resolved configuration"
    );

    let seed = load_context(options.files.as_slice())?;
    if !seed.is_empty() {
        crate::status!(
            "{} Loaded {} context file(s)",
            Style::success("✓"),
            seed.len()
        );
    }

    let interrupt = InterruptFlag::install()?;
    let client = ResponsesClient::new(resolved.endpoint.clone(), resolved.api_key.clone());
    let mut session = ChatSession::new(session_config(&resolved), client, seed, io::stdout())
        .with_interrupt(interrupt);

    if io::stdin().is_terminal() {
        session.run(&mut PromptSource::new()).await
    } else {
        session
            .run(&mut BufReadSource::new(io::BufReader::new(io::stdin())))
            .await
    }
}

fn load_resolved_config(options: &ChatOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;

    let resolve_options = ResolveOptions {
        model: options.model.clone(),
        endpoint: options.endpoint.clone(),
        stats: options.stats,
        web: options.web,
    };

    resolve_config(&resolve_options, &file_config)
}

fn session_config(resolved: &ResolvedConfig) -> SessionConfig {
    SessionConfig {
        model: resolved.model,
        instructions: resolved.instructions.clone(),
        stats: resolved.stats,
        web_search: resolved.web_search,
    }
}
