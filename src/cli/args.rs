use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hlpr")]
#[command(about = "Interactive chat REPL for OpenAI models")]
#[command(version)]
pub struct Args {
    /// Model to use for chat (see --list-models)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// List available models
    #[arg(short = 'l', long)]
    pub list_models: bool,

    /// Include file contents in the conversation (repeatable)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Show token usage statistics after each reply
    #[arg(short = 's', long)]
    pub stats: bool,

    /// Enable web search
    #[arg(short = 'w', long)]
    pub web: bool,

    /// API base URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Print debug diagnostics to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Suppress status messages and the spinner
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
