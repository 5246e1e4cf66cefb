use anyhow::Result;
use clap::Parser;

use hlpr::cli::Args;
use hlpr::cli::commands::chat;
use hlpr::models::print_models;
use hlpr::output::{self, OutputConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    hlpr::logging::init(args.verbose);

    if args.list_models {
        print_models();
        return Ok(());
    }

    let options = chat::ChatOptions {
        model: args.model,
        files: args.files,
        stats: args.stats,
        web: args.web,
        endpoint: args.endpoint,
    };
    chat::run_chat(options).await
}
