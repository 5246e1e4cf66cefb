//! Chat mode UI components.

use std::io::{self, Write};

use super::session::SessionConfig;
use crate::completion::Usage;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const SEPARATOR: &str = "------------------------------------------------";

pub fn print_header(out: &mut impl Write, config: &SessionConfig) -> io::Result<()> {
    writeln!(
        out,
        "{} {} - {} {}",
        Style::header("hlpr"),
        Style::version(format!("v{VERSION}")),
        Style::label("model"),
        Style::value(config.model)
    )?;
    writeln!(
        out,
        "{}",
        Style::hint("Type 'exit' or 'quit' to leave, Ctrl+C or Ctrl+D to quit")
    )?;
    writeln!(out)
}

pub fn print_separator(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", Style::secondary(SEPARATOR))
}

pub fn print_stats(out: &mut impl Write, usage: Option<&Usage>) -> io::Result<()> {
    writeln!(out, "{}", Style::secondary(format_stats(usage)))
}

pub fn print_goodbye(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", Style::success("Goodbye!"))
}

pub fn print_error(err: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(err, "{} {message}", Style::error("Error:"))?;
    writeln!(err)?;
    err.flush()
}

fn format_stats(usage: Option<&Usage>) -> String {
    usage.map_or_else(
        || "stats: unavailable for this turn".to_string(),
        |usage| {
            format!(
                "stats: input_tokens={} output_tokens={} cached_tokens={} total_tokens={}",
                usage.input_tokens,
                usage.output_tokens,
                usage.cached_tokens.unwrap_or(0),
                usage.total_tokens
            )
        },
    )
}
