use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Turn a profile's timeline page into an Atom feed on stdout.
#[derive(Debug, Parser)]
#[command(name = "timeline2atom", version)]
pub struct Cli {
    /// Profile handle, without the '@'
    #[arg(value_parser = parse_handle)]
    pub handle: String,

    /// RON configuration file
    #[arg(long, short, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the network, e.g. https://twitter.com
    #[arg(long, value_name = "URL")]
    pub site: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Read the profile page from disk instead of downloading it
    #[arg(long, value_name = "PATH")]
    pub html_file: Option<PathBuf>,

    /// Indent the XML output
    #[arg(long)]
    pub pretty: bool,

    /// More log output on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// No log output at all
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

// People paste handles with the sigil; accept that.
fn parse_handle(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);
    if handle.is_empty() {
        return Err("profile handle must not be empty".to_string());
    }
    Ok(handle.to_string())
}
