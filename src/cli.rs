//! Command-line interface definitions.
//!
//! Two subcommands mirror the two halves of the tool: `collect` builds a
//! snapshot from the configured feeds, `show` ranks and renders one.
//! `sources` prints the dropdown entries accepted by `show --source`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for team_news_feed.
///
/// # Examples
///
/// ```sh
/// # Build items.json from the default Arizona Cardinals feeds
/// team_news_feed collect -o site/items.json
///
/// # Show the newest ESPN items from a published snapshot
/// team_news_feed show -i https://example.github.io/site/items.json -s "ESPN — Cardinals"
///
/// # Re-render a Markdown page every five minutes
/// team_news_feed show -f markdown -o news.md --watch 300
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file (feeds, sources, links)
    #[arg(short, long, global = true, env = "TEAM_FEED_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch all feeds and write a snapshot
    Collect(CollectArgs),

    /// Rank and render a snapshot
    Show(ShowArgs),

    /// List the source filter choices
    Sources,
}

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Where to write the snapshot JSON
    #[arg(short, long, default_value = "items.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Snapshot path or http(s) URL
    #[arg(short, long, env = "TEAM_FEED_ITEMS", default_value = "items.json")]
    pub items: String,

    /// Canonical source label to filter by ("All sources" for no filter)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Reload the snapshot and re-render every N seconds
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}
