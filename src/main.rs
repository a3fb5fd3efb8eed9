//! # Team News Feed
//!
//! Collects a sports team's news from a fixed set of RSS/Atom feeds into a
//! static snapshot (`items.json`), and renders that snapshot as a newest-first
//! list of cards, optionally filtered by source.
//!
//! ## Usage
//!
//! ```sh
//! team_news_feed collect -o site/items.json
//! team_news_feed show -i site/items.json -s "Cards Wire"
//! ```
//!
//! ## Architecture
//!
//! 1. **Collect**: fetch feeds, keep relevant entries, dedupe, cap, write JSON
//! 2. **Load**: read a snapshot from disk or a URL (failures give an empty one)
//! 3. **Rank**: normalize sources, resolve dates, filter, sort, cap
//! 4. **Render**: text, Markdown or JSON cards with a "last updated" stamp

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collector;
mod config;
mod dates;
mod error;
mod loader;
mod models;
mod outputs;
mod ranker;
mod sources;
mod utils;

use chrono::Local;
use cli::{Cli, Command, OutputFormat, ShowArgs};
use config::{Config, load_config};
use loader::{Location, SnapshotStore, load_or_empty};
use outputs::{Page, json, markdown, text};
use ranker::FeedRanker;
use sources::SourceFilter;
use utils::write_output;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = load_config(args.config.as_deref()).await?;
    let client = Client::builder().user_agent(&config.user_agent).build()?;

    match args.command {
        Command::Collect(collect_args) => {
            let document = collector::collect(&client, &config).await;
            collector::write_document(&document, &collect_args.output).await?;
            info!(
                items = document.items.len(),
                sources = document.sources.len(),
                path = %collect_args.output.display(),
                "Snapshot written"
            );
        }
        Command::Show(show_args) => show(&client, &config, &show_args).await?,
        Command::Sources => {
            for entry in config.sources.dropdown() {
                println!("{entry}");
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

/// Load, rank and render; with `--watch`, keep reloading on an interval.
#[instrument(level = "info", skip_all, fields(items = %args.items))]
async fn show(client: &Client, config: &Config, args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let location = Location::parse(&args.items)?;
    let filter = SourceFilter::from_pick(args.source.as_deref());
    if let SourceFilter::Label(label) = &filter {
        if !config.sources.is_known(label) {
            warn!(%label, "Source is not in the catalog; the view will likely be empty");
        }
    }

    let ranker = FeedRanker::new(config.sources.clone(), Local);
    let mut store = SnapshotStore::default();

    loop {
        store.replace(load_or_empty(client, &location).await);
        let snapshot = store.current();

        let feed = ranker.rank(&snapshot.records, &filter);
        let links = if snapshot.links.is_empty() {
            config.links.as_slice()
        } else {
            snapshot.links.as_slice()
        };
        let page = Page {
            team: snapshot.team.as_deref().or(Some(config.team.as_str())),
            filter: &filter,
            feed: &feed,
            links,
        };

        let rendered = match args.format {
            OutputFormat::Text => text::render_text(&page, &Local),
            OutputFormat::Markdown => markdown::render_markdown(&page, &Local),
            OutputFormat::Json => json::render_json(&page)?,
        };

        match &args.output {
            Some(path) => write_output(path, &rendered).await?,
            None => print!("{rendered}"),
        }
        info!(shown = feed.len(), total = snapshot.records.len(), "Rendered feed");

        let Some(secs) = args.watch else {
            return Ok(());
        };
        tokio::time::sleep(Duration::from_secs(secs.max(1))).await;
    }
}
