mod cache;
mod command;
mod config;
mod context;
mod entity;
mod error;
mod progress;
mod source;
mod utils;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use command::{
    check::CheckArgs, diff::DiffArgs, fmt::FmtArgs, list::ListArgs, search::SearchArgs,
    show::ShowArgs, Command,
};
use config::Config;
use context::Context;

/// Inspect, validate and query rustdoc sidebar indexes (`sidebar-items.js`).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a sidebar index is well formed.
    Check(CheckArgs),
    /// Re-emit a sidebar script in canonical form.
    Fmt(FmtArgs),
    /// List the items of a sidebar index.
    List(ListArgs),
    /// Show the items with an exact name.
    Show(ShowArgs),
    /// Fuzzy search item names.
    Search(SearchArgs),
    /// Compare two generations of a sidebar index.
    Diff(DiffArgs),
}

impl Commands {
    fn as_command(&self) -> &(dyn Command + Send + Sync) {
        match self {
            Commands::Check(args) => args,
            Commands::Fmt(args) => args,
            Commands::List(args) => args,
            Commands::Show(args) => args,
            Commands::Search(args) => args,
            Commands::Diff(args) => args,
        }
    }
}

/// A filter the log configuration asked for but that did not parse.
#[derive(Debug)]
struct RejectedFilter {
    filter: String,
    error: String,
}

/// `--log`/`log` first, then `RUST_LOG`, then `warn`.
fn build_filter(log_filter: Option<&str>) -> (EnvFilter, Option<RejectedFilter>) {
    let mut rejected = None;
    let configured = log_filter.and_then(|f| match EnvFilter::try_new(f) {
        Ok(filter) => Some(filter),
        Err(e) => {
            rejected = Some(RejectedFilter {
                filter: f.to_string(),
                error: e.to_string(),
            });
            None
        }
    });
    let filter = configured
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    (filter, rejected)
}

fn init_telemetry(log_filter: Option<&str>) -> Option<RejectedFilter> {
    let (filter_layer, rejected) = build_filter(log_filter);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    rejected
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match Config::load_from_file() {
        Ok(from_file) => (from_file.extends(cli.config), None),
        Err(e) => (cli.config, Some(e)),
    };
    if let Some(rejected) = init_telemetry(config.log()) {
        warn!(filter = %rejected.filter, error = %rejected.error, "ignoring invalid log filter");
    }
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring unreadable config file");
    }

    let mut context = Context::new(config).await?;
    cli.command.as_command().run(&mut context).await
}
