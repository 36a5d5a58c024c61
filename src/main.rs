use anyhow::Context;
use clap::{Parser, Subcommand};
use condy_core::{candidate::load_candidates, config::Config, match_set, Candidate, SubstringMatcher};
use condy_tui::theme::Theme;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "condy", about = "Condy — driver selector and gate access requests")]
struct Cli {
    /// Write debug logs to /tmp/condy-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// JSON array of candidate records. Defaults to the built-in demo drivers.
    #[arg(long, global = true, value_name = "FILE")]
    candidates: Option<PathBuf>,

    /// Minimum query length before matching starts (overrides config).
    #[arg(long, global = true, value_name = "N")]
    min_len: Option<usize>,

    /// Colour theme: default or gruvbox_dark (overrides config).
    #[arg(long)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the match set for a query as JSON lines, without the TUI.
    Match {
        /// The query to match.
        #[arg(long, short)]
        query: String,

        /// Primary display field (overrides config).
        #[arg(long)]
        primary: Option<String>,

        /// Secondary display field (overrides config; empty disables it).
        #[arg(long)]
        secondary: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/condy-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("condy debug log started — tail -f /tmp/condy-debug.log");
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to default config");
        Config::defaults()
    });
    if let Some(n) = cli.min_len {
        config.selector.min_query_len = n;
    }
    if let Some(theme) = &cli.theme {
        config.ui.theme = theme.clone();
    }

    let candidates = read_candidates(cli.candidates.as_deref())?;

    match cli.command {
        Some(Command::Match {
            query,
            primary,
            secondary,
        }) => {
            if let Some(primary) = primary {
                config.selector.primary_field = primary;
            }
            if let Some(secondary) = secondary {
                config.selector.secondary_field = secondary;
            }
            print_matches(&config, &candidates, &query)
        }
        None => {
            let theme = Theme::by_name(&config.ui.theme);
            condy_tui::run(config, candidates, theme)
        }
    }
}

fn read_candidates(path: Option<&Path>) -> anyhow::Result<Vec<Candidate>> {
    match path {
        Some(path) => load_candidates(path)
            .with_context(|| format!("failed to load candidates from {}", path.display())),
        None => Ok(condy_tui::demo_drivers()),
    }
}

/// Headless matching: one JSON object per line, in match order.
fn print_matches(config: &Config, candidates: &[Candidate], query: &str) -> anyhow::Result<()> {
    let options = config.selector.to_options();
    let matcher = SubstringMatcher::new(options.primary_field, options.secondary_field);
    let matches = match_set(candidates, query, options.min_query_len, &matcher);
    tracing::debug!(query, matches = matches.len(), "headless match");

    let mut out = std::io::stdout().lock();
    for candidate in &matches {
        writeln!(out, "{}", serde_json::to_string(candidate)?)?;
    }
    Ok(())
}
