//! jsonl-view
//!
//! Indexes a JSONL file once and serves single lines by number or at random.

use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use jsonl_index::{config::Config, File, Indexable, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "jsonl-view")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse single lines of large JSONL files")]
struct Cli {
    /// JSONL file to browse
    path: PathBuf,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Amount of nesting levels to pretty-print
    #[arg(long)]
    depth: Option<usize>,

    /// Spaces per indentation level
    #[arg(long)]
    indent: Option<usize>,

    /// Print lines as stored instead of rendering them as JSON
    #[arg(long)]
    raw: bool,

    /// Seed for random line selection
    #[arg(long)]
    seed: Option<u64>,

    /// Log progress information
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(depth) = self.depth {
            config.display.depth = depth;
        }
        if let Some(indent) = self.indent {
            config.display.indent = indent;
        }
        if self.raw {
            config.display.raw = true;
        }
        if self.seed.is_some() {
            config.session.seed = self.seed;
        }
        if self.verbose {
            config.logging.level = "info".to_string();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_with_env(cli.config.as_deref())?;
    cli.apply(&mut config);

    // Logs go to stderr so stdout only carries the session
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    println!(
        "Indexing lines in {} (this may take a while for very large files)...",
        cli.path.display()
    );
    let file = File::open(&cli.path)
        .with_context(|| format!("failed to index {}", cli.path.display()))?;
    println!(
        "Done. Found {} lines in {}.\n",
        file.total_lines(),
        cli.path.display()
    );

    let mut session = Session::new(file, &config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)?;

    Ok(())
}
