//! Command-line front end for graphcrawl.
//!
//! Crawls a simulated app described by a JSON model and keeps the graph in
//! a SQLite file, so a session can be interrupted and resumed at will.
//!
//! # Usage
//!
//! ```bash
//! # Explore for 200 iterations
//! graphcrawl explore --model app.json --db crawl.db --steps 200 --seed 7
//!
//! # Run again to continue where the last session stopped
//! graphcrawl explore --model app.json --db crawl.db
//!
//! # Give the app 50ms to settle after each gesture
//! graphcrawl explore --model app.json --db crawl.db --settle-ms 50
//!
//! # Inspect the graph
//! graphcrawl stats --db crawl.db
//! graphcrawl frontier --db crawl.db
//! graphcrawl export --db crawl.db --out crawl.cbor --format cbor
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use graphcrawl::core::Action;
use graphcrawl::device::{AppModel, SimulatedApp};
use graphcrawl::store::{GraphSnapshot, GraphStore, SqliteStore};
use graphcrawl::{Explorer, ExplorerConfig, DEFAULT_MAX_STEPS};

#[derive(Parser)]
#[command(name = "graphcrawl")]
#[command(about = "Resumable graph-based exploration of interactive apps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run exploration sessions against a simulated app.
    Explore(ExploreArgs),

    /// Print state, edge and frontier counts.
    Stats {
        #[arg(short, long)]
        db: PathBuf,

        #[arg(long, value_delimiter = ',')]
        vocabulary: Vec<Action>,
    },

    /// Write a snapshot of the whole graph.
    Export {
        #[arg(short, long)]
        db: PathBuf,

        /// Output file.
        #[arg(short, long)]
        out: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// List states that still have untried gestures.
    Frontier {
        #[arg(short, long)]
        db: PathBuf,

        #[arg(long, value_delimiter = ',')]
        vocabulary: Vec<Action>,
    },
}

#[derive(Args)]
struct ExploreArgs {
    /// JSON app model.
    #[arg(short, long)]
    model: PathBuf,

    /// SQLite graph database (created if missing).
    #[arg(short, long)]
    db: PathBuf,

    /// Loop iterations per session.
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    steps: usize,

    /// Number of sessions to run back to back.
    #[arg(long, default_value_t = 1)]
    sessions: usize,

    /// Random seed for gesture selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated gestures to use (default: all).
    #[arg(long, value_delimiter = ',')]
    vocabulary: Vec<Action>,

    /// Milliseconds the simulated app takes to settle after each gesture.
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Print session reports as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Cbor,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Explore(args) => cmd_explore(args),
        Commands::Stats { db, vocabulary } => cmd_stats(db, vocabulary),
        Commands::Export { db, out, format } => cmd_export(db, out, format),
        Commands::Frontier { db, vocabulary } => cmd_frontier(db, vocabulary),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn vocabulary_or_all(vocabulary: Vec<Action>) -> Vec<Action> {
    if vocabulary.is_empty() {
        Action::ALL.to_vec()
    } else {
        vocabulary
    }
}

fn open_store(db: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db).with_context(|| format!("failed to open graph database {}", db.display()))
}

fn cmd_explore(args: ExploreArgs) -> Result<()> {
    let model = AppModel::load(&args.model)
        .with_context(|| format!("failed to load app model {}", args.model.display()))?;
    let mut app = SimulatedApp::new(model)?;
    if let Some(ms) = args.settle_ms {
        app = app.with_settle_delay(Duration::from_millis(ms));
    }
    let store = open_store(&args.db)?;

    let config = ExplorerConfig {
        vocabulary: vocabulary_or_all(args.vocabulary),
        seed: args.seed,
        max_steps: args.steps,
    };
    let mut explorer = Explorer::new(app, store, config)?;

    for session in 1..=args.sessions {
        let report = explorer.resume_default()?;
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("session {session}");
            println!("{report}");
        }
        if report.drained() {
            break;
        }
    }

    let store = explorer.store();
    println!(
        "graph: {} states, {} edges",
        store.state_count()?,
        store.edge_count()?
    );
    Ok(())
}

fn cmd_stats(db: PathBuf, vocabulary: Vec<Action>) -> Result<()> {
    let store = open_store(&db)?;
    let vocabulary = vocabulary_or_all(vocabulary);

    println!("schema version: {}", store.schema_version()?);
    println!("states:         {}", store.state_count()?);
    println!("edges:          {}", store.edge_count()?);
    println!("frontier:       {}", store.frontier_states(&vocabulary)?.len());
    Ok(())
}

fn cmd_export(db: PathBuf, out: PathBuf, format: Format) -> Result<()> {
    let store = open_store(&db)?;
    let snapshot = GraphSnapshot::capture(&store)?;

    let bytes = match format {
        Format::Json => snapshot.to_json()?.into_bytes(),
        Format::Cbor => snapshot.to_cbor()?,
    };
    fs::write(&out, bytes).with_context(|| format!("failed to write {}", out.display()))?;

    println!(
        "exported {} states and {} edges to {}",
        snapshot.states.len(),
        snapshot.edges.len(),
        out.display()
    );
    Ok(())
}

fn cmd_frontier(db: PathBuf, vocabulary: Vec<Action>) -> Result<()> {
    let store = open_store(&db)?;
    let vocabulary = vocabulary_or_all(vocabulary);

    for state in store.frontier_states(&vocabulary)? {
        let left = store.unperformed_actions(&state, &vocabulary)?;
        let names: Vec<&str> = left.iter().map(|a| a.as_str()).collect();
        println!("{state}\t{}", names.join(","));
    }
    Ok(())
}
