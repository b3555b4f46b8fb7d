//! Interactive shell over an in-memory saplingdb tree.
//!
//! Reads commands from stdin, prints results to stdout. Logs go to stderr,
//! filtered by `RUST_LOG` (default `saplingdb=info`).

use std::io;
use std::process;

use clap::Parser;
use saplingdb::cli::Session;
use saplingdb::{BTree, BTreeConfig, DEFAULT_MIN_CHILDREN};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "saplingdb-cli", version, about = "Interactive shell over an in-memory B-tree")]
struct Args {
    /// Minimum children per internal node; nodes hold at most 2 * N - 1 items.
    #[arg(long, default_value_t = DEFAULT_MIN_CHILDREN)]
    min_children: usize,

    /// Seed for the keys generated by `rand`.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saplingdb=info,saplingdb_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> saplingdb::Result<()> {
    let tree = BTree::with_config(BTreeConfig::new(args.min_children)?);
    let stdout = io::stdout().lock();

    let mut session = match args.seed {
        Some(seed) => Session::with_seed(tree, stdout, seed),
        None => Session::new(tree, stdout),
    };
    session.run(io::stdin().lock())
}
