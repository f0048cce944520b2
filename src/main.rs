//! CLI entry point for the sum-free box search

use clap::Parser;
use sumfree_boxes::io::cli::{Cli, SearchRunner};

fn main() -> sumfree_boxes::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let runner = SearchRunner::new(cli);
    runner.execute()
}
