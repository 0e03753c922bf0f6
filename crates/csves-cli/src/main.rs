//! csves CLI - load a CSV file into Elasticsearch.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::Cli;

fn main() {
    // A missing .env file is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = commands::ingest::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
