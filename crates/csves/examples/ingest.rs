//! Example: map a CSV file onto documents without touching a search index.
//!
//! Usage:
//!   cargo run --example ingest -- <file_path> [field_config.json]

use std::env;
use std::path::Path;

use csves::{BatchReporter, DocumentSink, IngestConfig, Ingestor, MemorySink, ReportMode, Schema};

fn main() -> csves::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example ingest -- <file_path> [field_config.json]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let mut config = IngestConfig::new();
    if let Some(fields) = args.get(2) {
        config = config.with_schema(Schema::load(fields)?);
    }

    let result = Ingestor::with_config(config).ingest(path)?;

    println!("## Source");
    println!("  File: {}", result.source.file);
    println!("  Format: {}", result.source.format);
    println!("  Delimiter: {}", result.source.delimiter);
    println!("  Skipped rows: {}", result.skipped.len());
    println!();

    println!("## Header mapping");
    for (name, position) in result.header_index.iter() {
        println!("  {:>3}  {}", position, name);
    }
    println!();

    BatchReporter::new(&result.schema)
        .write(&result.batch, ReportMode::Sample, &mut std::io::stdout())
        .map_err(|e| csves::CsvesError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut sink = MemorySink::new();
    sink.prepare()?;
    let outcome = sink.write_batch(result.into_batch())?;
    println!("Stored {} documents in memory", outcome.succeeded());

    Ok(())
}
