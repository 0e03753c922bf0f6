//! Ingest command - map a CSV file onto documents and bulk index them.

use std::io;

use colored::Colorize;
use csves::{
    BatchReporter, DocumentSink, ElasticsearchConfig, ElasticsearchSink, IngestConfig, Ingestor,
    ReportMode, Schema, parse_delimiter, parse_selection,
};
use tracing::info;

use crate::cli::Cli;

/// Build the pipeline configuration from CLI flags.
fn ingest_config(cli: &Cli) -> csves::Result<IngestConfig> {
    let mut config = IngestConfig::new();

    if let Some(delimiter) = cli.delimiter.as_deref() {
        config = config.with_delimiter(parse_delimiter(delimiter)?);
    }

    if let Some(path) = &cli.fields {
        config = config.with_schema(Schema::load(path)?);
    }

    if let Some(select) = cli.select.as_deref() {
        config = config.with_selection(parse_selection(select));
    }

    Ok(config)
}

/// Build the sink configuration from CLI flags.
fn sink_config(cli: &Cli) -> ElasticsearchConfig {
    let mut config = ElasticsearchConfig::new(&cli.es_url, &cli.index);
    if let Some(user) = &cli.username {
        config = config.with_credentials(user, cli.password.clone());
    }
    if let Some(cert) = &cli.certpath {
        config = config.with_ca_cert(cert);
    }
    config
}

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        es_url = %cli.es_url,
        index = %cli.index,
        csv = %cli.csv.display(),
        test_mode = cli.test,
        "Starting ingest"
    );

    let config = ingest_config(&cli)?;
    let result = Ingestor::with_config(config).ingest(&cli.csv)?;

    let reporter = BatchReporter::new(&result.schema);
    let mut stdout = io::stdout().lock();

    if cli.test {
        println!("{}", "Test mode".yellow().bold());
        reporter.write(&result.batch, ReportMode::Full, &mut stdout)?;
        return Ok(());
    }

    let mut sink = ElasticsearchSink::with_config(sink_config(&cli))?;
    sink.prepare()?;

    reporter.write(&result.batch, ReportMode::Sample, &mut stdout)?;

    let total = result.batch.len();
    let outcome = sink.write_batch(result.into_batch())?;

    if outcome.has_failures() {
        let failed = total - outcome.succeeded();
        println!(
            "{} {} of {} documents failed to index",
            "Warning:".red().bold(),
            failed.to_string().white().bold(),
            total
        );
        for item in outcome.failed() {
            println!(
                "  record {}: {}",
                item.position + 1,
                item.error.as_deref().unwrap_or_default()
            );
        }
        return Err("some documents failed to index".into());
    }

    println!(
        "{} {} documents into {}",
        "Indexed".green().bold(),
        outcome.succeeded().to_string().white().bold(),
        cli.index.cyan()
    );
    println!("{}", "All documents indexed successfully".green());

    Ok(())
}
