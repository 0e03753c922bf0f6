//! CLI argument definitions using clap.
//!
//! Every connection setting can also come from the environment (or a `.env`
//! file in the working directory).

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use csves::sink::{DEFAULT_INDEX, DEFAULT_URL};

/// csves: load a CSV file into Elasticsearch
#[derive(Parser, Debug)]
#[command(name = "csves")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Elasticsearch URL
    #[arg(long = "es-url", env = "ELASTICSEARCH_URL", default_value = DEFAULT_URL)]
    pub es_url: String,

    /// Elasticsearch index name
    #[arg(long, env = "INDEX_NAME", default_value = DEFAULT_INDEX)]
    pub index: String,

    /// Path to the CSV file
    #[arg(long, env = "CSV_FILE_PATH", value_name = "FILE")]
    pub csv: PathBuf,

    /// Path to the field configuration JSON file
    #[arg(long, env = "FIELD_CONFIG_PATH", value_name = "FILE")]
    pub fields: Option<PathBuf>,

    /// Comma-separated list of fields to include (empty for all fields)
    #[arg(long, value_name = "FIELDS")]
    pub select: Option<String>,

    /// CSV delimiter character (auto-detect if not specified)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Only parse and print documents without connecting to Elasticsearch
    #[arg(long)]
    pub test: bool,

    /// User name for basic auth
    #[arg(long, env = "USER_NAME")]
    pub username: Option<String>,

    /// Password for basic auth
    #[arg(long, env = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// CA certificate (PEM) to trust when connecting over TLS
    #[arg(long, env = "ELASTICSEARCH_CERT_PATH", value_name = "FILE")]
    pub certpath: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
