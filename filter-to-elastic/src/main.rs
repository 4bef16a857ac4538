use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use filter_to_elastic::{Capabilities, EncoderConfig, FilterToElastic};
use ogc_filter::FeatureSchema;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "filter-to-elastic", version)]
#[command(about = "Translate ECQL filters into Elasticsearch queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an ECQL filter against a feature schema
    Encode {
        /// Schema file (YAML, or JSON with a .json extension)
        #[arg(long)]
        schema: PathBuf,

        /// Encoder configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// View parameter as key=value (q, f, a, native-only), repeatable
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// ECQL filter text
        cql: String,
    },
    /// Print which filter kinds translate without post filtering
    Capabilities,
}

fn parse_params(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| anyhow!("View parameter must be key=value, got: {}", pair))
        })
        .collect()
}

fn encode(
    schema_path: &Path,
    config_path: Option<&Path>,
    params: &[String],
    cql: &str,
) -> Result<()> {
    let schema = FeatureSchema::load(schema_path)
        .with_context(|| format!("Failed to load schema: {}", schema_path.display()))?;
    let config = match config_path {
        Some(path) => EncoderConfig::load(path)?,
        None => EncoderConfig::default(),
    };
    let filter = ogc_filter::cql::parse(cql).with_context(|| format!("Failed to parse: {}", cql))?;
    tracing::info!("Encoding filter against schema {}", schema.name);

    let mut encoder = FilterToElastic::new(&schema).with_config(config);
    encoder.encode(&filter).context("Failed to encode filter")?;
    encoder
        .add_view_params(&parse_params(params)?)
        .context("Failed to apply view parameters")?;
    println!("{}", serde_json::to_string_pretty(&encoder.to_json())?);
    Ok(())
}

fn print_capabilities() {
    for (kind, supported) in Capabilities::default().report() {
        let mark = if supported { "yes" } else { "no" };
        println!("{:<32} {}", kind.as_ref(), mark);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Encode {
            schema,
            config,
            params,
            cql,
        } => encode(&schema, config.as_deref(), &params, &cql),
        Commands::Capabilities => {
            print_capabilities();
            Ok(())
        }
    }
}
