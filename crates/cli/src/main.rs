//! felix CLI
//!
//! Extracts gene/disease associations from a PubMed Central article and writes
//! them, enriched with HGNC and MyGene.info metadata, as a TSV report.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use felix_core::{write_report_file, Email, PmcId};
use felix_services::{MissingDataPolicy, Pipeline, ServiceConfig};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// felix - gene/disease associations from PMC articles
#[derive(Parser, Debug)]
#[command(name = "felix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PubMed Central article identifier (e.g. PMC1312717); also accepted as -pid
    #[arg(long = "pmc_id", short = 'p', value_name = "PMC_ID")]
    pmc_id: String,

    /// Contact e-mail sent to NCBI with the request
    #[arg(short, long)]
    email: String,

    /// Output TSV path ("-" for stdout)
    #[arg(short, long)]
    output: PathBuf,

    /// Tag diseases from this term list instead of the NER service
    #[arg(long, value_name = "PATH")]
    lexicon: Option<PathBuf>,

    /// Fail when a gene has no HGNC or MyGene.info data instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    let args = expand_legacy_flags(std::env::args_os());
    if args.len() <= 1 {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }
    let cli = Cli::parse_from(args);

    // Setup logging; stdout is reserved for `-o -`
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Reject bad input before any client exists
    let pmc_id = PmcId::parse(&cli.pmc_id)?;
    let email = Email::parse(&cli.email)?;

    let mut config = ServiceConfig::from_env().context("Invalid service configuration")?;
    if let Some(path) = &cli.lexicon {
        config = config.with_lexicon(path);
    }

    let policy = if cli.strict {
        MissingDataPolicy::Fail
    } else {
        MissingDataPolicy::Skip
    };

    let pipeline = Pipeline::from_config(&config).await?.with_policy(policy);
    let output = pipeline
        .run(&pmc_id, &email)
        .await
        .with_context(|| format!("Failed to process {}", pmc_id))?;

    for skipped in &output.skipped {
        warn!("No report rows for {}", skipped);
    }

    write_report_file(&cli.output, &output.rows)
        .with_context(|| format!("Failed to write report to {}", cli.output.display()))?;

    info!(
        "Wrote {} rows for {} genes to {}",
        output.rows.len(),
        output.unique_genes(),
        cli.output.display()
    );
    Ok(())
}

/// Rewrite `-pid` / `-pid=<id>` to `--pmc_id`. Clap would otherwise read
/// `-pid` as `-p id`.
fn expand_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-pid") => OsString::from("--pmc_id"),
            Some(s) if s.starts_with("-pid=") => OsString::from(format!("--pmc_id={}", &s[5..])),
            _ => arg,
        })
        .collect()
}
