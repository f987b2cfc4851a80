//! webattr command line
//!
//! Fetches each address and prints one templated line per address.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use webattr::batch::{BatchDriver, BatchOptions};
use webattr::fetch::FetchConfig;
use webattr::input::read_addresses;
use webattr::template::DEFAULT_TEMPLATE;

/// Extract the title, canonical link, or any tag attribute from web pages
#[derive(Parser, Debug)]
#[command(name = "webattr")]
#[command(author = "ReasonKit Team <team@reasonkit.sh>")]
#[command(version)]
#[command(about = "Extract one attribute per HTML page into templated output lines")]
struct Args {
    /// Addresses to fetch
    urls: Vec<String>,

    /// Read addresses from a file, one per line ("-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// canonical, title, or abstract(tag, predicate, property)
    #[arg(short, long, default_value = "title")]
    attrib: String,

    /// Output template ($Value, $Uri, $Index, $Count, $Percent)
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    format: String,

    /// Show a progress bar on stderr
    #[arg(short, long)]
    progress: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit one JSON record per address instead of templated lines
    #[arg(long)]
    json: bool,

    /// Request timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// User agent sent with each request
    #[arg(long)]
    user_agent: Option<String>,

    /// Maximum redirects to follow
    #[arg(long, default_value = "10")]
    max_redirects: usize,

    /// Accept invalid TLS certificates
    #[arg(long)]
    insecure: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut uris = args.urls.clone();
    if let Some(path) = &args.input {
        let listed = read_addresses(path)
            .with_context(|| format!("Failed to read addresses from {}", path.display()))?;
        uris.extend(listed);
    }

    let options = BatchOptions::new()
        .template(&args.format)?
        .show_progress(args.progress);

    let mut config = FetchConfig::builder()
        .timeout_ms(args.timeout_ms)
        .max_redirects(args.max_redirects)
        .accept_invalid_certs(args.insecure);
    if let Some(ua) = &args.user_agent {
        config = config.user_agent(ua);
    }

    let driver = BatchDriver::http(config.build())?;
    let report = driver.run_report(&uris, &args.attrib, &options).await?;

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut out = BufWriter::new(sink);

    for record in &report.records {
        if args.json {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        } else {
            writeln!(out, "{}", record.line)?;
        }
    }
    out.flush()?;

    tracing::info!(
        "Processed {} addresses ({} unavailable)",
        report.summary.total,
        report.summary.unavailable()
    );
    Ok(())
}
