use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_aggregator::{build_services, start_web_server, AppConfig};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

#[derive(Parser)]
#[command(name = "jobhub")]
#[command(about = "Aggregated job search across several job-listing APIs")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file with `local` and `production` sections
    #[arg(long, global = true, default_value = "config.yaml", env = "JOBHUB_CONFIG")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one search and print the listings as JSON
    Search { query: Vec<String> },
    /// Expand a job description snippet
    Expand { snippet: Vec<String> },
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("job_aggregator=info,jobhub=info,rocket::server=off"));

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false)
                .boxed()
        }
        None if cli.log_json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        None => fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = AppConfig::load(&cli.config)?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let (aggregator, expander) = build_services(&config)?;
            start_web_server(&config.server, aggregator, expander).await
        }
        Command::Search { query } => {
            let (aggregator, _) = build_services(&config)?;
            let query = query.join(" ");
            let listings = aggregator
                .search(&query)
                .await
                .with_context(|| format!("Search for '{}' failed", query))?;

            info!("Printing {} listings", listings.len());
            println!("{}", serde_json::to_string_pretty(&listings)?);
            Ok(())
        }
        Command::Expand { snippet } => {
            let (_, expander) = build_services(&config)?;
            let text = expander.expand(&snippet.join(" ")).await?;
            println!("{}", text);
            Ok(())
        }
    }
}
