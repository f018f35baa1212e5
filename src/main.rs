//! # jobscout CLI Application
//!
//! Command-line front end for jobscout. With no subcommand it runs the MCP
//! server on stdio; the other subcommands call the same operations directly.
//!
//! ## Commands
//!
//! - `serve`: MCP server on stdin/stdout (default)
//! - `offers`: list offers for a programming language
//! - `probe`: describe the website behind a URL
//! - `save`, `saved`, `delete`: manage saved postings
//!
//! Configuration flags are global and fall back to `JOBSCOUT_*` environment
//! variables.

mod telemetry;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use jobscout::config::{Config, DEFAULT_LIMIT};
use jobscout::offer::{Criteria, ProgrammingLanguage};
use jobscout::service::JobService;
use jobscout::website::DEFAULT_TIMEOUT_SECS;
use std::path::PathBuf;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Scrape programming job offers and keep a list of saved postings", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Database path for saved postings
    #[arg(long, global = true, env = "JOBSCOUT_DATABASE", default_value = "jobscout.db")]
    database: String,

    /// Base URL of the bulldogjob board
    #[arg(long, global = true, env = "JOBSCOUT_BULLDOGJOB_URL", default_value = jobscout::website::BULLDOGJOB_URL)]
    bulldogjob_url: String,

    /// Directory for the server log file
    #[arg(long, global = true, env = "JOBSCOUT_LOG_DIR", default_value = ".jobscout")]
    log_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

impl ConfigArgs {
    fn into_config(self) -> Config {
        Config::builder()
            .database_path(self.database)
            .bulldogjob_url(self.bulldogjob_url)
            .log_dir(self.log_dir)
            .request_timeout_secs(self.timeout)
            .build()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server on stdio
    Serve,

    /// List job offers for a programming language
    Offers(OffersArgs),

    /// Describe the website behind a URL
    Probe(ProbeArgs),

    /// Save a posting
    Save(SaveArgs),

    /// List saved postings
    Saved,

    /// Delete a saved posting
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
struct OffersArgs {
    /// Programming language (e.g. Rust, Python, C++)
    #[arg(required = true)]
    language: ProgrammingLanguage,

    /// Keep only offers mentioning this keyword (repeatable)
    #[arg(short, long)]
    include: Vec<String>,

    /// Drop offers mentioning this keyword (repeatable)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Limit results
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    /// URL to inspect; the job board when omitted
    url: Option<String>,
}

#[derive(Args, Debug)]
struct SaveArgs {
    /// Title of the posting
    #[arg(required = true)]
    name: String,

    /// Link to the posting
    #[arg(required = true)]
    url: String,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    /// Id of the saved posting
    #[arg(required = true)]
    id: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();
    let config = cli.config.into_config();
    let command = cli.command.unwrap_or(Commands::Serve);

    // stdout belongs to the MCP protocol while serving
    if matches!(command, Commands::Serve) {
        telemetry::init_file(&config.log_dir)?;
    } else {
        telemetry::init_console();
    }

    let service = JobService::new(config).await?;

    match command {
        Commands::Serve => jobscout::mcp::run(service).await?,
        Commands::Offers(args) => offers_command(&service, args).await?,
        Commands::Probe(args) => {
            let information = service
                .get_offer_information(args.url.as_deref().unwrap_or_default())
                .await;
            println!("{}", information);
        }
        Commands::Save(args) => {
            let id = service.save_posting(&args.name, &args.url).await?;
            println!("Saved posting {}", id);
        }
        Commands::Saved => saved_command(&service).await?,
        Commands::Delete(args) => {
            if !service.delete_posting(args.id).await? {
                return Err(anyhow!("No saved posting with id {}", args.id));
            }
            println!("Deleted posting {}", args.id);
        }
    }

    Ok(())
}

#[instrument(skip(service))]
async fn offers_command(service: &JobService, args: OffersArgs) -> anyhow::Result<()> {
    let criteria = Criteria::new(args.include, args.exclude);

    match args.format.as_str() {
        "json" => {
            let offers = service
                .fetch_offers(args.language, criteria, Some(args.limit))
                .await?;
            println!("{}", serde_json::to_string_pretty(&offers)?);
        }
        _ => {
            let offers = service
                .get_offers(args.language, criteria, Some(args.limit))
                .await;
            println!("{}", offers);
        }
    }

    Ok(())
}

#[instrument(skip(service))]
async fn saved_command(service: &JobService) -> anyhow::Result<()> {
    let postings = service.list_saved_postings().await?;

    println!("Saved postings: {}", postings.len());
    println!();
    for posting in postings {
        println!("{}. {}", posting.id, posting.name);
        println!("   URL: {}", posting.url);
    }

    Ok(())
}
