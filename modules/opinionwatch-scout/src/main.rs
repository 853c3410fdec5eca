use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use opinionwatch_common::{AppConfig, FileConfig, Sentiment};
use opinionwatch_scout::report::{DashboardReport, ReportOptions, WAITING_NOTICE};
use opinionwatch_scout::traits::{DatasetStore, HubModelLoader};
use opinionwatch_scout::{
    logging, Classifier, Collector, Discoverer, Pipeline, PipelineParams, RunStatus,
};
use opinionwatch_store::SqliteStore;
use sentiment_client::HuggingFace;
use youtube_client::YouTubeClient;

const DEFAULT_CONFIG: &str = "config/opinionwatch.toml";

#[derive(Parser)]
#[command(name = "opinionwatch")]
#[command(about = "Collect YouTube comments on a topic and track their sentiment")]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover, collect, classify and persist once
    Run {
        /// Exit non-zero when the run fails
        #[arg(long)]
        strict: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print analytics over the persisted dataset
    Report {
        /// Only include these categories (repeatable)
        #[arg(long = "sentiment")]
        sentiments: Vec<Sentiment>,

        /// Number of phrases and words to list
        #[arg(long, default_value_t = 15)]
        top: usize,

        /// Sample comments per category
        #[arg(long, default_value_t = 5)]
        samples: usize,

        /// Also list every filtered row
        #[arg(long)]
        rows: bool,

        /// Print the report as JSON (rows included)
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        // An explicit path must exist.
        Some(path) => FileConfig::load(path),
        None => FileConfig::load_or_default(Path::new(DEFAULT_CONFIG)),
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_file_config(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Run { strict, json } => cmd_run(&config, strict, json).await,
        Commands::Report {
            sentiments,
            top,
            samples,
            rows,
            json,
        } => {
            let options = ReportOptions {
                sentiments: (!sentiments.is_empty()).then_some(sentiments),
                top_n: top,
                samples,
            };
            cmd_report(&config, &options, rows, json).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn cmd_run(config: &FileConfig, strict: bool, json: bool) -> Result<ExitCode> {
    info!("opinionwatch run starting");
    let env = AppConfig::from_env()?;

    let mut youtube = YouTubeClient::new(env.youtube_api_key.clone());
    if let Some(base) = &env.youtube_api_base {
        youtube = youtube.with_base_url(base);
    }
    let youtube = Arc::new(youtube);

    let mut hub = HuggingFace::new(env.hf_api_token.clone());
    if let Some(base) = &env.hf_hub_base {
        hub = hub.with_hub_url(base.as_str());
    }
    if let Some(base) = &env.hf_inference_base {
        hub = hub.with_inference_url(base.as_str());
    }

    let store = SqliteStore::open(&config.storage.database_path)
        .await
        .with_context(|| {
            format!(
                "Failed to open database: {}",
                config.storage.database_path.display()
            )
        })?;
    let store = Arc::new(store);

    let search = &config.search;
    let pipeline = Pipeline::new(
        Arc::new(Discoverer::new(
            youtube.clone(),
            search.region_code.as_str(),
            search.relevance_language.as_str(),
        )),
        Arc::new(Collector::new(youtube)),
        Arc::new(Classifier::new(Arc::new(HubModelLoader::new(
            hub,
            config.model.model_id.as_str(),
        )))),
        store,
        PipelineParams {
            query: search.query.clone(),
            max_results: search.max_results,
            period_days: search.period_days,
            target_comments: config.collection.target_comments,
        },
    );

    let report = pipeline.run().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    if strict && report.status() == RunStatus::Failed {
        warn!(run_id = %report.run_id, "Run failed in strict mode");
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

async fn cmd_report(
    config: &FileConfig,
    options: &ReportOptions,
    rows: bool,
    json: bool,
) -> Result<()> {
    let path = &config.storage.database_path;
    // Opening would create the file; a missing database means no run yet.
    if !path.exists() {
        println!("{WAITING_NOTICE}");
        return Ok(());
    }

    let store = SqliteStore::open(path)
        .await
        .with_context(|| format!("Failed to open database: {}", path.display()))?;
    let dataset = DatasetStore::load(&store).await?;
    store.close().await;

    match dataset {
        Some(dataset) => {
            let report = DashboardReport::build(&dataset, options, &mut rand::rng());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
                if rows {
                    println!("{}", report.rows_listing());
                }
            }
        }
        None => println!("{WAITING_NOTICE}"),
    }
    Ok(())
}
