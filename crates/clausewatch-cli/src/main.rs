use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use clausewatch_ai::{DEFAULT_MODEL, GeminiConfig, GeminiModel, ToxicClauseDetector};
use clausewatch_core::DetectionResult;
use clausewatch_statute::{RegistryClient, RegistryConfig, extract_articles};
use clausewatch_store::CorpusKind;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

mod corpus;
mod display;

#[derive(Parser, Debug)]
#[command(
    name = "clausewatch",
    version,
    about = "Flag toxic clauses in Korean employment contracts"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "MOLEG_API_KEY",
        hide_env_values = true,
        help = "National Law Information Center (law.go.kr) OC key"
    )]
    law_api_key: Option<String>,
    #[arg(
        long,
        global = true,
        env = "GEMINI_API_KEY",
        hide_env_values = true,
        help = "Gemini API key"
    )]
    gemini_api_key: Option<String>,
    #[arg(long, global = true, env = "CLAUSEWATCH_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
    #[arg(
        long,
        global = true,
        env = "CLAUSEWATCH_DATA_DIR",
        default_value = "data",
        help = "Directory holding the law and precedent corpus files"
    )]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the law and precedent corpora from the statute registry.
    Build {
        #[arg(long, help = "Rebuild corpora that already exist")]
        force: bool,
    },
    /// Resolve a statute and print its extracted articles.
    Articles { law: String },
    /// Score contract clauses and suggest fixes for toxic ones.
    Detect {
        clauses: Vec<String>,
        #[arg(long, help = "Read clauses from a file, separated by blank lines")]
        file: Option<PathBuf>,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
        #[arg(long, help = "Skip remediation suggestions")]
        no_suggest: bool,
    },
}

#[derive(Serialize)]
struct DetectReport {
    #[serde(flatten)]
    result: DetectionResult,
    suggestion: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("clausewatch v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Build { force } => run_build(&cli, *force).await,
        Commands::Articles { law } => run_articles(&cli, law).await,
        Commands::Detect {
            clauses,
            file,
            json,
            no_suggest,
        } => {
            let clauses = collect_clauses(clauses, file.as_deref())?;
            run_detect(&cli, &clauses, *json, *no_suggest).await
        }
    }
}

fn registry_client(cli: &Cli) -> anyhow::Result<RegistryClient> {
    let key = cli.law_api_key.clone().unwrap_or_default();
    RegistryClient::new(RegistryConfig::new(key))
        .context("creating registry client (set --law-api-key or MOLEG_API_KEY)")
}

async fn run_build(cli: &Cli, force: bool) -> anyhow::Result<()> {
    let client = registry_client(cli)?;
    corpus::build_all(&client, &cli.data_dir, force).await?;
    Ok(())
}

async fn run_articles(cli: &Cli, law: &str) -> anyhow::Result<()> {
    let client = registry_client(cli)?;
    let identity = client.resolve_law(law).await;
    if !identity.is_resolved() {
        bail!("no statute found for {law:?}");
    }
    let document = client
        .fetch_law_document(identity.resolved_id.as_deref())
        .await;
    let articles = extract_articles(document.as_ref());
    display::print_articles(&identity, &articles);
    Ok(())
}

async fn run_detect(
    cli: &Cli,
    clauses: &[String],
    json: bool,
    no_suggest: bool,
) -> anyhow::Result<()> {
    if clauses.is_empty() {
        bail!("no clauses given; pass them as arguments or with --file");
    }

    let missing = corpus::missing(&cli.data_dir);
    if !missing.is_empty() {
        let client = registry_client(cli)?;
        for kind in missing {
            corpus::build(&client, &cli.data_dir, kind).await?;
        }
    }
    let laws = corpus::open(&cli.data_dir, CorpusKind::Law)?;
    let precedents = corpus::open(&cli.data_dir, CorpusKind::Precedent)?;
    if !json {
        eprintln!(
            "Corpora: {} law passages (built {}), {} precedent passages (built {})",
            laws.len(),
            laws.built_at(),
            precedents.len(),
            precedents.built_at()
        );
    }

    let config = GeminiConfig::new(cli.gemini_api_key.clone().unwrap_or_default())
        .with_model(cli.model.clone());
    let model = GeminiModel::new(config)
        .context("creating Gemini client (set --gemini-api-key or GEMINI_API_KEY)")?;
    let detector = ToxicClauseDetector::new(Arc::new(model), Arc::new(laws), Arc::new(precedents));

    let mut reports = Vec::with_capacity(clauses.len());
    for (i, clause) in clauses.iter().enumerate() {
        let result = detector
            .detect(clause)
            .await
            .with_context(|| format!("analysing clause {}", i + 1))?;
        let suggestion = if result.is_toxic && !no_suggest {
            Some(
                detector
                    .suggest(&result)
                    .await
                    .with_context(|| format!("suggesting a fix for clause {}", i + 1))?,
            )
        } else {
            None
        };

        if !json {
            display::print_result_card(i, clauses.len(), &result, suggestion.as_deref());
        }
        reports.push(DetectReport { result, suggestion });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        let toxic = reports.iter().filter(|r| r.result.is_toxic).count();
        println!("{toxic} of {} clauses flagged as toxic", reports.len());
    }
    Ok(())
}

/// Clauses from the command line followed by those in `file`.
fn collect_clauses(args: &[String], file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut clauses: Vec<String> = args
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        clauses.extend(split_clauses(&text));
    }
    Ok(clauses)
}

/// Blank-line separated blocks, each trimmed.
fn split_clauses(text: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                clauses.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        clauses.push(current.join("\n"));
    }
    clauses
}
