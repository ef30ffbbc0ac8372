//! `sungbat` command line: ingest documents, chat, ask one question, or
//! check the environment.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sungbat::app::{self, EnvironmentReport};
use sungbat::logging;
use sungbat::session::ChatSession;
use sungbat_core::config::AppConfig;
use tokio::io::BufReader;
use tracing::{error, info, warn};

/// Bilingual Ilocano/English chatbot for the Philippine Constitution
#[derive(Parser, Debug)]
#[command(name = "sungbat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (TOML)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        env = "SUNGBAT_CONFIG",
        global = true
    )]
    config: Option<PathBuf>,

    /// Folder holding the PDF, TXT and DOCX sources
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Directory of the persisted vector index
    #[arg(long = "index-dir", value_name = "DIR", global = true)]
    index_dir: Option<PathBuf>,

    /// Chunks retrieved per question
    #[arg(long = "top-k", value_name = "N", global = true)]
    top_k: Option<usize>,

    /// Chat model (overrides config file and SUNGBAT_MODEL)
    #[arg(long = "model", value_name = "NAME", global = true)]
    model: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the vector index from the data folder
    Ingest,

    /// Start an interactive chat
    Chat {
        /// Print the source files after every answer
        #[arg(long = "show-sources")]
        show_sources: bool,
    },

    /// Ask a single question and print the answer
    Ask {
        /// Question in Ilocano or English
        question: String,

        /// Print the source files after the answer
        #[arg(long = "show-sources")]
        show_sources: bool,
    },

    /// Run preflight checks for configuration and data
    Check {
        /// Create missing data and index folders first
        #[arg(long = "init")]
        init: bool,
    },
}

impl Cli {
    /// Apply command line overrides on top of file and environment values.
    fn apply_to_config(&self, config: &mut AppConfig) {
        if let Some(data_dir) = &self.data_dir {
            config.data_folder.clone_from(data_dir);
        }
        if let Some(index_dir) = &self.index_dir {
            config.vectorstore_path.clone_from(index_dir);
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        if let Some(model) = &self.model {
            config.llm.model.clone_from(model);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("⚠️  Could not read .env: {e}");
        }
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("Error loading configuration")?;
    cli.apply_to_config(&mut config);

    match logging::setup_logging(&config.log_dir) {
        Ok(path) => info!("Logging to {}", path.display()),
        Err(e) => eprintln!("⚠️  File logging disabled: {e:#}"),
    }

    match cli.command {
        Commands::Ingest => ingest(&config).await,
        Commands::Chat { show_sources } => chat(&config, show_sources).await,
        Commands::Ask {
            question,
            show_sources,
        } => ask(&config, &question, show_sources).await,
        Commands::Check { init } => check(&config, init).await,
    }
}

async fn ingest(config: &AppConfig) -> anyhow::Result<ExitCode> {
    println!(
        "📂 Processing documents in '{}'...",
        config.data_folder.display()
    );
    let outcome = app::ingest(config).await.context("Ingestion failed")?;
    let report = &outcome.report;

    println!("📄 Found {} supported file(s)", outcome.files_found);
    println!("✅ Loaded {} document(s)", report.documents_loaded);
    println!(
        "✂️  Created {} chunk(s) in {:.1?}",
        report.chunks_indexed, report.duration
    );
    if let Some(path) = &report.index_path {
        println!("💾 Vector store saved to '{}'", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

async fn chat(config: &AppConfig, show_sources: bool) -> anyhow::Result<ExitCode> {
    let pipeline = app::shared_pipeline(config)
        .await
        .context("Error initializing RAG system")?;
    if !pipeline.has_index() {
        warn!("Starting chat without a vector index");
        println!("⚠️  No vector index loaded. Run `sungbat ingest` first.\n");
    }

    let mut session = ChatSession::new(pipeline).with_sources(show_sources);
    session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(ExitCode::SUCCESS)
}

async fn ask(config: &AppConfig, question: &str, show_sources: bool) -> anyhow::Result<ExitCode> {
    let pipeline = app::shared_pipeline(config)
        .await
        .context("Error initializing RAG system")?;
    let mut session = ChatSession::new(pipeline).with_sources(show_sources);
    println!("{}", session.send(question).await);
    Ok(ExitCode::SUCCESS)
}

async fn check(config: &AppConfig, init: bool) -> anyhow::Result<ExitCode> {
    println!("🏛️ Ilocano Constitution Chatbot");
    println!("{}", "=".repeat(40));

    if init {
        config
            .ensure_directories()
            .context("Error creating directories")?;
        println!(
            "📁 Ensured '{}' and '{}' exist",
            config.data_folder.display(),
            config.vectorstore_path.display()
        );
    }

    let report = app::check_environment(config).await;
    print_environment(config, &report);

    if report.is_ready() {
        println!("✅ All requirements met!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("\nPlease fix these issues before running the chatbot.");
        Ok(ExitCode::FAILURE)
    }
}

fn print_environment(config: &AppConfig, report: &EnvironmentReport) {
    if let Some(folder) = &report.folder {
        println!(
            "📂 '{}': {} file(s)",
            config.data_folder.display(),
            folder.total_files
        );
        for (extension, count) in &folder.file_types {
            let extension = if extension.is_empty() {
                "(none)"
            } else {
                extension.as_str()
            };
            println!("   {extension}: {count}");
        }
    }
    println!(
        "🗄️  Vector index: {}",
        if report.index_present {
            "present"
        } else {
            "missing"
        }
    );

    if !report.issues.is_empty() {
        println!("Issues found:");
        for issue in &report.issues {
            println!("  {issue}");
        }
    }
}
