use clap::{Parser, Subcommand};
use paperdrop::analysis::tags::TfIdfScorer;
use paperdrop::{
    DropWatcher, HttpSummarizer, IngestPipeline, PdfExtractor, Settings, Vault, Worker, logging,
};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "paperdrop")]
#[command(about = "Turns a drop folder of PDFs into an annotated note vault")]
#[command(version)]
struct Cli {
    /// Path to a configuration file (defaults to paperdrop.toml discovery)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Watch the drop folder and ingest arriving PDFs
    Watch,

    /// Ingest a single PDF without watching
    ///
    /// Useful for files that were already in the drop folder before the
    /// watcher started, or for reconciling a PDF that was archived without
    /// a note.
    Process {
        /// Path to the PDF to ingest
        file: PathBuf,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // For non-init commands without an explicit config, nudge toward init
    if cli.config.is_none() && !matches!(cli.command, Commands::Init { .. }) {
        if let Err(warning) = Settings::check_init() {
            eprintln!("Warning: {warning}");
            eprintln!("Using default configuration for now.");
        }
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        Settings::default()
    });

    logging::init_with_config(&settings.logging);

    match cli.command {
        Commands::Init { force } => match Settings::init_config_file(force) {
            Ok(path) => {
                println!("Created configuration file at: {}", path.display());
                println!("Edit this file to customize your settings.");
            }
            Err(e) => {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        },

        Commands::Config => match toml::to_string_pretty(&settings) {
            Ok(toml_str) => println!("{toml_str}"),
            Err(e) => {
                eprintln!("Error displaying config: {e}");
                std::process::exit(1);
            }
        },

        Commands::Watch => {
            validate_or_exit(&settings);

            if let Err(e) = std::fs::create_dir_all(&settings.watch.drop_dir) {
                eprintln!(
                    "Cannot create drop folder {}: {e}",
                    settings.watch.drop_dir.display()
                );
                std::process::exit(1);
            }
            if let Err(e) = Vault::new(&settings.vault).ensure_layout() {
                eprintln!("Cannot prepare vault: {e}");
                std::process::exit(1);
            }

            let pipeline = build_pipeline(&settings);

            let (queue_tx, queue_rx) = mpsc::channel(100);
            let watcher = match DropWatcher::new(&settings.watch, queue_tx) {
                Ok(watcher) => watcher,
                Err(e) => {
                    eprintln!("Failed to start watcher: {e}");
                    std::process::exit(1);
                }
            };
            let worker = Worker::new(pipeline, queue_rx);

            tokio::select! {
                res = watcher.watch() => {
                    if let Err(e) = res {
                        eprintln!("Watcher stopped: {e}");
                        std::process::exit(1);
                    }
                }
                _ = worker.run() => {}
                _ = tokio::signal::ctrl_c() => {
                    println!("\nShutting down");
                }
            }
        }

        Commands::Process { file } => {
            validate_or_exit(&settings);

            let pipeline = build_pipeline(&settings);
            match pipeline.ingest(&file).await {
                Ok(report) => {
                    println!("Archived: {}", report.archived.display());
                    println!("Note: {}", report.note.display());
                    if report.degraded {
                        println!("Some sections fell back to placeholders.");
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn validate_or_exit(settings: &Settings) {
    if let Err(e) = settings.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }
}

fn build_pipeline(settings: &Settings) -> IngestPipeline {
    let summarizer = match HttpSummarizer::new(&settings.summarizer) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create summarizer client: {e}");
            std::process::exit(1);
        }
    };

    IngestPipeline::new(
        settings,
        Box::new(PdfExtractor),
        Box::new(summarizer),
        Box::new(TfIdfScorer::new(settings.pipeline.tag_vocabulary)),
    )
}
