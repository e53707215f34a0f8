use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use uxlens::{Analyzer, NoText, OcrsExtractor, ServerConfig, TextExtractor};

#[derive(Parser)]
#[command(name = "uxlens")]
#[command(about = "Score the UX quality of UI screenshots")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single screenshot and print the JSON report
    Analyze {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Include detected buttons and text elements in the report
        #[arg(long)]
        details: bool,

        /// Skip OCR (buttons are then found from contours only)
        #[arg(long)]
        skip_ocr: bool,

        /// Directory holding text-detection.rten and text-recognition.rten
        #[arg(long, value_name = "DIR")]
        ocr_models: Option<PathBuf>,
    },
    /// Run the HTTP API
    Serve {
        /// Bind host (overrides UXLENS_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides UXLENS_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Skip OCR for every request
        #[arg(long)]
        skip_ocr: bool,

        /// Directory holding the OCR models (overrides UXLENS_OCR_MODEL_DIR)
        #[arg(long, value_name = "DIR")]
        ocr_models: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "uxlens=debug" } else { "uxlens=info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{default_level},tower_http=info")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_extractor(skip_ocr: bool, model_dir: Option<PathBuf>) -> Box<dyn TextExtractor> {
    if skip_ocr {
        Box::new(NoText)
    } else {
        Box::new(OcrsExtractor::new(model_dir))
    }
}

fn analyze(image_path: PathBuf, details: bool, extractor: Box<dyn TextExtractor>) -> anyhow::Result<()> {
    tracing::debug!("Loading image: {:?}", image_path);
    let bytes = std::fs::read(&image_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", image_path.display(), e))?;

    let analyzer = Analyzer::new(extractor);
    let analysis = analyzer.analyze_bytes(&bytes)?;

    let filename = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut report = analysis.report(&filename);
    if details {
        report = report.with_details(&analysis);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose)?;

    match args.command {
        Command::Analyze {
            image_path,
            details,
            skip_ocr,
            ocr_models,
        } => {
            let extractor = build_extractor(skip_ocr, ocr_models);
            tokio::task::spawn_blocking(move || analyze(image_path, details, extractor)).await?
        }
        Command::Serve {
            host,
            port,
            skip_ocr,
            ocr_models,
        } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if ocr_models.is_some() {
                config.ocr_model_dir = ocr_models;
            }
            config.validate()?;

            let extractor = build_extractor(skip_ocr, config.ocr_model_dir.clone());
            uxlens::server::serve(config, Analyzer::new(extractor)).await
        }
    }
}
