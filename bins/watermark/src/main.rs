//! watermark: command-line client for the watermark service
//!
//! Drops a photo and a watermark image, sends both to `POST <api>/watermark`
//! and saves the result as `watermarked.png`.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use watermark_core::config::Config;
use watermark_core::error::exit_codes;
use watermark_telemetry::TelemetryConfig;

mod commands;

use commands::{check, inspect, preview, route, run};

/// Command-line client for the watermark service
#[derive(Parser)]
#[command(name = "watermark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .watermark.toml or the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the watermark backend
    #[arg(long, global = true, env = "WATERMARK_API_URL")]
    api_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// One JSON document on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Watermark a photo and save the result
    ///
    /// HEIC/HEIF inputs are converted to JPEG before upload, which needs a
    /// build with the `heif` feature; other builds reject them.
    Run {
        /// Photo to drop (more than one is rejected like a multi-file drop)
        #[arg(short, long = "photo", required = true, num_args = 1..)]
        photos: Vec<PathBuf>,

        /// Watermark image to drop
        #[arg(short, long = "watermark", required = true, num_args = 1..)]
        watermarks: Vec<PathBuf>,

        /// Directory to save into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the saved file
        #[arg(long)]
        filename: Option<String>,
    },

    /// Check both files against the server's upload rules without sending them
    Check {
        /// Photo file
        #[arg(short, long)]
        photo: PathBuf,

        /// Watermark file
        #[arg(short, long)]
        watermark: PathBuf,
    },

    /// Take in one file and print its data-URL preview
    ///
    /// HEIC/HEIF files need a build with the `heif` feature.
    Preview {
        /// File to preview
        file: PathBuf,
    },

    /// Show detected format and dimensions of an image
    Inspect {
        /// File to inspect
        file: PathBuf,
    },

    /// Resolve a route path and show its view
    Route {
        /// Path such as /error-422
        path: String,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Run { .. } => "run",
            Self::Check { .. } => "check",
            Self::Preview { .. } => "preview",
            Self::Inspect { .. } => "inspect",
            Self::Route { .. } => "route",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            commands::report_error(&e, cli.format);
            return exit(e.exit_code());
        }
    };

    let mut telemetry = TelemetryConfig::from(&config.schema.logging);
    if cli.verbose {
        telemetry = telemetry.verbose();
    }
    let _guard = match watermark_telemetry::init_with_config(&telemetry) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
            None
        }
    };

    let ctx = commands::Context {
        config,
        api_url: cli.api_url,
        format: cli.format,
    };

    tracing::debug!(command = cli.command.name(), format = ?ctx.format, "Dispatching command");

    let result = match cli.command {
        Commands::Run {
            photos,
            watermarks,
            output,
            filename,
        } => run::run(&ctx, photos, watermarks, output, filename).await,
        Commands::Check { photo, watermark } => check::run(&ctx, &photo, &watermark).await,
        Commands::Preview { file } => preview::run(&ctx, &file).await,
        Commands::Inspect { file } => inspect::run(&ctx, &file).await,
        Commands::Route { path } => route::run(&ctx, &path),
    };

    let Err(e) = result else {
        return ExitCode::SUCCESS;
    };

    if let Some(reported) = e.downcast_ref::<commands::Reported>() {
        return exit(reported.0.exit_code());
    }

    match e.downcast_ref::<watermark_core::Error>() {
        Some(coded) => {
            commands::report_error(coded, ctx.format);
            exit(coded.exit_code())
        }
        None => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit(exit_codes::FAILURE)
        }
    }
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
