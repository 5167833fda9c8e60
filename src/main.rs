// SPDX-License-Identifier: PMPL-1.0-or-later
//! AccessCheck CLI - heuristic web page accessibility analyzer

use accesscheck::config::{self, Config};
use accesscheck::fetch::{validate_url, Fetcher};
use accesscheck::report::{render_text, save_report, OutputFormat};
use accesscheck::{analyze_with, AccessCheckError, Report};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Heuristic accessibility checks for a web page
#[derive(Parser)]
#[command(name = "accesscheck")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page and run all checks
    Check {
        /// Page URL (prompted for when omitted)
        url: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run all checks on a local HTML file
    File {
        /// HTML file to analyze
        path: PathBuf,

        /// URL recorded in the report (defaults to the file path)
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write a default configuration file
    Init {
        /// Destination (defaults to accesscheck.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Formats to save (json, markdown, text); overrides the config
    #[arg(long = "format", short = 'f')]
    formats: Vec<OutputFormat>,

    /// Directory reports are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the report without saving it
    #[arg(long)]
    no_save: bool,

    /// Annotate findings with source line numbers
    #[arg(long)]
    track_lines: bool,

    /// Exit with status 1 when any check fails
    #[arg(long)]
    strict: bool,
}

impl OutputArgs {
    fn apply(&self, config: &mut Config) {
        if !self.formats.is_empty() {
            config.report.formats = self.formats.clone();
        }
        if let Some(ref dir) = self.output_dir {
            config.report.output_dir = dir.clone();
        }
        if self.no_save {
            config.report.save = false;
        }
        if self.track_lines {
            config.analysis.track_lines = true;
        }
    }
}

fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("accesscheck=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("accesscheck={}", level)))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<AccessCheckError>() {
                Some(err) if err.is_fetch_error() => eprintln!("{}", err),
                _ => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut config = config::load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    init_logging(cli.verbose, &config.log.level);

    match cli.command {
        Commands::Check { url, output } => {
            output.apply(&mut config);
            let url = match url {
                Some(u) => u,
                None => prompt_url()?,
            };
            validate_url(&url)?;
            let url = url.trim().to_string();

            let fetcher = Fetcher::new(&config.fetch)?;
            let markup = fetcher.fetch_html(&url).await?;
            let report = analyze_with(&url, &markup, &config.analysis);
            finish(&report, &config, output.strict)
        }

        Commands::File { path, url, output } => {
            output.apply(&mut config);
            let markup = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let url = url.unwrap_or_else(|| path.display().to_string());
            let report = analyze_with(&url, &markup, &config.analysis);
            finish(&report, &config, output.strict)
        }

        Commands::Init { path } => {
            let path = path.unwrap_or_else(config::default_config_path);
            config::write_default_config(&path)?;
            eprintln!("Configuration written to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Print the cards, persist the report and pick the exit code
fn finish(report: &Report, config: &Config, strict: bool) -> anyhow::Result<ExitCode> {
    println!("{}", render_text(report));

    if config.report.save {
        let written = save_report(report, &config.report.output_dir, &config.report.formats)?;
        for (path, format) in written.iter().zip(&config.report.formats) {
            eprintln!("Saved {} report -> {}", label(*format), path.display());
        }
    }

    if strict && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn label(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "JSON",
        OutputFormat::Markdown => "Markdown",
        OutputFormat::Text => "text",
    }
}

/// Ask for a URL on stdin
fn prompt_url() -> anyhow::Result<String> {
    eprintln!("AccessCheck – Accessibility Analyzer");
    eprintln!("Enter a full URL (e.g., https://example.com)");
    eprint!("URL: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
