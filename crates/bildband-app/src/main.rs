// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildband — batch-convert folders of screenshots into DOCX documents.
//
// Entry point. Initialises logging, resolves the configuration and runs the
// batch over the root folder.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bildband_app::{BatchRunner, FileSink};
use bildband_core::BatchConfig;
use bildband_core::error::Result;
use bildband_core::human_errors::humanize_error;
use bildband_core::types::Cm;
use clap::Parser;

/// Turn every subfolder of ROOT into `<subfolder>.docx`
#[derive(Parser, Debug)]
#[command(name = "bildband")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Folder containing one subfolder of screenshots per document
    root: Option<PathBuf>,

    /// Directory the documents are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file (defaults to ./bildband.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Height in centimetres trimmed from the bottom of every image
    #[arg(long)]
    crop_cm: Option<f64>,

    /// Log every placement decision
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("Bildband starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            tracing::error!(error = %err, "{} {}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = resolve_config(&cli, &cwd)?;

    let sink = FileSink::new(&config.output_dir)?;
    let report = BatchRunner::new(config, sink).run()?;
    tracing::info!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        "Bildband finished"
    );
    Ok(())
}

/// Defaults, then the JSON file, then the command line.
fn resolve_config(cli: &Cli, cwd: &Path) -> Result<BatchConfig> {
    let mut config = BatchConfig::discover(cli.config.as_deref(), cwd)?;
    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut BatchConfig, cli: &Cli) {
    if let Some(root) = &cli.root {
        config.root_dir = root.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(crop) = cli.crop_cm {
        config.crop = Cm(crop);
    }
}
