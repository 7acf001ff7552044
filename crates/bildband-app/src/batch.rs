// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch runner — walks the root, composes one document per folder and hands
// it to the sink, strictly one folder at a time.
//
// A locked output file only skips its own folder. Every other failure stops
// the run.

use std::path::PathBuf;

use bildband_core::BatchConfig;
use bildband_core::error::Result;
use bildband_core::human_errors::humanize_error;
use bildband_document::compose_folder;
use tracing::{error, info, warn};

use crate::sink::DocumentSink;
use crate::walk::scan_root;

/// A document that was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedDocument {
    pub folder: String,
    pub path: PathBuf,
    /// Pictures per page, in order.
    pub pages: Vec<usize>,
}

impl CreatedDocument {
    pub fn image_count(&self) -> usize {
        self.pages.iter().sum()
    }
}

/// A folder whose document could not be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFolder {
    pub folder: String,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub created: Vec<CreatedDocument>,
    pub skipped: Vec<SkippedFolder>,
    /// Folders without any images; they still get a title-only document.
    pub empty: Vec<String>,
}

/// Runs one batch over `config.root_dir`.
pub struct BatchRunner<S> {
    config: BatchConfig,
    sink: S,
}

impl<S: DocumentSink> BatchRunner<S> {
    pub fn new(config: BatchConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Process every folder under the root.
    pub fn run(&mut self) -> Result<BatchReport> {
        self.config.validate()?;
        let folders = scan_root(&self.config.root_dir, self.config.extension())?;

        info!("{}", "=".repeat(60));
        info!(
            root = %self.config.root_dir.display(),
            folders = folders.len(),
            "Bildband batch starting"
        );
        info!("{}", "=".repeat(60));

        if folders.is_empty() {
            warn!("No folders found under {}", self.config.root_dir.display());
        }

        let mut report = BatchReport::default();
        for folder in &folders {
            let composed = compose_folder(folder, &self.config)?;
            if folder.images.is_empty() {
                warn!(folder = %folder.name, "Folder has no images");
                report.empty.push(folder.name.clone());
            }

            let file_name = folder.document_file_name();
            match self.sink.save(&file_name, &composed.document) {
                Ok(path) => {
                    info!("Created: {}", file_name);
                    report.created.push(CreatedDocument {
                        folder: folder.name.clone(),
                        path,
                        pages: composed.pages,
                    });
                }
                Err(err) if err.is_locked() => {
                    let human = humanize_error(&err);
                    error!("Error: {} {}", human.message, human.suggestion);
                    report.skipped.push(SkippedFolder {
                        folder: folder.name.clone(),
                        reason: human.message,
                    });
                }
                Err(err) => return Err(err),
            }
        }

        log_summary(&report);
        Ok(report)
    }
}

fn log_summary(report: &BatchReport) {
    info!("{}", "=".repeat(60));
    info!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        empty = report.empty.len(),
        "Batch complete"
    );
    for skipped in &report.skipped {
        warn!(folder = %skipped.folder, "Skipped: {}", skipped.reason);
    }
    info!("{}", "=".repeat(60));
}
