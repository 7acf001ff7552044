// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-English error messages for the end-of-run report.
//
// Every technical error is mapped to a short message with a suggestion the
// person running the batch can act on.

use crate::error::BildbandError;

/// How an error affects the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Only the current folder is skipped; the batch carries on.
    FolderSkipped,
    /// The batch stops.
    Fatal,
}

/// A human-readable error with a plain English message and a suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `BildbandError` into a `HumanError`.
pub fn humanize_error(err: &BildbandError) -> HumanError {
    match err {
        BildbandError::Save { path, .. } if err.is_locked() => HumanError {
            message: format!("Permission denied for {}.", display_name(path)),
            suggestion: "Please close the file or check permissions.".into(),
            severity: Severity::FolderSkipped,
        },

        BildbandError::Save { path, source } => HumanError {
            message: format!("Could not write {}.", display_name(path)),
            suggestion: format!("Check free disk space and the output folder ({source})."),
            severity: Severity::Fatal,
        },

        BildbandError::Walk { path, .. } => HumanError {
            message: format!("Could not read the folder {}.", path.display()),
            suggestion: "Make sure the folder exists and you are allowed to open it.".into(),
            severity: Severity::Fatal,
        },

        BildbandError::MissingRoot(path) => HumanError {
            message: format!("The folder {} was not found.", path.display()),
            suggestion: "Pass the folder that contains your screenshot folders.".into(),
            severity: Severity::Fatal,
        },

        BildbandError::ImageError(detail) => HumanError {
            message: "An image could not be processed.".into(),
            suggestion: format!("Check that the file is a valid image ({detail})."),
            severity: Severity::Fatal,
        },

        BildbandError::DocxError(detail) => HumanError {
            message: "The document could not be assembled.".into(),
            suggestion: format!("This is a bug; please report it ({detail})."),
            severity: Severity::Fatal,
        },

        BildbandError::Config(detail) => HumanError {
            message: "The settings are invalid.".into(),
            suggestion: format!("Fix the configuration file: {detail}."),
            severity: Severity::Fatal,
        },

        BildbandError::Serialization(detail) => HumanError {
            message: "The settings file is not valid JSON.".into(),
            suggestion: format!("Fix the configuration file: {detail}."),
            severity: Severity::Fatal,
        },

        BildbandError::Io(io_err) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check the paths and permissions ({io_err})."),
            severity: Severity::Fatal,
        },
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
