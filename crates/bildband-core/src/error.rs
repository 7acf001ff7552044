// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildband.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Bildband operations.
#[derive(Debug, Error)]
pub enum BildbandError {
    // -- Input --
    #[error("failed to read folder {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("root folder {} does not exist or is not a directory", .0.display())]
    MissingRoot(PathBuf),

    // -- Document errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("DOCX assembly failed: {0}")]
    DocxError(String),

    // -- Output --
    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BildbandError {
    /// Whether this is a save failure caused by the target file being locked
    /// (open in another program) or write-protected.
    ///
    /// These are the only per-folder failures the batch recovers from.
    pub fn is_locked(&self) -> bool {
        match self {
            Self::Save { source, .. } => is_lock_error(source),
            _ => false,
        }
    }
}

fn is_lock_error(err: &std::io::Error) -> bool {
    if matches!(
        err.kind(),
        std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::ResourceBusy
    ) {
        return true;
    }
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
    cfg!(windows) && matches!(err.raw_os_error(), Some(32) | Some(33))
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildbandError>;
