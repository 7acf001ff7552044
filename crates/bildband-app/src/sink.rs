// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output destinations for finished documents.

use std::path::PathBuf;

use bildband_core::error::Result;
use bildband_document::DocxDocument;

/// Where the batch runner hands finished documents.
pub trait DocumentSink {
    /// Persist `document` under `file_name` and return where it went.
    ///
    /// A locked or write-protected target must surface as
    /// `BildbandError::Save` so the runner can skip just that folder.
    fn save(&mut self, file_name: &str, document: &DocxDocument) -> Result<PathBuf>;
}

/// Writes documents into a directory on disk.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Target `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl DocumentSink for FileSink {
    fn save(&mut self, file_name: &str, document: &DocxDocument) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        document.save(&path)?;
        Ok(path)
    }
}
