// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildband-app — folder walking, output sinks and the batch runner behind the
// `bildband` command.

pub mod batch;
pub mod sink;
pub mod walk;

pub use batch::{BatchReport, BatchRunner, CreatedDocument, SkippedFolder};
pub use sink::{DocumentSink, FileSink};
pub use walk::{scan_folder, scan_root};
