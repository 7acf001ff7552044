// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildband-document — Document assembly for Bildband.
//
// Provides image cropping (decode, trim the bottom edge, re-encode), the page
// layout planner, a WordprocessingML writer producing `.docx` packages, and
// the folder composer tying them together.

pub mod compose;
pub mod docx;
pub mod image;
pub mod layout;

// Re-export the primary items so callers can use `bildband_document::DocxDocument` etc.
pub use compose::{ComposedDocument, compose_folder};
pub use docx::DocxDocument;
pub use self::image::processor::ImageProcessor;
pub use layout::{LayoutPlanner, LayoutRules, plan_pages};
