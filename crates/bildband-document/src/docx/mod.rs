// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX module — an in-memory WordprocessingML model and its serialisation
// into an OPC zip package.

pub mod model;
mod package;
mod xml;

pub use model::{
    Alignment, Block, DocxDocument, MediaPart, Paragraph, Picture, Run, RunProps, SectionProps,
};
