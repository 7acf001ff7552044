// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory model of a WordprocessingML document: paragraphs, inline
// pictures and sections. Serialised by `xml` and packaged by `package`.

use std::path::Path;

use bildband_core::error::{BildbandError, Result};
use bildband_core::types::{BorderStyle, Cm, ImageKind, PaperSize};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Paragraph justification (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
}

impl Alignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
        }
    }
}

/// Character formatting for a text run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProps {
    pub bold: bool,
    /// Font size in half-points.
    pub size_half_points: Option<u32>,
    /// Hex RGB.
    pub color: Option<String>,
}

/// Inline picture referencing a media part.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    /// Index into `DocxDocument::media`.
    pub media: usize,
    pub width: Cm,
    pub height: Cm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text { text: String, props: RunProps },
    Picture(Picture),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub alignment: Option<Alignment>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn text(mut self, text: impl Into<String>, props: RunProps) -> Self {
        self.runs.push(Run::Text {
            text: text.into(),
            props,
        });
        self
    }
}

/// Page geometry and decoration of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProps {
    pub paper_size: PaperSize,
    /// Applied to all four sides.
    pub margin: Cm,
    pub border: Option<BorderStyle>,
}

/// Body-level content in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    /// Ends the current section; the props describe the section being closed.
    SectionBreak(SectionProps),
}

/// An embedded image file (`word/media/imageN.ext`).
#[derive(Debug, Clone)]
pub struct MediaPart {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
}

impl MediaPart {
    /// Part name relative to `word/`, 1-based as word processors write it.
    pub fn target(&self, index: usize) -> String {
        format!("media/image{}.{}", index + 1, self.kind.extension())
    }
}

/// A document under construction.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    pub(crate) title: Option<String>,
    pub(crate) created: Option<DateTime<Utc>>,
    pub(crate) blocks: Vec<Block>,
    pub(crate) media: Vec<MediaPart>,
    /// Properties of the section still open; written at the end of the body.
    pub(crate) current_section: SectionProps,
}

impl DocxDocument {
    /// Start an empty document whose first section uses `section`.
    pub fn new(section: SectionProps) -> Self {
        Self {
            title: None,
            created: None,
            blocks: Vec::new(),
            media: Vec::new(),
            current_section: section,
        }
    }

    /// Title stored in the package's core properties.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Creation timestamp stored in the core properties. Defaults to the time
    /// the package is serialised.
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.created = Some(created);
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Add a paragraph holding a single inline picture.
    pub fn add_picture(
        &mut self,
        bytes: Vec<u8>,
        kind: ImageKind,
        width: Cm,
        height: Cm,
        alignment: Alignment,
    ) {
        let media = self.media.len();
        self.media.push(MediaPart { bytes, kind });
        self.blocks.push(Block::Paragraph(Paragraph {
            alignment: Some(alignment),
            runs: vec![Run::Picture(Picture {
                media,
                width,
                height,
            })],
        }));
    }

    /// Close the current section and open a new one on the next page.
    pub fn add_section(&mut self, section: SectionProps) {
        let closed = std::mem::replace(&mut self.current_section, section);
        self.blocks.push(Block::SectionBreak(closed));
    }

    // -- Inspection -----------------------------------------------------------

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn media(&self) -> &[MediaPart] {
        &self.media
    }

    /// Number of sections, counting the one still open.
    pub fn section_count(&self) -> usize {
        1 + self
            .blocks
            .iter()
            .filter(|block| matches!(block, Block::SectionBreak(_)))
            .count()
    }

    /// Number of pictures in each section, in order.
    pub fn pictures_per_section(&self) -> Vec<usize> {
        let mut counts = vec![0];
        for block in &self.blocks {
            match block {
                Block::SectionBreak(_) => counts.push(0),
                Block::Paragraph(paragraph) => {
                    let pictures = paragraph
                        .runs
                        .iter()
                        .filter(|run| matches!(run, Run::Picture(_)))
                        .count();
                    if let Some(last) = counts.last_mut() {
                        *last += pictures;
                    }
                }
            }
        }
        counts
    }

    // -- Output ---------------------------------------------------------------

    /// Serialise the document as a `.docx` package.
    #[instrument(skip(self), fields(blocks = self.blocks.len(), media = self.media.len()))]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let created = self.created.unwrap_or_else(Utc::now);
        let bytes = super::package::write_package(self, created)?;
        debug!(bytes = bytes.len(), "Package written");
        Ok(bytes)
    }

    /// Serialise and write the package to `path`.
    ///
    /// Write failures are reported as `BildbandError::Save` so callers can
    /// tell a locked file apart from an assembly failure.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes).map_err(|source| BildbandError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote DOCX to {}", path.display());
        Ok(())
    }
}
