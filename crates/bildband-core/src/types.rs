// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Bildband: lengths, paper sizes, layout rules and the
// folder/image model produced by the directory walker.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::natural::NaturalKey;

/// EMU per centimetre (DrawingML extents).
pub const EMU_PER_CM: f64 = 360_000.0;

/// Twentieths of a point per inch (WordprocessingML page geometry).
pub const TWIPS_PER_INCH: f64 = 1440.0;

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// A length in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Cm(pub f64);

impl Cm {
    /// Length in English Metric Units, rounded to the nearest unit.
    pub fn to_emu(self) -> i64 {
        (self.0 * EMU_PER_CM).round() as i64
    }

    /// Length in twips, rounded to the nearest unit.
    pub fn to_twips(self) -> u32 {
        (self.0 / CM_PER_INCH * TWIPS_PER_INCH).round().max(0.0) as u32
    }

    /// Whole pixels covered by this length at `dpi`, truncated.
    ///
    /// 0.2 cm at 96 dpi is 7.56 px, which yields 7.
    pub fn to_pixels(self, dpi: f64) -> u32 {
        (self.0 * dpi / CM_PER_INCH).floor().max(0.0) as u32
    }
}

impl std::fmt::Display for Cm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} cm", self.0)
    }
}

/// Raster formats the document writer can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageKind {
    /// MIME type used in the package's content-type table.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// File extension used for the media part name.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Infer the kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
            Self::Tabloid => (279.4, 431.8),
            Self::Custom {
                width_mm,
                height_mm,
            } => (f64::from(*width_mm), f64::from(*height_mm)),
        }
    }

    /// Dimensions in twips (width, height), as written to `w:pgSz`.
    pub fn dimensions_twips(&self) -> (u32, u32) {
        let (w, h) = self.dimensions_mm();
        (Cm(w / 10.0).to_twips(), Cm(h / 10.0).to_twips())
    }
}

/// Capacity and picture size for one class of page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRule {
    /// Maximum pictures on the page.
    pub capacity: usize,
    /// Picture width.
    pub width: Cm,
    /// Picture height.
    pub height: Cm,
}

/// Decorative page border drawn on every section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderStyle {
    /// `ST_Border` value, e.g. `threeDEngrave`.
    pub kind: String,
    /// Line width in eighths of a point.
    pub size_eighths: u32,
    /// Distance from the text or page edge in points.
    pub space_pt: u32,
    /// Hex RGB or `auto`.
    pub color: String,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            kind: "threeDEngrave".into(),
            size_eighths: 24,
            space_pt: 0,
            color: "auto".into(),
        }
    }
}

/// Appearance of the heading written at the top of each document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleStyle {
    pub font_size_pt: f64,
    /// Hex RGB without the leading `#`.
    pub color: String,
    pub bold: bool,
    pub uppercase: bool,
    /// Emit an empty paragraph after the heading.
    pub blank_line_after: bool,
}

impl TitleStyle {
    /// Font size in half-points (`w:sz`).
    pub fn half_points(&self) -> u32 {
        (self.font_size_pt * 2.0).round().max(1.0) as u32
    }

    /// Heading text for a folder name.
    pub fn render(&self, name: &str) -> String {
        if self.uppercase {
            name.to_uppercase()
        } else {
            name.to_owned()
        }
    }
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            font_size_pt: 24.0,
            color: "00FF00".into(),
            bold: true,
            uppercase: true,
            blank_line_after: true,
        }
    }
}

/// One image discovered inside a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    /// File name including extension.
    pub name: String,
    pub key: NaturalKey,
}

impl ImageFile {
    pub fn new(path: PathBuf, name: String) -> Self {
        let key = NaturalKey::new(&name);
        Self { path, name, key }
    }
}

/// A subfolder of the root; becomes exactly one output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub path: PathBuf,
    /// Directory name, used for the title and the output file name.
    pub name: String,
    /// Images in natural order.
    pub images: Vec<ImageFile>,
}

impl Folder {
    /// File name of the document produced for this folder.
    pub fn document_file_name(&self) -> String {
        format!("{}.docx", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centimetre_conversions() {
        assert_eq!(Cm(1.0).to_emu(), 360_000);
        assert_eq!(Cm(18.46).to_emu(), 6_645_600);
        assert_eq!(Cm(2.54).to_twips(), 1440);
        assert_eq!(Cm(1.0).to_twips(), 567);
    }

    #[test]
    fn crop_height_truncates() {
        assert_eq!(Cm(0.2).to_pixels(96.0), 7);
        assert_eq!(Cm(2.54).to_pixels(96.0), 96);
        assert_eq!(Cm(0.0).to_pixels(96.0), 0);
    }

    #[test]
    fn letter_matches_word_default() {
        assert_eq!(PaperSize::Letter.dimensions_twips(), (12240, 15840));
    }

    #[test]
    fn image_kind_from_extension() {
        assert_eq!(ImageKind::from_extension("PNG"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_extension("jpg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("webp"), None);
    }

    #[test]
    fn title_is_uppercased() {
        let style = TitleStyle::default();
        assert_eq!(style.render("Lecture 3 - graphs"), "LECTURE 3 - GRAPHS");
        assert_eq!(style.half_points(), 48);
    }

    #[test]
    fn document_named_after_folder() {
        let folder = Folder {
            path: PathBuf::from("root/Week 1"),
            name: "Week 1".into(),
            images: Vec::new(),
        };
        assert_eq!(folder.document_file_name(), "Week 1.docx");
    }
}
