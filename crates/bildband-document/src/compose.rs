// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folder composer — turns one folder of screenshots into a titled, bordered,
// paginated document.

use bildband_core::BatchConfig;
use bildband_core::error::Result;
use bildband_core::types::Folder;
use tracing::{debug, info, instrument};

use crate::docx::{Alignment, DocxDocument, Paragraph, RunProps, SectionProps};
use crate::image::crop_image_from_bottom;
use crate::layout::{LayoutPlanner, LayoutRules};

/// A document built for one folder, with a summary of its layout.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub document: DocxDocument,
    /// Pictures per page, in page order. Empty when the folder had no images.
    pub pages: Vec<usize>,
    /// How many pictures were cropped (the rest were embedded unchanged).
    pub cropped: usize,
}

impl ComposedDocument {
    pub fn image_count(&self) -> usize {
        self.pages.iter().sum()
    }

    pub fn page_breaks(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }
}

/// Section properties shared by every page.
pub fn section_props(config: &BatchConfig) -> SectionProps {
    SectionProps {
        paper_size: config.paper_size,
        margin: config.margin,
        border: Some(config.border.clone()),
    }
}

/// Build the document for `folder`. Images are read, cropped and placed in the
/// order they appear in `folder.images`.
#[instrument(skip_all, fields(folder = %folder.name, images = folder.images.len()))]
pub fn compose_folder(folder: &Folder, config: &BatchConfig) -> Result<ComposedDocument> {
    let mut document = DocxDocument::new(section_props(config));
    document.set_title(folder.name.clone());

    add_title(&mut document, &folder.name, config);

    info!("Files in {} will be processed in this order:", folder.name);
    for image in &folder.images {
        info!("  {}", image.name);
    }

    let mut planner = LayoutPlanner::new(LayoutRules::from_config(config));
    let mut pages: Vec<usize> = Vec::new();
    let mut cropped = 0;
    let total = folder.images.len();

    for (index, image) in folder.images.iter().enumerate() {
        let prepared = crop_image_from_bottom(&image.path, config.crop, config.assumed_dpi)?;
        if prepared.cropped {
            cropped += 1;
        }

        let placement = planner.place(index + 1 == total);
        if placement.slot == 0 {
            pages.push(0);
        }
        if let Some(count) = pages.last_mut() {
            *count += 1;
        }

        debug!(
            image = %image.name,
            page = placement.page,
            slot = placement.slot,
            "Placing picture"
        );
        document.add_picture(
            prepared.bytes,
            prepared.kind,
            placement.width,
            placement.height,
            Alignment::Center,
        );

        if placement.break_after {
            document.add_section(section_props(config));
        }
    }

    Ok(ComposedDocument {
        document,
        pages,
        cropped,
    })
}

fn add_title(document: &mut DocxDocument, name: &str, config: &BatchConfig) {
    let style = &config.title;
    document.add_paragraph(Paragraph::new().align(Alignment::Center).text(
        style.render(name),
        RunProps {
            bold: style.bold,
            size_half_points: Some(style.half_points()),
            color: Some(style.color.clone()),
        },
    ));
    if style.blank_line_after {
        document.add_paragraph(Paragraph::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{Block, Run};
    use bildband_core::types::ImageFile;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::path::Path;

    fn write_png(path: &Path, height: u32) {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, height, Rgb([0, 0, 255])));
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    fn folder_with(dir: &Path, names: &[&str], height: u32) -> Folder {
        let images = names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                write_png(&path, height);
                ImageFile::new(path, (*name).to_string())
            })
            .collect();
        Folder {
            path: dir.to_path_buf(),
            name: "Lecture 4".into(),
            images,
        }
    }

    #[test]
    fn five_images_make_two_sections() {
        let dir = tempfile::tempdir().unwrap();
        let folder = folder_with(dir.path(), &["1.png", "2.png", "3.png", "4.png", "5.png"], 40);

        let composed = compose_folder(&folder, &BatchConfig::default()).unwrap();
        assert_eq!(composed.pages, vec![2, 3]);
        assert_eq!(composed.page_breaks(), 1);
        assert_eq!(composed.cropped, 5);
        assert_eq!(composed.document.section_count(), 2);
        assert_eq!(composed.document.pictures_per_section(), vec![2, 3]);
    }

    #[test]
    fn title_comes_first_and_is_uppercase() {
        let dir = tempfile::tempdir().unwrap();
        let folder = folder_with(dir.path(), &["a.png"], 40);

        let composed = compose_folder(&folder, &BatchConfig::default()).unwrap();
        let blocks = composed.document.blocks();
        match &blocks[0] {
            Block::Paragraph(paragraph) => match &paragraph.runs[0] {
                Run::Text { text, props } => {
                    assert_eq!(text, "LECTURE 4");
                    assert!(props.bold);
                    assert_eq!(props.size_half_points, Some(48));
                }
                other => panic!("expected title text, got {other:?}"),
            },
            other => panic!("expected paragraph, got {other:?}"),
        }
        // Blank line, then the picture.
        assert!(matches!(&blocks[1], Block::Paragraph(p) if p.runs.is_empty()));
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn empty_folder_gets_title_only() {
        let dir = tempfile::tempdir().unwrap();
        let folder = folder_with(dir.path(), &[], 40);

        let composed = compose_folder(&folder, &BatchConfig::default()).unwrap();
        assert!(composed.pages.is_empty());
        assert_eq!(composed.image_count(), 0);
        assert_eq!(composed.document.section_count(), 1);
    }

    #[test]
    fn tiny_images_are_embedded_uncropped() {
        let dir = tempfile::tempdir().unwrap();
        let folder = folder_with(dir.path(), &["tiny.png"], 5);

        let composed = compose_folder(&folder, &BatchConfig::default()).unwrap();
        assert_eq!(composed.cropped, 0);
        let original = std::fs::read(dir.path().join("tiny.png")).unwrap();
        assert_eq!(composed.document.media()[0].bytes, original);
    }

    #[test]
    fn unreadable_image_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut folder = folder_with(dir.path(), &["a.png"], 40);
        folder
            .images
            .push(ImageFile::new(dir.path().join("vanished.png"), "vanished.png".into()));

        assert!(compose_folder(&folder, &BatchConfig::default()).is_err());
    }
}
