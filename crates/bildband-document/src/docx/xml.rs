// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// XML serialisation of the document body and the package's small metadata
// parts, built on `quick-xml`'s event writer.

use bildband_core::error::{BildbandError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::model::{Block, DocxDocument, Paragraph, Picture, Run, RunProps, SectionProps};

pub(crate) const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Thin wrapper over `quick_xml::Writer` that maps errors into ours.
pub(crate) struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    pub(crate) fn new() -> Result<Self> {
        let mut out = Self {
            writer: Writer::new(Vec::new()),
        };
        out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(out)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|err| BildbandError::DocxError(format!("XML write failed: {}", err)))
    }

    pub(crate) fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut tag = BytesStart::new(name);
        for attr in attrs {
            tag.push_attribute(*attr);
        }
        self.event(Event::Start(tag))
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    pub(crate) fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut tag = BytesStart::new(name);
        for attr in attrs {
            tag.push_attribute(*attr);
        }
        self.event(Event::Empty(tag))
    }

    pub(crate) fn text(&mut self, text: &str) -> Result<()> {
        self.event(Event::Text(BytesText::new(text)))
    }

    /// `<name attrs>text</name>`
    pub(crate) fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

// -- word/document.xml ---------------------------------------------------------

/// Serialise the main document part. Picture `i` is bound to relationship
/// `rId{i + 1}`.
pub(crate) fn document_xml(doc: &DocxDocument) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "w:document",
        &[
            ("xmlns:w", NS_W),
            ("xmlns:r", NS_R),
            ("xmlns:wp", NS_WP),
            ("xmlns:a", NS_A),
            ("xmlns:pic", NS_PIC),
        ],
    )?;
    out.start("w:body", &[])?;

    let mut drawing_id = 0usize;
    for block in &doc.blocks {
        match block {
            Block::Paragraph(paragraph) => write_paragraph(&mut out, paragraph, &mut drawing_id)?,
            Block::SectionBreak(section) => {
                // The closing section's properties live in an empty paragraph.
                out.start("w:p", &[])?;
                out.start("w:pPr", &[])?;
                write_section(&mut out, section)?;
                out.end("w:pPr")?;
                out.end("w:p")?;
            }
        }
    }

    write_section(&mut out, &doc.current_section)?;
    out.end("w:body")?;
    out.end("w:document")?;
    Ok(out.finish())
}

fn write_paragraph(out: &mut XmlOut, paragraph: &Paragraph, drawing_id: &mut usize) -> Result<()> {
    out.start("w:p", &[])?;
    if let Some(alignment) = paragraph.alignment {
        out.start("w:pPr", &[])?;
        out.empty("w:jc", &[("w:val", alignment.as_str())])?;
        out.end("w:pPr")?;
    }
    for run in &paragraph.runs {
        match run {
            Run::Text { text, props } => write_text_run(out, text, props)?,
            Run::Picture(picture) => {
                *drawing_id += 1;
                write_picture_run(out, picture, *drawing_id)?;
            }
        }
    }
    out.end("w:p")
}

fn write_text_run(out: &mut XmlOut, text: &str, props: &RunProps) -> Result<()> {
    out.start("w:r", &[])?;
    if props.bold || props.size_half_points.is_some() || props.color.is_some() {
        out.start("w:rPr", &[])?;
        if props.bold {
            out.empty("w:b", &[])?;
        }
        if let Some(color) = &props.color {
            out.empty("w:color", &[("w:val", color.as_str())])?;
        }
        if let Some(size) = props.size_half_points {
            let size = size.to_string();
            out.empty("w:sz", &[("w:val", size.as_str())])?;
            out.empty("w:szCs", &[("w:val", size.as_str())])?;
        }
        out.end("w:rPr")?;
    }
    out.leaf("w:t", &[("xml:space", "preserve")], text)?;
    out.end("w:r")
}

fn write_picture_run(out: &mut XmlOut, picture: &Picture, drawing_id: usize) -> Result<()> {
    let cx = picture.width.to_emu().to_string();
    let cy = picture.height.to_emu().to_string();
    let id = drawing_id.to_string();
    let name = format!("Picture {}", drawing_id);
    let rel = format!("rId{}", picture.media + 1);

    out.start("w:r", &[])?;
    out.start("w:drawing", &[])?;
    out.start(
        "wp:inline",
        &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
    )?;
    out.empty("wp:extent", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    out.empty("wp:docPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    out.start("wp:cNvGraphicFramePr", &[])?;
    out.empty("a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
    out.end("wp:cNvGraphicFramePr")?;

    out.start("a:graphic", &[])?;
    out.start("a:graphicData", &[("uri", NS_PIC)])?;
    out.start("pic:pic", &[])?;

    out.start("pic:nvPicPr", &[])?;
    out.empty("pic:cNvPr", &[("id", "0"), ("name", name.as_str())])?;
    out.empty("pic:cNvPicPr", &[])?;
    out.end("pic:nvPicPr")?;

    out.start("pic:blipFill", &[])?;
    out.empty("a:blip", &[("r:embed", rel.as_str())])?;
    out.start("a:stretch", &[])?;
    out.empty("a:fillRect", &[])?;
    out.end("a:stretch")?;
    out.end("pic:blipFill")?;

    out.start("pic:spPr", &[])?;
    out.start("a:xfrm", &[])?;
    out.empty("a:off", &[("x", "0"), ("y", "0")])?;
    out.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    out.end("a:xfrm")?;
    out.start("a:prstGeom", &[("prst", "rect")])?;
    out.empty("a:avLst", &[])?;
    out.end("a:prstGeom")?;
    out.end("pic:spPr")?;

    out.end("pic:pic")?;
    out.end("a:graphicData")?;
    out.end("a:graphic")?;
    out.end("wp:inline")?;
    out.end("w:drawing")?;
    out.end("w:r")
}

/// `w:sectPr` with children in schema order: type, pgSz, pgMar, pgBorders.
fn write_section(out: &mut XmlOut, section: &SectionProps) -> Result<()> {
    let (page_w, page_h) = section.paper_size.dimensions_twips();
    let (page_w, page_h) = (page_w.to_string(), page_h.to_string());
    let margin = section.margin.to_twips().to_string();

    out.start("w:sectPr", &[])?;
    out.empty("w:type", &[("w:val", "nextPage")])?;
    out.empty("w:pgSz", &[("w:w", page_w.as_str()), ("w:h", page_h.as_str())])?;
    out.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;

    if let Some(border) = &section.border {
        let size = border.size_eighths.to_string();
        let space = border.space_pt.to_string();
        out.start("w:pgBorders", &[("w:offsetFrom", "page")])?;
        for side in ["w:top", "w:left", "w:bottom", "w:right"] {
            out.empty(
                side,
                &[
                    ("w:val", border.kind.as_str()),
                    ("w:sz", size.as_str()),
                    ("w:space", space.as_str()),
                    ("w:color", border.color.as_str()),
                ],
            )?;
        }
        out.end("w:pgBorders")?;
    }

    out.end("w:sectPr")
}

// -- Package metadata parts ------------------------------------------------------

/// `[Content_Types].xml` for a package embedding the given media kinds.
pub(crate) fn content_types_xml(media_defaults: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    out.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    out.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for (extension, mime) in media_defaults {
        out.empty("Default", &[("Extension", *extension), ("ContentType", *mime)])?;
    }
    out.empty(
        "Override",
        &[
            ("PartName", "/word/document.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            ),
        ],
    )?;
    out.empty(
        "Override",
        &[
            ("PartName", "/docProps/core.xml"),
            ("ContentType", "application/vnd.openxmlformats-package.core-properties+xml"),
        ],
    )?;
    out.empty(
        "Override",
        &[
            ("PartName", "/docProps/app.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.extended-properties+xml",
            ),
        ],
    )?;
    out.end("Types")?;
    Ok(out.finish())
}

/// A relationships part. Each entry is `(id, type, target)`.
pub(crate) fn relationships_xml(rels: &[(String, &str, String)]) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    for (id, kind, target) in rels {
        out.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", *kind), ("Target", target.as_str())],
        )?;
    }
    out.end("Relationships")?;
    Ok(out.finish())
}

/// `docProps/core.xml`.
pub(crate) fn core_properties_xml(title: Option<&str>, created: DateTime<Utc>) -> Result<Vec<u8>> {
    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut out = XmlOut::new()?;
    out.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    if let Some(title) = title {
        out.leaf("dc:title", &[], title)?;
    }
    out.leaf("dc:creator", &[], "Bildband")?;
    out.leaf("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], stamp.as_str())?;
    out.leaf("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], stamp.as_str())?;
    out.end("cp:coreProperties")?;
    Ok(out.finish())
}

/// `docProps/app.xml`.
pub(crate) fn app_properties_xml() -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    out.leaf("Application", &[], "Bildband")?;
    out.end("Properties")?;
    Ok(out.finish())
}
