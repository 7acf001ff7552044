// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OPC packaging: zips the document part, its relationships, the media files
// and the property parts into a `.docx` container.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};

use bildband_core::error::{BildbandError, Result};
use chrono::{DateTime, Utc};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::model::DocxDocument;
use super::xml;

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

fn zip_error(err: zip::result::ZipError) -> BildbandError {
    BildbandError::DocxError(format!("zip write failed: {}", err))
}

/// Build the complete package in memory.
pub(crate) fn write_package(doc: &DocxDocument, created: DateTime<Utc>) -> Result<Vec<u8>> {
    // One Default entry per media extension, sorted so output is stable.
    let media_defaults: BTreeMap<&str, &str> = doc
        .media
        .iter()
        .map(|part| (part.kind.extension(), part.kind.mime_type()))
        .collect();
    let media_defaults: Vec<(&str, &str)> = media_defaults.into_iter().collect();

    let package_rels = vec![
        ("rId1".to_string(), REL_OFFICE_DOCUMENT, "word/document.xml".to_string()),
        ("rId2".to_string(), REL_CORE_PROPERTIES, "docProps/core.xml".to_string()),
        ("rId3".to_string(), REL_EXTENDED_PROPERTIES, "docProps/app.xml".to_string()),
    ];
    let document_rels: Vec<(String, &str, String)> = doc
        .media
        .iter()
        .enumerate()
        .map(|(index, part)| (format!("rId{}", index + 1), REL_IMAGE, part.target(index)))
        .collect();

    // Fixed entry timestamps keep the archive reproducible.
    let base = SimpleFileOptions::default().last_modified_time(zip::DateTime::default());
    let deflated = base.compression_method(CompressionMethod::Deflated);
    // Images are already compressed.
    let stored = base.compression_method(CompressionMethod::Stored);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let xml_parts = [
        ("[Content_Types].xml", xml::content_types_xml(&media_defaults)?),
        ("_rels/.rels", xml::relationships_xml(&package_rels)?),
        (
            "docProps/core.xml",
            xml::core_properties_xml(doc.title.as_deref(), created)?,
        ),
        ("docProps/app.xml", xml::app_properties_xml()?),
        ("word/document.xml", xml::document_xml(doc)?),
        ("word/_rels/document.xml.rels", xml::relationships_xml(&document_rels)?),
    ];
    for (name, bytes) in &xml_parts {
        zip.start_file(*name, deflated).map_err(zip_error)?;
        zip.write_all(bytes)?;
    }

    for (index, part) in doc.media.iter().enumerate() {
        zip.start_file(format!("word/{}", part.target(index)), stored)
            .map_err(zip_error)?;
        zip.write_all(&part.bytes)?;
    }

    let cursor = zip.finish().map_err(zip_error)?;
    Ok(cursor.into_inner())
}
