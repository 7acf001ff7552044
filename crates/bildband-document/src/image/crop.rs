// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bottom-edge cropping of screenshots before they are placed in a document.
//
// Cropping is best effort. Any decode, crop or encode failure is logged and the
// original bytes are embedded instead.

use std::path::Path;

use bildband_core::error::{BildbandError, Result};
use bildband_core::types::{Cm, ImageKind};
use tracing::{debug, instrument, warn};

use super::processor::{ImageProcessor, embeddable_kind};

/// Image bytes ready to embed, plus what happened to them.
#[derive(Debug, Clone)]
pub struct CroppedImage {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
    /// False when the original bytes are passed through unchanged.
    pub cropped: bool,
    /// Final pixel size, when the image could be decoded.
    pub dimensions: Option<(u32, u32)>,
}

/// Read `path` and trim `crop` from its bottom edge, assuming `dpi`.
///
/// Failing to read the file is an error; failing to crop it is not.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn crop_image_from_bottom(path: &Path, crop: Cm, dpi: f64) -> Result<CroppedImage> {
    let original = std::fs::read(path).map_err(|err| {
        BildbandError::ImageError(format!("failed to read {}: {}", path.display(), err))
    })?;
    let fallback_kind = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageKind::from_extension)
        .unwrap_or(ImageKind::Png);

    let label = path.display().to_string();
    Ok(crop_bytes_from_bottom(
        original,
        fallback_kind,
        crop.to_pixels(dpi),
        &label,
    ))
}

/// Remove `crop_px` rows from the bottom of an encoded image.
///
/// Returns the original bytes (tagged `fallback_kind` unless the decoder says
/// otherwise) when the crop would consume the whole image or when any step
/// fails. Uncropped images in a format documents cannot embed are re-encoded
/// as PNG. `label` names the image in log messages.
pub fn crop_bytes_from_bottom(
    original: Vec<u8>,
    fallback_kind: ImageKind,
    crop_px: u32,
    label: &str,
) -> CroppedImage {
    let processor = match ImageProcessor::from_bytes(&original) {
        Ok(processor) => processor,
        Err(err) => {
            warn!(image = label, error = %err, "Error cropping image; using original");
            return passthrough(original, fallback_kind, None);
        }
    };

    let (width, height) = (processor.width(), processor.height());
    let kind = processor.kind();

    if crop_px == 0 {
        return uncropped(&processor, original, label);
    }
    if crop_px >= height {
        warn!(
            image = label,
            height,
            crop_px,
            "Crop amount too large; using original image"
        );
        return uncropped(&processor, original, label);
    }

    let cropped = processor.crop_bottom(crop_px);
    let new_height = cropped.height();
    match cropped.encode() {
        Ok(bytes) => {
            debug!(image = label, height, new_height, "Cropped image");
            CroppedImage {
                bytes,
                kind,
                cropped: true,
                dimensions: Some((width, new_height)),
            }
        }
        Err(err) => {
            warn!(image = label, error = %err, "Error cropping image; using original");
            passthrough(original, kind, Some((width, height)))
        }
    }
}

/// The image as decoded, in bytes a document can embed.
fn uncropped(processor: &ImageProcessor, original: Vec<u8>, label: &str) -> CroppedImage {
    let dimensions = Some((processor.width(), processor.height()));
    if embeddable_kind(processor.format()).is_some() {
        return passthrough(original, processor.kind(), dimensions);
    }
    match processor.encode() {
        Ok(bytes) => {
            debug!(image = label, format = ?processor.format(), "Re-encoded as PNG");
            passthrough(bytes, ImageKind::Png, dimensions)
        }
        Err(err) => {
            warn!(image = label, error = %err, "Error converting image; using original");
            passthrough(original, processor.kind(), dimensions)
        }
    }
}

fn passthrough(bytes: Vec<u8>, kind: ImageKind, dimensions: Option<(u32, u32)>) -> CroppedImage {
    CroppedImage {
        bytes,
        kind,
        cropped: false,
        dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 10, 10])));
        let mut buffer = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buffer), format)
            .unwrap();
        buffer
    }

    #[test]
    fn removes_rows_from_the_bottom() {
        let result = crop_bytes_from_bottom(encoded(50, 100, ImageFormat::Png), ImageKind::Png, 7, "t");
        assert!(result.cropped);
        assert_eq!(result.dimensions, Some((50, 93)));
        assert_eq!(image::load_from_memory(&result.bytes).unwrap().height(), 93);
    }

    #[test]
    fn crop_equal_to_height_returns_original() {
        let original = encoded(10, 7, ImageFormat::Png);
        let result = crop_bytes_from_bottom(original.clone(), ImageKind::Png, 7, "t");
        assert!(!result.cropped);
        assert_eq!(result.bytes, original);
    }

    #[test]
    fn crop_larger_than_height_returns_original() {
        let original = encoded(10, 4, ImageFormat::Png);
        let result = crop_bytes_from_bottom(original.clone(), ImageKind::Png, 7, "t");
        assert!(!result.cropped);
        assert_eq!(result.bytes, original);
        assert_eq!(result.dimensions, Some((10, 4)));
    }

    #[test]
    fn undecodable_bytes_pass_through() {
        let original = b"\x89PNG but truncated".to_vec();
        let result = crop_bytes_from_bottom(original.clone(), ImageKind::Png, 7, "t");
        assert!(!result.cropped);
        assert_eq!(result.bytes, original);
        assert_eq!(result.dimensions, None);
    }

    #[test]
    fn jpeg_stays_jpeg() {
        let result = crop_bytes_from_bottom(encoded(20, 20, ImageFormat::Jpeg), ImageKind::Png, 3, "t");
        assert!(result.cropped);
        assert_eq!(result.kind, ImageKind::Jpeg);
        assert_eq!(image::guess_format(&result.bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn uncropped_webp_is_embedded_as_png() {
        let original = encoded(10, 4, ImageFormat::WebP);
        let result = crop_bytes_from_bottom(original, ImageKind::Png, 7, "t");
        assert!(!result.cropped);
        assert_eq!(result.kind, ImageKind::Png);
        assert_eq!(image::guess_format(&result.bytes).unwrap(), ImageFormat::Png);
        assert_eq!(result.dimensions, Some((10, 4)));
    }

    #[test]
    fn zero_crop_converts_webp_but_keeps_png_bytes() {
        let webp = crop_bytes_from_bottom(encoded(10, 10, ImageFormat::WebP), ImageKind::Png, 0, "t");
        assert_eq!(image::guess_format(&webp.bytes).unwrap(), ImageFormat::Png);

        let png = encoded(10, 10, ImageFormat::Png);
        let result = crop_bytes_from_bottom(png.clone(), ImageKind::Png, 0, "t");
        assert_eq!(result.bytes, png);
    }

    #[test]
    fn cropped_webp_is_written_as_png() {
        let result = crop_bytes_from_bottom(encoded(10, 20, ImageFormat::WebP), ImageKind::Png, 7, "t");
        assert!(result.cropped);
        assert_eq!(result.kind, ImageKind::Png);
        assert_eq!(image::guess_format(&result.bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn reads_from_disk_with_default_crop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, encoded(30, 40, ImageFormat::Png)).unwrap();

        let result = crop_image_from_bottom(&path, Cm(0.2), 96.0).unwrap();
        assert_eq!(result.dimensions, Some((30, 33)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = crop_image_from_bottom(&dir.path().join("gone.png"), Cm(0.2), 96.0).unwrap_err();
        assert!(matches!(err, BildbandError::ImageError(_)));
    }
}
