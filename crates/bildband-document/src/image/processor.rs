// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, crop and re-encode a single in-memory image
// using the `image` crate, keeping track of the source format.

use bildband_core::error::BildbandError;
use bildband_core::types::ImageKind;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, so calls
/// chain:
///
/// ```ignore
/// let bytes = ImageProcessor::from_bytes(&data)?
///     .crop_bottom(7)
///     .encode()?;
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
    /// Format the image was decoded from; `encode` writes the same format.
    format: ImageFormat,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode raw encoded bytes, detecting the format from their signature.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BildbandError> {
        let format = image::guess_format(data).map_err(|err| {
            BildbandError::ImageError(format!("unrecognised image format: {}", err))
        })?;
        let img = image::load_from_memory_with_format(data, format).map_err(|err| {
            BildbandError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            ?format,
            "Image decoded from bytes"
        );
        Ok(Self { image: img, format })
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Format used by `encode`.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Embeddable kind matching the output of `encode`.
    pub fn kind(&self) -> ImageKind {
        embeddable_kind(self.format).unwrap_or(ImageKind::Png)
    }

    // -- Transformations ------------------------------------------------------

    /// Crop a rectangular region from the image.
    ///
    /// `x` and `y` are the top-left corner; `width` and `height` define the
    /// size of the crop rectangle. Values are clamped to image bounds.
    pub fn crop(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let img_w = self.image.width();
        let img_h = self.image.height();

        let safe_x = x.min(img_w.saturating_sub(1));
        let safe_y = y.min(img_h.saturating_sub(1));
        let safe_w = width.min(img_w - safe_x);
        let safe_h = height.min(img_h - safe_y);

        debug!(safe_x, safe_y, safe_w, safe_h, "Cropping image");

        Self {
            image: self.image.crop_imm(safe_x, safe_y, safe_w, safe_h),
            format: self.format,
        }
    }

    /// Remove `rows` pixel rows from the bottom edge.
    ///
    /// Callers check `rows < height` first; removing every row would leave an
    /// empty image, so at least one row is always kept.
    pub fn crop_bottom(self, rows: u32) -> Self {
        let width = self.image.width();
        let kept = self.image.height().saturating_sub(rows).max(1);
        self.crop(0, 0, width, kept)
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the image in its source format, or PNG when that format cannot
    /// be embedded in a document.
    pub fn encode(&self) -> Result<Vec<u8>, BildbandError> {
        let target = match embeddable_kind(self.format) {
            Some(_) => self.format,
            None => ImageFormat::Png,
        };
        encode_to_format(&self.image, target)
    }
}

/// Map a decoder format onto a kind the document writer can embed.
pub fn embeddable_kind(format: ImageFormat) -> Option<ImageKind> {
    match format {
        ImageFormat::Png => Some(ImageKind::Png),
        ImageFormat::Jpeg => Some(ImageKind::Jpeg),
        ImageFormat::Gif => Some(ImageKind::Gif),
        ImageFormat::Bmp => Some(ImageKind::Bmp),
        ImageFormat::Tiff => Some(ImageKind::Tiff),
        _ => None,
    }
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(
    image: &DynamicImage,
    format: ImageFormat,
) -> Result<Vec<u8>, BildbandError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, format).map_err(|err| {
        BildbandError::ImageError(format!("image encoding failed: {}", err))
    })?;
    Ok(buffer)
}
