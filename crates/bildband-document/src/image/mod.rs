// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding, bottom-edge cropping and re-encoding.

pub mod crop;
pub mod processor;

pub use crop::{CroppedImage, crop_bytes_from_bottom, crop_image_from_bottom};
pub use processor::ImageProcessor;
