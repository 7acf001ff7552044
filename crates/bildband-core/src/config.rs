// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BildbandError, Result};
use crate::types::{BorderStyle, Cm, PageRule, PaperSize, TitleStyle};

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE: &str = "bildband.json";

/// Settings for one batch run.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Folder whose subfolders become documents.
    pub root_dir: PathBuf,
    /// Where the `.docx` files are written.
    pub output_dir: PathBuf,
    /// Extension (without the dot) of the images picked up from each folder.
    pub image_extension: String,
    /// Height trimmed from the bottom of every image.
    pub crop: Cm,
    /// Resolution assumed when converting `crop` to pixels.
    pub assumed_dpi: f64,
    /// Margin applied to all four sides of every section.
    pub margin: Cm,
    pub paper_size: PaperSize,
    /// Rule for the first page, which also carries the title.
    pub first_page: PageRule,
    /// Rule for every page after the first.
    pub later_pages: PageRule,
    pub title: TitleStyle,
    pub border: BorderStyle,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("reasoning practice"),
            output_dir: PathBuf::from("."),
            image_extension: "png".into(),
            crop: Cm(0.2),
            assumed_dpi: 96.0,
            margin: Cm(1.0),
            paper_size: PaperSize::Letter,
            first_page: PageRule {
                capacity: 2,
                width: Cm(18.46),
                height: Cm(9.05),
            },
            later_pages: PageRule {
                capacity: 3,
                width: Cm(16.41),
                height: Cm(7.68),
            },
            title: TitleStyle::default(),
            border: BorderStyle::default(),
        }
    }
}

impl BatchConfig {
    /// Load a configuration file. Missing keys take their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|err| {
            BildbandError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `bildband.json` in `cwd` is
    /// used when present, otherwise the built-in defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let implicit = cwd.join(CONFIG_FILE);
        if implicit.is_file() {
            return Self::load(&implicit);
        }
        Ok(Self::default())
    }

    /// Reject settings the layout and cropping code cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.image_extension.trim_start_matches('.').is_empty() {
            return Err(BildbandError::Config("image_extension is empty".into()));
        }
        if self.crop.0 < 0.0 || !self.crop.0.is_finite() {
            return Err(BildbandError::Config(format!(
                "crop must be a non-negative length, got {}",
                self.crop
            )));
        }
        if self.assumed_dpi <= 0.0 || !self.assumed_dpi.is_finite() {
            return Err(BildbandError::Config(format!(
                "assumed_dpi must be positive, got {}",
                self.assumed_dpi
            )));
        }
        if self.margin.0 < 0.0 {
            return Err(BildbandError::Config("margin must not be negative".into()));
        }
        for (label, rule) in [("first_page", &self.first_page), ("later_pages", &self.later_pages)] {
            if rule.capacity == 0 {
                return Err(BildbandError::Config(format!(
                    "{label}.capacity must be at least 1"
                )));
            }
            if rule.width.0 <= 0.0 || rule.height.0 <= 0.0 {
                return Err(BildbandError::Config(format!(
                    "{label} picture size must be positive, got {} x {}",
                    rule.width, rule.height
                )));
            }
        }
        Ok(())
    }

    /// The image extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.image_extension.trim_start_matches('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BatchConfig::default();
        config.validate().unwrap();
        assert_eq!(config.first_page.capacity, 2);
        assert_eq!(config.later_pages.capacity, 3);
        assert_eq!(config.crop.to_pixels(config.assumed_dpi), 7);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{ "root_dir": "shots", "crop": 0.5 }"#).unwrap();

        let config = BatchConfig::load(&path).unwrap();
        assert_eq!(config.root_dir, PathBuf::from("shots"));
        assert_eq!(config.crop, Cm(0.5));
        assert_eq!(config.later_pages.capacity, 3);
        assert_eq!(config.title.color, "00FF00");
    }

    #[test]
    fn discover_prefers_file_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "output_dir": "out" }"#).unwrap();

        let config = BatchConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn discover_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BatchConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.root_dir, PathBuf::from("reasoning practice"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = BatchConfig::discover(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, BildbandError::Config(_)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut config = BatchConfig::default();
        config.later_pages.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_crop_is_rejected() {
        let config = BatchConfig {
            crop: Cm(-0.1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn extension_strips_dot() {
        let config = BatchConfig {
            image_extension: ".PNG".into(),
            ..Default::default()
        };
        assert_eq!(config.extension(), "PNG");
    }
}
