// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Directory walker: subfolders of the root become folders, matching image
// files inside them become pages' pictures. Both levels come back in natural
// order.

use std::path::Path;

use bildband_core::error::{BildbandError, Result};
use bildband_core::natural::natural_cmp;
use bildband_core::types::{Folder, ImageFile};
use tracing::debug;

/// List the subfolders of `root` with their images.
///
/// Plain files directly inside `root` are ignored. `extension` is matched
/// case-insensitively and without the leading dot.
pub fn scan_root(root: &Path, extension: &str) -> Result<Vec<Folder>> {
    if !root.is_dir() {
        return Err(BildbandError::MissingRoot(root.to_path_buf()));
    }

    let mut folders = Vec::new();
    for (path, name) in list_entries(root)? {
        if !path.is_dir() {
            continue;
        }
        let images = scan_folder(&path, extension)?;
        debug!(folder = %name, images = images.len(), "Found folder");
        folders.push(Folder { path, name, images });
    }

    folders.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    Ok(folders)
}

/// Images directly inside `dir`, in natural order.
pub fn scan_folder(dir: &Path, extension: &str) -> Result<Vec<ImageFile>> {
    let mut images: Vec<ImageFile> = list_entries(dir)?
        .into_iter()
        .filter(|(path, _)| path.is_file() && has_extension(path, extension))
        .map(|(path, name)| ImageFile::new(path, name))
        .collect();

    images.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.name.cmp(&b.name)));
    Ok(images)
}

fn list_entries(dir: &Path) -> Result<Vec<(std::path::PathBuf, String)>> {
    let walk_error = |source| BildbandError::Walk {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(walk_error)? {
        let entry = entry.map_err(walk_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((entry.path(), name));
    }
    Ok(entries)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn folders_and_images_in_natural_order() {
        let root = tempfile::tempdir().unwrap();
        for folder in ["Lecture 10", "Lecture 2", "Lecture 1"] {
            fs::create_dir(root.path().join(folder)).unwrap();
        }
        let lecture2 = root.path().join("Lecture 2");
        for name in ["img10.png", "img2.png", "img1.png"] {
            touch(&lecture2.join(name));
        }

        let folders = scan_root(root.path(), "png").unwrap();
        let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Lecture 1", "Lecture 2", "Lecture 10"]);

        let images: Vec<_> = folders[1].images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(images, vec!["img1.png", "img2.png", "img10.png"]);
        assert!(folders[0].images.is_empty());
    }

    #[test]
    fn only_matching_files_are_images() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("week");
        fs::create_dir(&dir).unwrap();
        touch(&dir.join("a.png"));
        touch(&dir.join("b.PNG"));
        touch(&dir.join("notes.txt"));
        touch(&dir.join("png"));
        fs::create_dir(dir.join("nested.png")).unwrap();

        let images = scan_folder(&dir, "png").unwrap();
        let names: Vec<_> = images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.PNG"]);
    }

    #[test]
    fn files_in_root_are_ignored() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("stray.png"));
        fs::create_dir(root.path().join("only")).unwrap();

        let folders = scan_root(root.path(), "png").unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "only");
    }

    #[test]
    fn missing_root_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let err = scan_root(&root.path().join("absent"), "png").unwrap_err();
        assert!(matches!(err, BildbandError::MissingRoot(_)));
    }
}
