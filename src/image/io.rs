//! Loading helpers for frames and template directories via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::util::{TriFindError, TriFindResult};
use ::image::DynamicImage;
use std::fs;
use std::path::Path;

/// File extensions accepted as template images (compared case-insensitively).
pub const TEMPLATE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Loads and decodes a frame image from disk.
pub fn load_image<P: AsRef<Path>>(path: P) -> TriFindResult<DynamicImage> {
    ::image::open(path).map_err(|err| TriFindError::ImageIo {
        reason: err.to_string(),
    })
}

/// Returns `true` if `path` has one of [`TEMPLATE_EXTENSIONS`].
pub fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            TEMPLATE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Decodes every template image in `dir`, ordered by file name.
///
/// Subdirectories and files with other extensions are skipped. Any file that
/// fails to decode aborts loading with [`TriFindError::TemplateDecode`].
pub fn load_template_images<P: AsRef<Path>>(
    dir: P,
) -> TriFindResult<Vec<(String, DynamicImage)>> {
    let dir = dir.as_ref();
    let unreadable = |err: std::io::Error| TriFindError::TemplateDirUnreadable {
        path: dir.display().to_string(),
        reason: err.to_string(),
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        if path.is_dir() || !is_template_file(&path) {
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let img = ::image::open(&path).map_err(|err| TriFindError::TemplateDecode {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        images.push((name, img));
    }
    Ok(images)
}
