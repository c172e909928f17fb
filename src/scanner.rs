//! Tree traversal for images and text corpora.
//!
//! Walks the image root to collect conversion candidates and walks each
//! corpus root to collect the text files that may reference them. Entries
//! that cannot be visited come back as [`AssetError::Walk`] so the caller
//! can log them and keep going.

use crate::config::{CorpusKind, CorpusRoot, OUTPUT_EXTENSION, SiteLayout};
use crate::error::{AssetError, AssetResult};
use crate::matcher;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// An image discovered under the image root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetFile {
    /// Absolute location on disk.
    pub path: PathBuf,
    /// Location relative to the image root.
    pub relative: PathBuf,
    /// Extension as written on disk, without the dot.
    pub extension: String,
}

impl AssetFile {
    /// Builds an asset for `path`, or `None` if it is outside `image_root`
    /// or has no UTF-8 extension.
    pub fn new(path: impl Into<PathBuf>, image_root: &Path) -> Option<Self> {
        let path = path.into();
        let relative = path.strip_prefix(image_root).ok()?.to_path_buf();
        let extension = path.extension()?.to_str()?.to_string();
        Some(Self {
            path,
            relative,
            extension,
        })
    }

    /// Relative path as it appears in page sources: `/`-separated.
    pub fn reference(&self) -> String {
        to_reference(&self.relative)
    }

    /// Sibling path the converted image is written to.
    pub fn converted_path(&self) -> PathBuf {
        self.path.with_extension(OUTPUT_EXTENSION)
    }

    /// The asset this one becomes once converted.
    pub fn converted(&self) -> AssetFile {
        AssetFile {
            path: self.converted_path(),
            relative: self.relative.with_extension(OUTPUT_EXTENSION),
            extension: OUTPUT_EXTENSION.to_string(),
        }
    }
}

/// Renders a relative path with `/` separators regardless of platform.
pub fn to_reference(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Collects every conversion candidate under the image root in a single pass.
///
/// Entries are visited in file-name order so runs are reproducible. Files
/// rejected by the matcher are dropped silently.
pub fn collect_candidates(layout: &SiteLayout) -> Vec<AssetResult<AssetFile>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(&layout.image_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                found.push(Err(walk_error(&layout.image_root, source)));
                continue;
            }
        };
        if !entry.file_type().is_file() || !matcher::is_candidate(entry.path(), layout) {
            continue;
        }
        if let Some(asset) = AssetFile::new(entry.into_path(), &layout.image_root) {
            found.push(Ok(asset));
        }
    }

    found
}

/// Collects the files a corpus root contributes to a rewrite pass.
///
/// A missing directory or config file contributes nothing.
pub fn collect_corpus_files(root: &CorpusRoot) -> Vec<AssetResult<PathBuf>> {
    match root.kind {
        CorpusKind::SingleFile => {
            if root.path.is_file() {
                vec![Ok(root.path.clone())]
            } else {
                Vec::new()
            }
        }
        CorpusKind::Tree { .. } => {
            if !root.path.is_dir() {
                return Vec::new();
            }
            let mut files = Vec::new();
            for entry in WalkDir::new(&root.path).sort_by_file_name() {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && root.accepts(entry.path()) => {
                        files.push(Ok(entry.into_path()));
                    }
                    Ok(_) => {}
                    Err(source) => files.push(Err(walk_error(&root.path, source))),
                }
            }
            files
        }
    }
}

fn walk_error(root: &Path, source: walkdir::Error) -> AssetError {
    let path = source.path().unwrap_or(root).to_path_buf();
    AssetError::Walk { path, source }
}
