//! Site layout configuration.
//!
//! Every path the pipeline touches is resolved once into a [`SiteLayout`]
//! and handed to the orchestrator. Defaults match a Zola-style site:
//! images under `static/images`, pages under `content`, structured data under
//! `data`, and a top-level `config.toml`.

use std::path::{Path, PathBuf};

/// Image extensions eligible for conversion. Matching is case-sensitive.
pub const TARGET_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

/// Extension given to converted images.
pub const OUTPUT_EXTENSION: &str = "webp";

pub const CONTENT_EXTENSIONS: &[&str] = &["md", "html", "toml"];
pub const DATA_EXTENSIONS: &[&str] = &["toml", "yaml", "json"];

pub const DEFAULT_IMAGES_DIR: &str = "static/images";
pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_EXCLUDES: &[&str] = &["teams"];

/// How a corpus root selects the files it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusKind {
    /// Recursive directory scan limited to the given extensions.
    Tree { extensions: &'static [&'static str] },
    /// One file, scanned regardless of extension when it exists.
    SingleFile,
}

/// A directory tree or single file scanned for references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRoot {
    pub path: PathBuf,
    pub kind: CorpusKind,
}

impl CorpusRoot {
    pub fn tree(path: impl Into<PathBuf>, extensions: &'static [&'static str]) -> Self {
        Self {
            path: path.into(),
            kind: CorpusKind::Tree { extensions },
        }
    }

    pub fn single_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: CorpusKind::SingleFile,
        }
    }

    /// Whether `path` belongs to this root's extension filter.
    pub fn accepts(&self, path: &Path) -> bool {
        match &self.kind {
            CorpusKind::SingleFile => path == self.path,
            CorpusKind::Tree { extensions } => path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| *e == ext)),
        }
    }
}

/// Resolved paths for one run.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    pub root: PathBuf,
    pub image_root: PathBuf,
    /// Absolute directories whose contents are never converted.
    pub excluded: Vec<PathBuf>,
    pub content_dir: PathBuf,
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
}

impl SiteLayout {
    /// Builds the default layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let image_root = root.join(DEFAULT_IMAGES_DIR);
        let excluded = DEFAULT_EXCLUDES.iter().map(|d| image_root.join(d)).collect();
        Self {
            content_dir: root.join(DEFAULT_CONTENT_DIR),
            data_dir: root.join(DEFAULT_DATA_DIR),
            config_file: root.join(DEFAULT_CONFIG_FILE),
            image_root,
            excluded,
            root,
        }
    }

    /// Moves the image root, keeping excluded directories relative to it.
    pub fn with_image_root(mut self, dir: impl AsRef<Path>) -> Self {
        let relative: Vec<PathBuf> = self
            .excluded
            .iter()
            .filter_map(|ex| ex.strip_prefix(&self.image_root).ok())
            .map(Path::to_path_buf)
            .collect();
        self.image_root = self.root.join(dir);
        self.excluded = relative.iter().map(|r| self.image_root.join(r)).collect();
        self
    }

    /// Replaces the exclusion set with directories relative to the image root.
    pub fn with_excludes<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.excluded = dirs
            .into_iter()
            .map(|d| self.image_root.join(d))
            .collect();
        self
    }

    pub fn with_content_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.content_dir = self.root.join(dir);
        self
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = self.root.join(dir);
        self
    }

    pub fn with_config_file(mut self, file: impl AsRef<Path>) -> Self {
        self.config_file = self.root.join(file);
        self
    }

    /// The three roots scanned for references, in scan order.
    pub fn corpus_roots(&self) -> Vec<CorpusRoot> {
        vec![
            CorpusRoot::tree(&self.content_dir, CONTENT_EXTENSIONS),
            CorpusRoot::tree(&self.data_dir, DATA_EXTENSIONS),
            CorpusRoot::single_file(&self.config_file),
        ]
    }
}
