//! Reference rewriting across the site's text corpora.
//!
//! Replacement is a plain literal substitution of every occurrence of the old
//! relative path. It has no notion of path boundaries, so `1.jpg` also
//! rewrites inside `21.jpg`.

use crate::config::CorpusRoot;
use crate::error::{AssetError, AssetResult};
use crate::scanner::{self, AssetFile};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Old and new relative image paths for one rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferencePathPair {
    pub old: String,
    pub new: String,
}

impl ReferencePathPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Pair for an original asset and the file it was converted to.
    pub fn for_conversion(original: &AssetFile, converted: &AssetFile) -> Self {
        Self::new(original.reference(), converted.reference())
    }
}

/// Files changed and failures hit during one rewrite pass.
#[derive(Debug, Default)]
pub struct RewriteOutcome {
    pub updated: Vec<PathBuf>,
    /// Read, write, and walk failures. Decode skips are not recorded.
    pub errors: Vec<AssetError>,
}

impl RewriteOutcome {
    pub fn files_updated(&self) -> usize {
        self.updated.len()
    }
}

/// Replaces every occurrence of `old` in `content`.
///
/// Returns `None` when `old` does not occur, so callers can skip the write.
pub fn replace_literal(content: &str, old: &str, new: &str) -> Option<String> {
    if old.is_empty() || !content.contains(old) {
        return None;
    }
    Some(content.replace(old, new))
}

/// Rewrites one file in place. Returns whether it was modified.
///
/// A file that is not valid UTF-8 yields [`AssetError::DecodeSkip`].
pub fn rewrite_file(path: &Path, pair: &ReferencePathPair) -> AssetResult<bool> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| AssetError::DecodeSkip {
        path: path.to_path_buf(),
    })?;

    let Some(new_content) = replace_literal(&content, &pair.old, &pair.new) else {
        return Ok(false);
    };

    std::fs::write(path, new_content).map_err(|source| AssetError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Applies `pair` to every eligible file under each root.
///
/// A failure on one file never stops the scan of the rest.
pub fn rewrite_references(roots: &[CorpusRoot], pair: &ReferencePathPair) -> RewriteOutcome {
    let mut outcome = RewriteOutcome::default();
    for root in roots {
        rewrite_files(scanner::collect_corpus_files(root), pair, &mut outcome);
    }
    outcome
}

/// Applies `pair` to each listed file, recording results in `outcome`.
pub fn rewrite_files<I>(files: I, pair: &ReferencePathPair, outcome: &mut RewriteOutcome)
where
    I: IntoIterator<Item = AssetResult<PathBuf>>,
{
    for file in files {
        let result = file.and_then(|path| rewrite_file(&path, pair).map(|hit| (path, hit)));
        match result {
            Ok((path, true)) => outcome.updated.push(path),
            Ok((_, false)) => {}
            Err(err) if err.is_silent() => {}
            Err(err) => outcome.errors.push(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CONTENT_EXTENSIONS, DATA_EXTENSIONS};
    use std::fs;
    use tempfile::TempDir;

    fn pair() -> ReferencePathPair {
        ReferencePathPair::new("events/2025/hack36/1.jpg", "events/2025/hack36/1.webp")
    }

    fn write(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn replaces_every_occurrence() {
        let content = "![a](/images/x/1.jpg)\n<img src=\"/images/x/1.jpg\">";
        let result = replace_literal(content, "x/1.jpg", "x/1.webp").unwrap();
        assert_eq!(result, "![a](/images/x/1.webp)\n<img src=\"/images/x/1.webp\">");
    }

    #[test]
    fn no_match_returns_none() {
        assert!(replace_literal("nothing here", "x/1.jpg", "x/1.webp").is_none());
    }

    #[test]
    fn empty_needle_never_matches() {
        assert!(replace_literal("abc", "", "x").is_none());
    }

    #[test]
    fn substring_of_longer_path_is_also_rewritten() {
        let result = replace_literal("gallery/21.jpg", "1.jpg", "1.webp").unwrap();
        assert_eq!(result, "gallery/21.webp");
    }

    #[test]
    fn rewrite_file_leaves_unmatched_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "page.md", b"no images");
        assert!(!rewrite_file(&path, &pair()).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "no images");
    }

    #[test]
    fn binary_file_is_a_decode_skip() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "blob.toml", &[0xff, 0xfe, 0x00, 0x81]);
        let err = rewrite_file(&path, &pair()).unwrap_err();
        assert!(matches!(err, AssetError::DecodeSkip { .. }));
    }

    #[test]
    fn rewrites_across_all_roots() {
        let site = TempDir::new().unwrap();
        let root = site.path();
        let page = write(root, "content/events/hack36.md", b"cover = \"events/2025/hack36/1.jpg\"");
        let data = write(root, "data/gallery.yaml", b"- events/2025/hack36/1.jpg");
        let config = write(root, "config.toml", b"og_image = \"events/2025/hack36/1.jpg\"");
        write(root, "data/notes.md", b"events/2025/hack36/1.jpg");
        write(root, "data/blob.json", &[0xc3, 0x28]);

        let roots = vec![
            CorpusRoot::tree(root.join("content"), CONTENT_EXTENSIONS),
            CorpusRoot::tree(root.join("data"), DATA_EXTENSIONS),
            CorpusRoot::single_file(root.join("config.toml")),
        ];
        let outcome = rewrite_references(&roots, &pair());

        assert_eq!(outcome.updated, vec![page.clone(), data.clone(), config.clone()]);
        assert!(outcome.errors.is_empty());
        assert!(fs::read_to_string(&page).unwrap().contains("hack36/1.webp"));
        assert_eq!(fs::read_to_string(&data).unwrap(), "- events/2025/hack36/1.webp");
        assert_eq!(
            fs::read_to_string(root.join("data/notes.md")).unwrap(),
            "events/2025/hack36/1.jpg"
        );
    }

    #[test]
    fn unreadable_file_does_not_stop_the_scan() {
        let dir = TempDir::new().unwrap();
        let vanished = dir.path().join("a.md");
        let page = write(dir.path(), "b.md", b"![](events/2025/hack36/1.jpg)");

        let mut outcome = RewriteOutcome::default();
        rewrite_files([Ok(vanished.clone()), Ok(page.clone())], &pair(), &mut outcome);

        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(&outcome.errors[0], AssetError::Read { path, .. } if *path == vanished));
        assert_eq!(outcome.updated, vec![page.clone()]);
        assert_eq!(fs::read_to_string(page).unwrap(), "![](events/2025/hack36/1.webp)");
    }

    #[test]
    fn decode_skips_are_not_recorded_as_errors() {
        let dir = TempDir::new().unwrap();
        let blob = write(dir.path(), "blob.md", &[0xff, 0xfe]);
        let page = write(dir.path(), "page.md", b"events/2025/hack36/1.jpg");

        let mut outcome = RewriteOutcome::default();
        rewrite_files([Ok(blob), Ok(page.clone())], &pair(), &mut outcome);

        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.updated, vec![page]);
    }

    #[test]
    fn absent_roots_yield_zero_updates() {
        let site = TempDir::new().unwrap();
        let roots = vec![
            CorpusRoot::tree(site.path().join("content"), CONTENT_EXTENSIONS),
            CorpusRoot::single_file(site.path().join("config.toml")),
        ];
        let outcome = rewrite_references(&roots, &pair());
        assert_eq!(outcome.files_updated(), 0);
        assert!(outcome.errors.is_empty());
    }
}
