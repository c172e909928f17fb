//! Candidate selection for the image tree.

use crate::config::{SiteLayout, TARGET_EXTENSIONS};
use std::path::{Path, PathBuf};

/// Returns true when `path` sits strictly below `dir` at any depth.
///
/// Comparison is per path component, so `teams-archive/a.png` is not inside
/// `teams`.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    path.ancestors().skip(1).any(|ancestor| ancestor == dir)
}

pub fn is_excluded(path: &Path, excluded: &[PathBuf]) -> bool {
    excluded.iter().any(|dir| is_within(path, dir))
}

pub fn has_target_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TARGET_EXTENSIONS.iter().any(|e| *e == ext))
}

/// Whether a file under the image root should be converted.
pub fn is_candidate(path: &Path, layout: &SiteLayout) -> bool {
    has_target_extension(path) && !is_excluded(path, &layout.excluded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SiteLayout {
        SiteLayout::new("/site")
    }

    #[test]
    fn accepts_listed_extensions_in_both_cases() {
        for name in ["a.jpg", "a.jpeg", "a.png", "a.JPG", "a.JPEG", "a.PNG"] {
            let path = PathBuf::from("/site/static/images/events").join(name);
            assert!(is_candidate(&path, &layout()), "{name} should match");
        }
    }

    #[test]
    fn rejects_mixed_case_and_other_formats() {
        for name in ["a.Jpg", "a.pNg", "a.webp", "a.gif", "a.svg", "jpg"] {
            let path = PathBuf::from("/site/static/images/events").join(name);
            assert!(!is_candidate(&path, &layout()), "{name} should not match");
        }
    }

    #[test]
    fn excludes_direct_children_of_excluded_dir() {
        let path = Path::new("/site/static/images/teams/alice.jpg");
        assert!(!is_candidate(path, &layout()));
    }

    #[test]
    fn excludes_nested_descendants() {
        let path = Path::new("/site/static/images/teams/2025/core/bob.png");
        assert!(!is_candidate(path, &layout()));
    }

    #[test]
    fn sibling_with_shared_prefix_is_not_excluded() {
        let path = Path::new("/site/static/images/teams-archive/bob.png");
        assert!(is_candidate(path, &layout()));
    }

    #[test]
    fn same_name_elsewhere_is_not_excluded() {
        let path = Path::new("/site/static/images/events/teams/photo.jpg");
        assert!(is_candidate(path, &layout()));
    }

    #[test]
    fn directory_is_not_within_itself() {
        let dir = Path::new("/site/static/images/teams");
        assert!(!is_within(dir, dir));
        assert!(is_within(&dir.join("x.png"), dir));
    }
}
