//! Search root configuration.
//!
//! A `Rover` instance crawls an ordered set of filesystem roots: an optional
//! primary root plus an optional list of secondary roots. Both default to
//! environment values read once at construction:
//!
//!   - `ROVER_ROOT` — the primary root.
//!   - `ROVER_PACKAGE_PATH` — secondary roots, joined with the platform
//!     path-list separator (`:` on Unix, `;` on Windows).
//!
//! An explicit empty override is not the same as no override: `Some("")`
//! means "search nothing for this source" and never falls back to the
//! environment.

use std::path::{Path, PathBuf};

/// Environment key for the primary search root.
pub const ROVER_ROOT: &str = "ROVER_ROOT";

/// Environment key for the secondary search roots.
pub const ROVER_PACKAGE_PATH: &str = "ROVER_PACKAGE_PATH";

/// One crawl entry point. Lower rank wins on package name collision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRoot {
    pub path: PathBuf,
    /// 0 for the primary root, 1.. for secondary roots in list order.
    pub rank: usize,
}

/// The ordered, ranked set of roots a package index crawls.
#[derive(Clone, Debug)]
pub struct SearchRoots {
    root: Option<String>,
    package_path: Option<String>,
    ordered: Vec<SearchRoot>,
}

impl SearchRoots {
    /// Build the root set. `None` falls back to the corresponding
    /// environment key; the environment is read once, here.
    pub fn new(root: Option<&str>, package_path: Option<&str>) -> Self {
        let root = match root {
            Some(r) => Some(r.to_string()),
            None => std::env::var(ROVER_ROOT).ok(),
        };
        let package_path = match package_path {
            Some(p) => Some(p.to_string()),
            None => std::env::var(ROVER_PACKAGE_PATH).ok(),
        };

        let mut ordered = Vec::new();
        if let Some(ref r) = root {
            if !r.is_empty() {
                ordered.push(SearchRoot {
                    path: absolutize(Path::new(r)),
                    rank: 0,
                });
            }
        }
        if let Some(ref pp) = package_path {
            let mut next_rank = 1;
            for entry in std::env::split_paths(pp) {
                if entry.as_os_str().is_empty() {
                    continue;
                }
                ordered.push(SearchRoot {
                    path: absolutize(&entry),
                    rank: next_rank,
                });
                next_rank += 1;
            }
        }

        SearchRoots {
            root,
            package_path,
            ordered,
        }
    }

    /// The resolved primary root string (override or environment).
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// The resolved secondary path string (override or environment).
    pub fn package_path(&self) -> Option<&str> {
        self.package_path.as_deref()
    }

    /// Roots in precedence order, primary first.
    pub fn ordered(&self) -> &[SearchRoot] {
        &self.ordered
    }
}

/// Anchor a relative path to the current directory so package records carry
/// absolute paths. No symlink resolution.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-default fallback is exercised through explicit overrides only:
    // set_var races in parallel tests.

    #[test]
    fn test_explicit_roots_ordered() {
        let roots = SearchRoots::new(Some("/opt/stacks/core"), Some("/a:/b"));
        let ordered = roots.ordered();
        assert_eq!(ordered.len(), 3);
        assert_eq!(ordered[0].path, PathBuf::from("/opt/stacks/core"));
        assert_eq!(ordered[0].rank, 0);
        assert_eq!(ordered[1].path, PathBuf::from("/a"));
        assert_eq!(ordered[1].rank, 1);
        assert_eq!(ordered[2].path, PathBuf::from("/b"));
        assert_eq!(ordered[2].rank, 2);
    }

    #[test]
    fn test_explicit_empty_searches_nothing() {
        // Some("") must not fall back to the environment.
        let roots = SearchRoots::new(Some(""), Some(""));
        assert_eq!(roots.root(), Some(""));
        assert_eq!(roots.package_path(), Some(""));
        assert!(roots.ordered().is_empty());
    }

    #[test]
    fn test_package_path_only() {
        let roots = SearchRoots::new(Some(""), Some("/x/y"));
        let ordered = roots.ordered();
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].path, PathBuf::from("/x/y"));
        // Secondary roots never claim the primary rank.
        assert_eq!(ordered[0].rank, 1);
    }

    #[test]
    fn test_empty_path_entries_skipped() {
        let roots = SearchRoots::new(Some("/root"), Some(":/only:"));
        let ordered = roots.ordered();
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[1].path, PathBuf::from("/only"));
    }

    #[test]
    fn test_relative_root_absolutized() {
        let roots = SearchRoots::new(Some("rel/pkgs"), Some(""));
        assert!(roots.ordered()[0].path.is_absolute());
        assert!(roots.ordered()[0].path.ends_with("rel/pkgs"));
    }
}
