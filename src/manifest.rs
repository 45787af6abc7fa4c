//! Manifest loading and caching.
//!
//! Each package directory carries a `rover.toml` marker manifest. Resolution
//! only cares about the `[dependencies]` section: every key in it names
//! another package, in file order. Values carry no meaning here (there is no
//! version solving). `[package]` key/values are kept as opaque metadata;
//! everything else is ignored.
//!
//! The parse is a minimal section-aware line scan, not a full TOML parse —
//! validating the complete manifest schema is out of scope.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::index::{PackageIndex, MANIFEST_FILE};

/// A package's declared interface to resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Package name (the directory name; a `name` key in `[package]` is
    /// metadata only).
    pub name: String,
    /// Direct dependencies in declaration order, duplicates collapsed to
    /// the first occurrence.
    pub depends: Vec<String>,
    /// Opaque `[package]` key/values.
    pub metadata: BTreeMap<String, String>,
}

/// Parse manifest content for the named package.
///
/// Fails with `InvalidPackage` on a malformed `[dependencies]` line: a
/// non-comment line without `=`, or one with an empty key.
pub fn parse_manifest(name: &str, content: &str) -> Result<Manifest> {
    let mut depends: Vec<String> = Vec::new();
    let mut metadata = BTreeMap::new();
    let mut section = String::new();

    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].trim().to_string();
            continue;
        }

        match section.as_str() {
            "dependencies" => {
                let dep = match trimmed.split_once('=') {
                    Some((key, _value)) => key.trim().trim_matches('"'),
                    None => {
                        return Err(Error::invalid(
                            name,
                            format!(
                                "malformed dependency on line {}: '{}'",
                                lineno + 1,
                                trimmed
                            ),
                        ));
                    }
                };
                if dep.is_empty() {
                    return Err(Error::invalid(
                        name,
                        format!("empty dependency name on line {}", lineno + 1),
                    ));
                }
                // First declaration wins; later repeats collapse.
                if !depends.iter().any(|d| d == dep) {
                    depends.push(dep.to_string());
                }
            }
            "package" => {
                if let Some((key, value)) = trimmed.split_once('=') {
                    let key = key.trim().trim_matches('"');
                    let value = value.trim().trim_matches('"');
                    metadata.insert(key.to_string(), value.to_string());
                }
            }
            // Unknown sections (and content before any section) are opaque.
            _ => {}
        }
    }

    Ok(Manifest {
        name: name.to_string(),
        depends,
        metadata,
    })
}

/// Per-package-name cache of parsed manifests.
///
/// Only successful parses are memoized; a failing package is re-read on the
/// next request. Loading happens under the lock, so concurrent first access
/// to a name parses it once.
#[derive(Default)]
pub struct ManifestCache {
    entries: Mutex<HashMap<String, Manifest>>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The manifest for `name`, resolved through `index`.
    ///
    /// Propagates `PackageNotFound` from the index; a located package whose
    /// manifest cannot be read or parsed fails with `InvalidPackage`.
    pub fn get(&self, index: &PackageIndex, name: &str) -> Result<Manifest> {
        let mut entries = self.entries.lock();
        if let Some(manifest) = entries.get(name) {
            return Ok(manifest.clone());
        }

        let dir = index.get_path(name)?;
        let path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::invalid(name, format!("cannot read '{}': {}", path.display(), e))
        })?;
        let manifest = parse_manifest(name, &content)?;

        entries.insert(name.to_string(), manifest.clone());
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::SearchRoots;

    // ── parse_manifest ─────────────────────────────────────────

    #[test]
    fn test_parse_dependencies_ordered() {
        let manifest = parse_manifest(
            "nav",
            r#"
[package]
name = "nav"
description = "waypoint navigation"

[dependencies]
geometry = "*"
imu_driver = "*"
common_msgs = "*"
"#,
        )
        .unwrap();
        assert_eq!(manifest.name, "nav");
        assert_eq!(
            manifest.depends,
            vec!["geometry", "imu_driver", "common_msgs"]
        );
        assert_eq!(manifest.metadata["description"], "waypoint navigation");
    }

    #[test]
    fn test_parse_duplicate_first_kept() {
        let manifest = parse_manifest(
            "p",
            "[dependencies]\na = \"1\"\nb = \"1\"\na = \"2\"\n",
        )
        .unwrap();
        assert_eq!(manifest.depends, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_no_dependencies_section() {
        let manifest = parse_manifest("p", "[package]\nname = \"p\"\n").unwrap();
        assert!(manifest.depends.is_empty());
    }

    #[test]
    fn test_parse_empty_file() {
        let manifest = parse_manifest("p", "").unwrap();
        assert!(manifest.depends.is_empty());
        assert!(manifest.metadata.is_empty());
    }

    #[test]
    fn test_parse_comments_and_unknown_sections_ignored() {
        let manifest = parse_manifest(
            "p",
            "# header\n[exports]\nplugin = \"x\"\n[dependencies]\n# dep list\nfoo = \"*\"\n",
        )
        .unwrap();
        assert_eq!(manifest.depends, vec!["foo"]);
    }

    #[test]
    fn test_parse_malformed_dependency_line() {
        let err = parse_manifest("p", "[dependencies]\njust a bare line\n").unwrap_err();
        match err {
            Error::InvalidPackage { name, detail } => {
                assert_eq!(name, "p");
                assert!(detail.contains("line 2"), "detail: {}", detail);
            }
            other => panic!("expected InvalidPackage, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_dependency_name() {
        let err = parse_manifest("p", "[dependencies]\n= \"1\"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidPackage { .. }));
    }

    // ── ManifestCache ──────────────────────────────────────────

    fn fixture_index(tmp: &std::path::Path) -> PackageIndex {
        let roots = SearchRoots::new(Some(tmp.to_str().unwrap()), Some(""));
        PackageIndex::new(roots)
    }

    fn write_pkg(root: &std::path::Path, name: &str, manifest: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
    }

    #[test]
    fn test_cache_returns_parsed_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        write_pkg(tmp.path(), "bar", "[dependencies]\nfoo = \"*\"\n");

        let index = fixture_index(tmp.path());
        let cache = ManifestCache::new();
        let manifest = cache.get(&index, "bar").unwrap();
        assert_eq!(manifest.depends, vec!["foo"]);
    }

    #[test]
    fn test_cache_serves_without_rereading() {
        let tmp = tempfile::tempdir().unwrap();
        write_pkg(tmp.path(), "bar", "[dependencies]\nfoo = \"*\"\n");

        let index = fixture_index(tmp.path());
        let cache = ManifestCache::new();
        assert_eq!(cache.get(&index, "bar").unwrap().depends, vec!["foo"]);

        // Rewrite on disk: the cached parse must keep being served.
        write_pkg(tmp.path(), "bar", "[dependencies]\nother = \"*\"\n");
        assert_eq!(cache.get(&index, "bar").unwrap().depends, vec!["foo"]);
    }

    #[test]
    fn test_unknown_package_propagates_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let index = fixture_index(tmp.path());
        let cache = ManifestCache::new();
        assert_eq!(
            cache.get(&index, "ghost").unwrap_err(),
            Error::not_found("ghost")
        );
    }

    #[test]
    fn test_unreadable_manifest_is_invalid_package() {
        let tmp = tempfile::tempdir().unwrap();
        write_pkg(tmp.path(), "broken", "[dependencies]\n");
        let index = fixture_index(tmp.path());
        // Index the package, then remove its manifest out from under us.
        index.get_path("broken").unwrap();
        std::fs::remove_file(tmp.path().join("broken").join(MANIFEST_FILE)).unwrap();

        let cache = ManifestCache::new();
        let err = cache.get(&index, "broken").unwrap_err();
        match err {
            Error::InvalidPackage { name, .. } => assert_eq!(name, "broken"),
            other => panic!("expected InvalidPackage, got {:?}", other),
        }
    }
}
