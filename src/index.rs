//! Package discovery index.
//!
//! Crawls the configured search roots once, building a name → location map.
//! A directory is a package iff it directly contains `rover.toml`; packages
//! cannot nest, so the crawl stops descending at a marker. Name collisions
//! resolve first-wins by root rank. The crawl is memoized: the filesystem is
//! touched at most once per index instance, on the first query, and never
//! re-touched until an explicit [`PackageIndex::reload`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::environment::SearchRoots;
use crate::error::{Error, Result};

/// The manifest marker file identifying a directory as a package.
pub const MANIFEST_FILE: &str = "rover.toml";

/// A discovered package: where it lives and which root claimed it.
#[derive(Clone, Debug)]
pub struct PackageRecord {
    pub name: String,
    pub path: PathBuf,
    pub rank: usize,
}

/// Build-once index over the search roots.
pub struct PackageIndex {
    roots: SearchRoots,
    // None = not yet built, Some = built. Building happens under the lock,
    // so concurrent first queries still produce exactly one crawl.
    cache: Mutex<Option<HashMap<String, PackageRecord>>>,
}

impl PackageIndex {
    pub fn new(roots: SearchRoots) -> Self {
        PackageIndex {
            roots,
            cache: Mutex::new(None),
        }
    }

    pub fn roots(&self) -> &SearchRoots {
        &self.roots
    }

    /// All indexed package names, sorted.
    pub fn list_packages(&self) -> Vec<String> {
        self.with_index(|map| {
            let mut names: Vec<String> = map.keys().cloned().collect();
            names.sort();
            names
        })
    }

    /// Absolute path of a package, or `PackageNotFound`.
    pub fn get_path(&self, name: &str) -> Result<PathBuf> {
        self.with_index(|map| map.get(name).map(|rec| rec.path.clone()))
            .ok_or_else(|| Error::not_found(name))
    }

    /// Full record of a package, or `PackageNotFound`.
    pub fn get_record(&self, name: &str) -> Result<PackageRecord> {
        self.with_index(|map| map.get(name).cloned())
            .ok_or_else(|| Error::not_found(name))
    }

    /// Drop the memoized crawl; the next query rebuilds it. Never invoked
    /// implicitly.
    pub fn reload(&self) {
        *self.cache.lock() = None;
    }

    fn with_index<T>(&self, f: impl FnOnce(&HashMap<String, PackageRecord>) -> T) -> T {
        let mut cache = self.cache.lock();
        let map = cache.get_or_insert_with(|| crawl(&self.roots));
        f(map)
    }
}

/// Crawl every root in rank order. First registration of a name wins; later
/// duplicates are dropped silently.
fn crawl(roots: &SearchRoots) -> HashMap<String, PackageRecord> {
    let mut map = HashMap::new();
    for root in roots.ordered() {
        crawl_root(&root.path, root.rank, &mut map);
    }
    map
}

/// Explicit-stack descent of a single root. Bounded by the tree, not the
/// call stack.
fn crawl_root(root: &Path, rank: usize, map: &mut HashMap<String, PackageRecord>) {
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        if dir.join(MANIFEST_FILE).is_file() {
            register(&dir, rank, map);
            // Packages cannot nest: do not descend further.
            continue;
        }

        // Unreadable directory: skip the subtree, keep crawling siblings.
        let entries = match std::fs::read_dir(&dir) {
            Ok(e) => e,
            Err(_) => continue,
        };

        let mut children: Vec<PathBuf> = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            // Do not follow directory symlinks; a link loop would otherwise
            // make the crawl unbounded.
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(_) => continue,
            };
            if file_type.is_dir() {
                children.push(entry.path());
            }
        }
        // Sorted visit order keeps intra-root collisions deterministic.
        children.sort();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
}

/// Register a package directory under its own directory name, unless that
/// name is already claimed by an earlier root or an earlier sibling.
fn register(dir: &Path, rank: usize, map: &mut HashMap<String, PackageRecord>) {
    let name = match dir.file_name() {
        Some(n) => n.to_string_lossy().into_owned(),
        None => return,
    };
    if map.contains_key(&name) {
        return;
    }
    map.insert(
        name.clone(),
        PackageRecord {
            name,
            path: dir.to_path_buf(),
            rank,
        },
    );
}
