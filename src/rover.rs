//! The `Rover` facade: one value combining search roots, package index,
//! manifest cache, and dependency resolution.

use std::path::PathBuf;

use crate::depends::DependencyResolver;
use crate::environment::SearchRoots;
use crate::error::Result;
use crate::index::PackageIndex;
use crate::manifest::{Manifest, ManifestCache};

/// Entry point for package queries.
///
/// Each instance owns its own index and manifest cache; nothing is shared
/// across instances and there is no process-wide state. Configuration is
/// fixed at construction: `None` falls back to the `ROVER_ROOT` /
/// `ROVER_PACKAGE_PATH` environment keys, read once.
pub struct Rover {
    index: PackageIndex,
    manifests: ManifestCache,
}

impl Rover {
    /// Construct with explicit overrides. `Some("")` means "search nothing
    /// for this source"; `None` defers to the environment.
    pub fn new(root: Option<&str>, package_path: Option<&str>) -> Self {
        let roots = SearchRoots::new(root, package_path);
        Rover {
            index: PackageIndex::new(roots),
            manifests: ManifestCache::new(),
        }
    }

    /// Construct entirely from the environment.
    pub fn from_env() -> Self {
        Rover::new(None, None)
    }

    /// The resolved primary root string, if any.
    pub fn root(&self) -> Option<&str> {
        self.index.roots().root()
    }

    /// The resolved secondary path string, if any.
    pub fn package_path(&self) -> Option<&str> {
        self.index.roots().package_path()
    }

    /// All package names under the configured roots, sorted.
    pub fn list_packages(&self) -> Vec<String> {
        self.index.list_packages()
    }

    /// Absolute path of the named package.
    pub fn get_path(&self, name: &str) -> Result<PathBuf> {
        self.index.get_path(name)
    }

    /// The named package's parsed manifest.
    pub fn get_manifest(&self, name: &str) -> Result<Manifest> {
        self.manifests.get(&self.index, name)
    }

    /// Direct dependencies in declaration order, first occurrence kept.
    pub fn get_direct_depends(&self, name: &str) -> Result<Vec<String>> {
        DependencyResolver::new(&self.index, &self.manifests).direct(name)
    }

    /// Transitive dependencies of `name`, excluding `name` itself.
    pub fn get_depends(&self, name: &str) -> Result<Vec<String>> {
        DependencyResolver::new(&self.index, &self.manifests).transitive(name)
    }

    /// Drop the discovery cache so the next query re-crawls the roots.
    pub fn reload(&self) {
        self.index.reload();
    }
}
