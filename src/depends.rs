//! Dependency resolution over the discovered package set.
//!
//! The dependency graph is never materialized: each step asks the manifest
//! cache for one package's declared direct dependencies and walks outward.
//! The transitive walk is a work-queue traversal driven by an explicit
//! visited set, so declared cycles terminate instead of recursing forever.

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::index::PackageIndex;
use crate::manifest::ManifestCache;

/// Computes direct and transitive dependency sets for one index + cache
/// pair. Stateless beyond the borrows; construct freely per call.
pub struct DependencyResolver<'a> {
    index: &'a PackageIndex,
    manifests: &'a ManifestCache,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(index: &'a PackageIndex, manifests: &'a ManifestCache) -> Self {
        DependencyResolver { index, manifests }
    }

    /// Dependencies exactly as declared for `name`, first occurrence kept.
    pub fn direct(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.manifests.get(self.index, name)?.depends)
    }

    /// Transitive closure of the direct-dependency relation from `name`,
    /// excluding `name` itself, in discovery order.
    ///
    /// All-or-nothing: any unresolvable or invalid package reached by the
    /// walk fails the whole call with an error naming that package. A bad
    /// manifest on a package the walk never reaches has no effect.
    pub fn transitive(&self, name: &str) -> Result<Vec<String>> {
        let mut result: Vec<String> = Vec::new();
        // Seeding visited with the start keeps it out of the result even
        // when a cycle leads back to it, and stops re-expansion.
        let mut visited: HashSet<String> = HashSet::from([name.to_string()]);
        let mut frontier: VecDeque<String> = self.direct(name)?.into();

        while let Some(dep) = frontier.pop_front() {
            if !visited.insert(dep.clone()) {
                continue;
            }
            for next in self.direct(&dep)? {
                if !visited.contains(&next) {
                    frontier.push_back(next);
                }
            }
            result.push(dep);
        }

        Ok(result)
    }
}
