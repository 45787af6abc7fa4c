//! rover — package discovery and dependency resolution over component trees.
//!
//! A package is a directory directly containing a `rover.toml` manifest.
//! [`Rover`] crawls one or more ranked search roots, indexes every package
//! it finds (first root to claim a name wins), and answers "where is
//! package X" and "what does package X transitively require" from the
//! manifests. Discovery and manifest parses are cached for the lifetime of
//! the instance; the filesystem is crawled at most once per instance unless
//! [`Rover::reload`] is called.

pub mod depends;
pub mod environment;
pub mod error;
pub mod index;
pub mod manifest;
pub mod rover;

pub use depends::DependencyResolver;
pub use environment::{SearchRoot, SearchRoots, ROVER_PACKAGE_PATH, ROVER_ROOT};
pub use error::{Error, Result};
pub use index::{PackageIndex, PackageRecord, MANIFEST_FILE};
pub use manifest::{parse_manifest, Manifest, ManifestCache};
pub use rover::Rover;
