use thiserror::Error;

/// Failures surfaced by package lookup and dependency resolution.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The name is absent from a fully built index.
    #[error("package '{name}' not found on any search root")]
    PackageNotFound { name: String },

    /// The package was located but its manifest is missing, unreadable,
    /// or malformed.
    #[error("invalid package '{name}': {detail}")]
    InvalidPackage { name: String, detail: String },
}

impl Error {
    pub fn not_found(name: impl Into<String>) -> Self {
        Error::PackageNotFound { name: name.into() }
    }

    pub fn invalid(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::InvalidPackage {
            name: name.into(),
            detail: detail.into(),
        }
    }

    /// The package name the failure is about.
    pub fn package(&self) -> &str {
        match self {
            Error::PackageNotFound { name } => name,
            Error::InvalidPackage { name, .. } => name,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
