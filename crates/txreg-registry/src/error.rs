use std::fmt;
use std::path::{Path, PathBuf};

use txreg_schema::{SchemaError, Violations};

/// Classification of a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The expected config document does not exist.
    MissingConfig,
    /// The document exists but is not valid JSON.
    MalformedJson,
    /// The document parsed but does not match the transformer spec.
    SchemaViolation,
    /// Anything else; the underlying cause is preserved.
    Unclassified,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingConfig => "missing config",
            ErrorKind::MalformedJson => "malformed JSON",
            ErrorKind::SchemaViolation => "schema violation",
            ErrorKind::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a registry build.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No config document at a leaf directory.
    #[error("config not present at: {path}")]
    MissingConfig { path: PathBuf },

    /// Config document is not syntactically valid JSON.
    #[error("config at: {path} has malformed JSON: {source}")]
    MalformedJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Config document violates the transformer spec.
    #[error("config at: {path} does not match transformer spec: {violations}")]
    SchemaViolation {
        path: PathBuf,
        violations: Violations,
    },

    /// A filesystem operation failed for a reason other than a missing file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The registry could not be rendered as JSON.
    #[error("failed to serialize registry: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The name collator could not be loaded.
    #[error("failed to load name collator: {0}")]
    Collation(String),

    /// The transformer schema itself could not be prepared.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::MissingConfig { .. } => ErrorKind::MissingConfig,
            RegistryError::MalformedJson { .. } => ErrorKind::MalformedJson,
            RegistryError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            RegistryError::Io { .. }
            | RegistryError::Serialize(_)
            | RegistryError::Collation(_)
            | RegistryError::Schema(_) => ErrorKind::Unclassified,
        }
    }

    /// The offending path, when the failure is tied to one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            RegistryError::MissingConfig { path }
            | RegistryError::MalformedJson { path, .. }
            | RegistryError::SchemaViolation { path, .. }
            | RegistryError::Io { path, .. } => Some(path),
            RegistryError::Serialize(_)
            | RegistryError::Collation(_)
            | RegistryError::Schema(_) => None,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        RegistryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
