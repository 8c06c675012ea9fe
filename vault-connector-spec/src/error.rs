use thiserror::Error;

/// Result alias for vault operations.
pub type Result<T> = core::result::Result<T, VaultError>;

/// Canonical vault connector error surface.
///
/// Guard failures (`EmptyComponent`, `InvalidCharacters`,
/// `InvalidKeyMaterial`, the `Unsupported*` variants) are raised before any
/// storage or network access. `AlreadyExists`/`NotFound` are expected
/// caller-handled conditions. Everything else from a backend is wrapped into
/// `Backend` at the boundary of the public method that triggered it; no
/// operation is retried and partial effects of multi-step operations are not
/// rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("{field} must not be empty")]
    EmptyComponent { field: &'static str },
    #[error("{field} contains invalid characters: {value}")]
    InvalidCharacters { field: &'static str, value: String },
    #[error("invalid {field}: {reason}")]
    InvalidKeyMaterial { field: &'static str, reason: String },
    #[error("key type not supported: {0}")]
    UnsupportedKeyType(String),
    #[error("encryption type not supported: {0}")]
    UnsupportedEncryptionType(String),
    #[error("{entity} already exists")]
    AlreadyExists { entity: String },
    #[error("{entity} not found")]
    NotFound { entity: String },
    #[error("{operation} is not supported by this connector")]
    NotSupported { operation: &'static str },
    #[error("crypto error: {0}")]
    Crypto(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("{operation} failed for {entity}: {message}")]
    Backend {
        operation: &'static str,
        entity: String,
        message: String,
    },
}

impl VaultError {
    /// Wrap an arbitrary backend failure with operation context.
    pub fn backend(
        operation: &'static str,
        entity: impl Into<String>,
        cause: impl core::fmt::Display,
    ) -> Self {
        Self::Backend {
            operation,
            entity: entity.into(),
            message: cause.to_string(),
        }
    }

    /// True for the guard-class failures raised before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyComponent { .. }
                | Self::InvalidCharacters { .. }
                | Self::InvalidKeyMaterial { .. }
                | Self::UnsupportedKeyType(_)
                | Self::UnsupportedEncryptionType(_)
        )
    }
}
