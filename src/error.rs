//! Error types for registry, selection and dispatch operations

use thiserror::Error;

/// Errors produced by the password hashing registry
#[derive(Debug, Error)]
pub enum PashError {
    /// The algorithm name was empty
    #[error("the algorithm name must be a non-empty string")]
    InvalidAlgorithmName,

    /// The algorithm declared no identifiers at all
    #[error("the {algorithm} algorithm declares an empty identifier set")]
    EmptyIdentifierSet {
        /// Name the algorithm was being installed under
        algorithm: String,
    },

    /// The algorithm declared an empty-string identifier
    #[error("the {algorithm} algorithm declares an empty identifier")]
    InvalidIdentifier {
        /// Name the algorithm was being installed under
        algorithm: String,
    },

    /// An algorithm is already installed under this name
    #[error("the {name} algorithm is already installed")]
    DuplicateAlgorithm {
        /// Name that was already taken
        name: String,
    },

    /// The identifier set of the new algorithm clashes with an installed one
    #[error("the identifiers of the {name} algorithm clash with the ones of the {existing} algorithm")]
    IdentifierCollision {
        /// Name of the rejected algorithm
        name: String,
        /// Name of the already installed algorithm it clashes with
        existing: String,
    },

    /// The named algorithm is not installed
    #[error("the {name} algorithm is not installed")]
    NotInstalled {
        /// Name that failed to resolve
        name: String,
    },

    /// No algorithm installed, or no default configured
    #[error("no algorithm installed")]
    NoAlgorithmInstalled,

    /// The password to hash was empty
    #[error("the password must be a non-empty string")]
    EmptyPassword,

    /// The password input to verify was empty
    #[error("the input password must be a non-empty string")]
    EmptyInput,

    /// The hash string to verify was empty
    #[error("the hashstr param must be a non-empty string")]
    EmptyHashString,

    /// The hash string is not in the `$identifier$payload` format
    #[error("the hashstr param provided is not in a supported format")]
    UnsupportedFormat,

    /// No installed algorithm claims the identifier embedded in the hash string
    #[error("no installed algorithm is compatible with the {identifier} identifier")]
    NoCompatibleAlgorithm {
        /// Identifier extracted from the hash string
        identifier: String,
    },

    /// Failure originating inside an algorithm implementation
    #[error("algorithm failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PashError {
    /// Wrap an algorithm-originated failure, preserving its source
    #[must_use]
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    /// Create a `NotInstalled` error
    #[must_use]
    pub fn not_installed(name: impl Into<String>) -> Self {
        Self::NotInstalled { name: name.into() }
    }
}

/// Result type for registry and dispatch operations
pub type Result<T> = std::result::Result<T, PashError>;
