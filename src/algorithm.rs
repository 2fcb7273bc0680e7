//! The capability contract every password hashing algorithm implements

use crate::Result;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A pluggable password hashing algorithm.
///
/// Implementations produce self-identifying hash strings in the conventional
/// `$<identifier>$<payload>` form, where `<identifier>` is one of the values
/// returned by [`identifiers`](Algorithm::identifiers). The registry routes
/// verification back to the producing algorithm through that identifier, so
/// every identifier must be claimed by at most one installed algorithm.
///
/// Key derivation is CPU- and memory-bound; implementations should move the
/// actual work off the async executor (`tokio::task::spawn_blocking`) and
/// resolve the returned future with the outcome. The registry only awaits.
///
/// Failures specific to the underlying primitive should be wrapped with
/// [`PashError::backend`](crate::PashError::backend); the registry propagates
/// them to the caller unchanged.
pub trait Algorithm: Send + Sync {
    /// Hash a password into a self-identifying hash string.
    ///
    /// `options` carries algorithm-specific tuning parameters; unknown
    /// parameters must be ignored.
    fn hash<'a>(&'a self, password: &'a str, options: &'a HashOptions)
        -> BoxFuture<'a, Result<String>>;

    /// Check a password against a hash string previously produced by
    /// [`hash`](Algorithm::hash).
    ///
    /// Returns the match decision exactly as computed by the underlying
    /// primitive. Implementations are expected to compare in constant time.
    fn verify<'a>(&'a self, hashstr: &'a str, password: &'a str) -> BoxFuture<'a, Result<bool>>;

    /// The identifier tags this algorithm stamps into its hash strings.
    ///
    /// Called once at install time; the registry keeps a frozen copy and
    /// never re-queries it, so the set must be stable.
    fn identifiers(&self) -> HashSet<String>;
}

/// Tuning parameters forwarded opaquely to an algorithm's hash operation.
///
/// The registry does not interpret these; each algorithm reads the
/// parameters it understands (cost factors, memory size, parallelism) and
/// falls back to its own defaults for the rest.
///
/// # Example
///
/// ```
/// use pash::HashOptions;
///
/// let options = HashOptions::new()
///     .param("timeCost", 3)
///     .param("memoryCost", 4096);
/// assert_eq!(options.get("timeCost").and_then(|v| v.as_u64()), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HashOptions {
    /// Algorithm-specific parameters, keyed by parameter name
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl HashOptions {
    /// Create an empty set of options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one tuning parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up one tuning parameter
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Whether no parameters were supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over all supplied parameters
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params.iter()
    }
}
