//! Registry of installed password hashing algorithms

use crate::algorithm::Algorithm;
use crate::error::{PashError, Result};
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One installed algorithm, frozen at install time.
///
/// The identifier set is snapshotted from [`Algorithm::identifiers`] exactly
/// once, so dispatch behavior cannot drift under the registry after install.
pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) identifiers: HashSet<String>,
    pub(crate) algorithm: Arc<dyn Algorithm>,
}

struct Inner {
    /// Installed algorithms, in installation order
    entries: Vec<Entry>,
    /// Explicit default pointer; never recomputed from queue order
    default: Option<String>,
}

/// The set of installed password hashing algorithms.
///
/// A `Registry` owns its algorithms: installing one transfers it into the
/// registry, and the registry hands out shared handles only through
/// [`Selection`](crate::Selection). Install and uninstall are brief,
/// synchronous mutations guarded by a single lock, so two concurrent
/// installs of the same name deterministically yield one success and one
/// [`DuplicateAlgorithm`](PashError::DuplicateAlgorithm) failure.
///
/// # Example
///
/// ```
/// use pash::Registry;
/// # use futures::{future::BoxFuture, FutureExt};
/// # use std::collections::HashSet;
/// # struct Toy(&'static str);
/// # impl pash::Algorithm for Toy {
/// #     fn hash<'a>(&'a self, p: &'a str, _o: &'a pash::HashOptions) -> BoxFuture<'a, pash::Result<String>> {
/// #         async move { Ok(format!("${}${}", self.0, p)) }.boxed()
/// #     }
/// #     fn verify<'a>(&'a self, h: &'a str, p: &'a str) -> BoxFuture<'a, pash::Result<bool>> {
/// #         async move { Ok(h == format!("${}${}", self.0, p)) }.boxed()
/// #     }
/// #     fn identifiers(&self) -> HashSet<String> { HashSet::from([self.0.to_owned()]) }
/// # }
///
/// # fn main() -> pash::Result<()> {
/// let registry = Registry::new();
/// registry.install("argon2", Toy("argon2"))?;
/// registry.install("bcrypt", Toy("bcrypt"))?;
/// assert_eq!(registry.list(), ["argon2", "bcrypt"]);
/// # Ok(())
/// # }
/// ```
pub struct Registry {
    inner: RwLock<Inner>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: Vec::new(),
                default: None,
            }),
        }
    }

    /// Start building a registry with a batch of algorithms and an explicit
    /// default
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Install an algorithm under `name`.
    ///
    /// The algorithm's identifier set is captured here and checked for
    /// overlap against every already installed algorithm; any overlap
    /// rejects the install and leaves the existing algorithm in place. The
    /// first successful install becomes the default when none is configured.
    ///
    /// # Errors
    ///
    /// `InvalidAlgorithmName` for an empty name, `EmptyIdentifierSet` /
    /// `InvalidIdentifier` for a malformed identifier set,
    /// `DuplicateAlgorithm` when the name is taken, `IdentifierCollision`
    /// when an identifier is already claimed.
    pub fn install(
        &self,
        name: impl Into<String>,
        algorithm: impl Algorithm + 'static,
    ) -> Result<()> {
        self.install_arc(name.into(), Arc::new(algorithm))
    }

    pub(crate) fn install_arc(&self, name: String, algorithm: Arc<dyn Algorithm>) -> Result<()> {
        if name.is_empty() {
            return Err(PashError::InvalidAlgorithmName);
        }

        // Frozen snapshot; dispatch never re-queries the algorithm.
        let identifiers = algorithm.identifiers();
        if identifiers.is_empty() {
            return Err(PashError::EmptyIdentifierSet { algorithm: name });
        }
        if identifiers.iter().any(String::is_empty) {
            return Err(PashError::InvalidIdentifier { algorithm: name });
        }

        // The duplicate and collision checks and the insert form one
        // check-then-act sequence and must happen under the same guard.
        let mut inner = self.write();

        if inner.entries.iter().any(|entry| entry.name == name) {
            return Err(PashError::DuplicateAlgorithm { name });
        }
        if let Some(existing) = inner
            .entries
            .iter()
            .find(|entry| !entry.identifiers.is_disjoint(&identifiers))
        {
            tracing::warn!(
                name = %name,
                existing = %existing.name,
                "rejected install: identifier clash"
            );
            return Err(PashError::IdentifierCollision {
                name,
                existing: existing.name.clone(),
            });
        }

        tracing::debug!(name = %name, identifiers = identifiers.len(), "installed algorithm");
        inner.entries.push(Entry {
            name: name.clone(),
            identifiers,
            algorithm,
        });
        if inner.default.is_none() {
            inner.default = Some(name);
        }
        Ok(())
    }

    /// Remove the algorithm installed under `name`.
    ///
    /// Clears the default pointer if it referenced this name; the default is
    /// never silently recomputed from the remaining installation order.
    ///
    /// # Errors
    ///
    /// `InvalidAlgorithmName` for an empty name, `NotInstalled` when no such
    /// algorithm exists.
    pub fn uninstall(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(PashError::InvalidAlgorithmName);
        }

        let mut inner = self.write();
        let index = inner
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| PashError::not_installed(name))?;
        inner.entries.remove(index);
        if inner.default.as_deref() == Some(name) {
            inner.default = None;
        }
        tracing::debug!(name = %name, "uninstalled algorithm");
        Ok(())
    }

    /// Names of the installed algorithms, in installation order
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.read()
            .entries
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Whether an algorithm is installed under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read().entries.iter().any(|entry| entry.name == name)
    }

    /// Whether no algorithm is installed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Name of the current default algorithm, if one is configured
    #[must_use]
    pub fn default_algorithm(&self) -> Option<String> {
        self.read().default.clone()
    }

    /// Point the default at an installed algorithm.
    ///
    /// # Errors
    ///
    /// `InvalidAlgorithmName` for an empty name, `NotInstalled` when the
    /// name does not resolve.
    pub fn set_default(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(PashError::InvalidAlgorithmName);
        }
        let mut inner = self.write();
        if !inner.entries.iter().any(|entry| entry.name == name) {
            return Err(PashError::not_installed(name));
        }
        tracing::debug!(name = %name, "default algorithm updated");
        inner.default = Some(name.to_owned());
        Ok(())
    }

    /// Shared handle to the algorithm installed under `name`
    pub(crate) fn algorithm(&self, name: &str) -> Option<Arc<dyn Algorithm>> {
        self.read()
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| Arc::clone(&entry.algorithm))
    }

    /// Name of the default algorithm, provided it is still installed
    pub(crate) fn resolved_default(&self) -> Option<String> {
        let inner = self.read();
        let name = inner.default.as_deref()?;
        inner
            .entries
            .iter()
            .any(|entry| entry.name == name)
            .then(|| name.to_owned())
    }

    /// First installed algorithm claiming `identifier`, in installation order
    pub(crate) fn claimant(&self, identifier: &str) -> Option<String> {
        self.read()
            .entries
            .iter()
            .find(|entry| entry.identifiers.contains(identifier))
            .map(|entry| entry.name.clone())
    }

    /// Record that `name` was explicitly selected; it becomes the default
    pub(crate) fn note_selected(&self, name: &str) {
        self.write().default = Some(name.to_owned());
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("Registry")
            .field(
                "algorithms",
                &inner
                    .entries
                    .iter()
                    .map(|entry| entry.name.as_str())
                    .collect::<Vec<_>>(),
            )
            .field("default", &inner.default)
            .finish()
    }
}

/// Builder for a registry populated with a batch of algorithms and an
/// explicit default.
///
/// Algorithms are installed in the order they were added, with the same
/// validation as [`Registry::install`]; the first collision or duplicate
/// aborts the build.
///
/// # Example
///
/// ```
/// use pash::Registry;
/// # use futures::{future::BoxFuture, FutureExt};
/// # use std::collections::HashSet;
/// # struct Toy(&'static str);
/// # impl pash::Algorithm for Toy {
/// #     fn hash<'a>(&'a self, p: &'a str, _o: &'a pash::HashOptions) -> BoxFuture<'a, pash::Result<String>> {
/// #         async move { Ok(format!("${}${}", self.0, p)) }.boxed()
/// #     }
/// #     fn verify<'a>(&'a self, h: &'a str, p: &'a str) -> BoxFuture<'a, pash::Result<bool>> {
/// #         async move { Ok(h == format!("${}${}", self.0, p)) }.boxed()
/// #     }
/// #     fn identifiers(&self) -> HashSet<String> { HashSet::from([self.0.to_owned()]) }
/// # }
///
/// # fn main() -> pash::Result<()> {
/// let registry = Registry::builder()
///     .algorithm("argon2", Toy("argon2"))
///     .default_algorithm("argon2")
///     .build()?;
/// assert_eq!(registry.default_algorithm().as_deref(), Some("argon2"));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    algorithms: Vec<(String, Arc<dyn Algorithm>)>,
    default: Option<String>,
}

impl RegistryBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an algorithm to install under `name`
    #[must_use]
    pub fn algorithm(
        mut self,
        name: impl Into<String>,
        algorithm: impl Algorithm + 'static,
    ) -> Self {
        self.algorithms.push((name.into(), Arc::new(algorithm)));
        self
    }

    /// Configure the default algorithm by name
    #[must_use]
    pub fn default_algorithm(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Install every added algorithm and apply the configured default.
    ///
    /// # Errors
    ///
    /// Any [`Registry::install`] error, or `NotInstalled` when the
    /// configured default names an algorithm that was not added.
    pub fn build(self) -> Result<Registry> {
        let registry = Registry::new();
        for (name, algorithm) in self.algorithms {
            registry.install_arc(name, algorithm)?;
        }
        if let Some(name) = self.default {
            registry.set_default(&name)?;
        }
        Ok(registry)
    }
}
