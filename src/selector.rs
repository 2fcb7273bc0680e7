//! Algorithm selection: explicit by name, implicit by default, or by
//! inspecting a hash string's embedded identifier

use crate::algorithm::Algorithm;
use crate::error::{PashError, Result};
use crate::registry::Registry;
use std::sync::Arc;

/// A resolved algorithm: the hash/verify capability pair bound to one
/// installed algorithm.
///
/// Obtained from [`Registry::use_algorithm`] or [`Registry::use_default`].
/// A selection holds its own handle to the algorithm, so it keeps working
/// even if the algorithm is uninstalled afterwards; resolve again to observe
/// registry changes.
#[derive(Clone)]
pub struct Selection {
    pub(crate) name: String,
    pub(crate) algorithm: Arc<dyn Algorithm>,
}

impl Selection {
    /// Name the algorithm was installed under
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection").field("name", &self.name).finish()
    }
}

impl Registry {
    /// Resolve an installed algorithm by name.
    ///
    /// A successful resolution also makes `name` the new default, so the
    /// most recently selected algorithm is the one implicit dispatch uses.
    ///
    /// # Errors
    ///
    /// `InvalidAlgorithmName` for an empty name, `NotInstalled` when the
    /// name does not resolve.
    pub fn use_algorithm(&self, name: &str) -> Result<Selection> {
        if name.is_empty() {
            return Err(PashError::InvalidAlgorithmName);
        }
        let algorithm = self
            .algorithm(name)
            .ok_or_else(|| PashError::not_installed(name))?;
        self.note_selected(name);
        Ok(Selection {
            name: name.to_owned(),
            algorithm,
        })
    }

    /// Resolve the default algorithm.
    ///
    /// # Errors
    ///
    /// `NoAlgorithmInstalled` when no default is configured or the default
    /// points at an algorithm that is no longer installed.
    pub fn use_default(&self) -> Result<Selection> {
        let name = self
            .resolved_default()
            .ok_or(PashError::NoAlgorithmInstalled)?;
        let algorithm = self
            .algorithm(&name)
            .ok_or(PashError::NoAlgorithmInstalled)?;
        Ok(Selection { name, algorithm })
    }

    /// Determine which installed algorithm produced `hashstr`.
    ///
    /// Parses the `$<identifier>$<payload>` shape, then scans installed
    /// algorithms in installation order for one claiming the embedded
    /// identifier. `Ok(None)` means the hash string is well formed but no
    /// installed algorithm claims its identifier; callers can use that to
    /// report an incompatible-algorithm condition distinctly from malformed
    /// input.
    ///
    /// # Errors
    ///
    /// `EmptyHashString` for an empty string, `UnsupportedFormat` when the
    /// shape does not match, `NoAlgorithmInstalled` when the registry is
    /// empty.
    pub fn which(&self, hashstr: &str) -> Result<Option<String>> {
        let identifier = embedded_identifier(hashstr)?;
        if self.is_empty() {
            return Err(PashError::NoAlgorithmInstalled);
        }
        Ok(self.claimant(identifier))
    }
}

/// Extract the identifier field from a `$<identifier>$<payload>` hash string.
///
/// At least three `$`-separated fields with an empty first field, i.e. the
/// string must start with `$` and contain a second `$` after the identifier.
pub(crate) fn embedded_identifier(hashstr: &str) -> Result<&str> {
    if hashstr.is_empty() {
        return Err(PashError::EmptyHashString);
    }
    let mut fields = hashstr.split('$');
    let leading = fields.next();
    let identifier = fields.next();
    match (leading, identifier, fields.next()) {
        (Some(""), Some(identifier), Some(_)) => Ok(identifier),
        _ => Err(PashError::UnsupportedFormat),
    }
}
