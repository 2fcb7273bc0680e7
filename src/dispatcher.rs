//! Public hash/verify entry points: validate input, resolve the algorithm,
//! delegate, and surface errors without masking them

use crate::algorithm::HashOptions;
use crate::error::{PashError, Result};
use crate::registry::Registry;
use crate::selector::{embedded_identifier, Selection};

impl Registry {
    /// Hash a password with the default algorithm and default tuning.
    ///
    /// # Errors
    ///
    /// `EmptyPassword` for an empty password, `NoAlgorithmInstalled` when no
    /// default resolves, plus anything the algorithm itself reports.
    pub async fn hash(&self, password: &str) -> Result<String> {
        self.hash_with(password, &HashOptions::default()).await
    }

    /// Hash a password with the default algorithm and explicit tuning
    /// parameters.
    ///
    /// The options are forwarded to the algorithm untouched; the returned
    /// hash string is the algorithm's native self-identifying output,
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`hash`](Registry::hash).
    pub async fn hash_with(&self, password: &str, options: &HashOptions) -> Result<String> {
        if password.is_empty() {
            return Err(PashError::EmptyPassword);
        }
        let selection = self.use_default()?;
        tracing::debug!(algorithm = %selection.name, "hashing password");
        selection.algorithm.hash(password, options).await
    }

    /// Check a password input against a previously produced hash string.
    ///
    /// The hash string's embedded identifier routes the check back to the
    /// algorithm that produced it; the algorithm's match decision is
    /// returned verbatim.
    ///
    /// # Errors
    ///
    /// `EmptyHashString` / `UnsupportedFormat` for malformed hash strings,
    /// `NoAlgorithmInstalled` on an empty registry, `NoCompatibleAlgorithm`
    /// when no installed algorithm claims the embedded identifier,
    /// `EmptyInput` for an empty password input, plus anything the algorithm
    /// itself reports.
    ///
    /// Routing errors take precedence over input errors: a hash string that
    /// cannot be dispatched is reported even when the input is also empty,
    /// so callers see the stored-hash problem first. Either way the
    /// algorithm is never invoked with an empty input.
    pub async fn verify(&self, hashstr: &str, input: &str) -> Result<bool> {
        let identifier = embedded_identifier(hashstr)?;
        if self.is_empty() {
            return Err(PashError::NoAlgorithmInstalled);
        }
        // Resolve before validating the input; see the precedence note above.
        let name = self
            .claimant(identifier)
            .ok_or_else(|| PashError::NoCompatibleAlgorithm {
                identifier: identifier.to_owned(),
            })?;
        if input.is_empty() {
            return Err(PashError::EmptyInput);
        }
        // The claimant can disappear between the scan and this lookup; that
        // surfaces as NotInstalled rather than a stale dispatch.
        let algorithm = self
            .algorithm(&name)
            .ok_or_else(|| PashError::not_installed(&name))?;
        tracing::debug!(algorithm = %name, identifier = %identifier, "verifying password");
        algorithm.verify(hashstr, input).await
    }
}

impl Selection {
    /// Hash a password with this algorithm and default tuning.
    ///
    /// # Errors
    ///
    /// `EmptyPassword` for an empty password, plus anything the algorithm
    /// itself reports.
    pub async fn hash(&self, password: &str) -> Result<String> {
        self.hash_with(password, &HashOptions::default()).await
    }

    /// Hash a password with this algorithm and explicit tuning parameters.
    ///
    /// # Errors
    ///
    /// Same as [`hash`](Selection::hash).
    pub async fn hash_with(&self, password: &str, options: &HashOptions) -> Result<String> {
        if password.is_empty() {
            return Err(PashError::EmptyPassword);
        }
        tracing::debug!(algorithm = %self.name, "hashing password");
        self.algorithm.hash(password, options).await
    }

    /// Check a password input against a hash string with this algorithm,
    /// bypassing identifier introspection.
    ///
    /// # Errors
    ///
    /// `EmptyHashString` for an empty hash string, `EmptyInput` for an empty
    /// input, plus anything the algorithm itself reports.
    pub async fn verify(&self, hashstr: &str, input: &str) -> Result<bool> {
        if hashstr.is_empty() {
            return Err(PashError::EmptyHashString);
        }
        if input.is_empty() {
            return Err(PashError::EmptyInput);
        }
        tracing::debug!(algorithm = %self.name, "verifying password");
        self.algorithm.verify(hashstr, input).await
    }
}
