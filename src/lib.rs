//! Unified pluggable password hashing.
//!
//! `pash` is a registry of interchangeable password hashing algorithms.
//! The application installs the algorithms it wants (argon2, bcrypt,
//! scrypt, pbkdf2 - each supplied as an [`Algorithm`] implementation),
//! hashes new passwords with one of them, and verifies inputs against any
//! previously produced hash string without knowing which algorithm made it:
//! hash strings are self-identifying (`$<identifier>$<payload>`), and the
//! registry routes verification through the embedded identifier.
//!
//! Identifiers are globally unique across installed algorithms - installing
//! an algorithm whose identifier set overlaps an installed one is rejected -
//! so every stored hash string resolves to at most one algorithm.
//!
//! # Example
//!
//! ```
//! use futures::future::BoxFuture;
//! use futures::FutureExt;
//! use pash::{Algorithm, HashOptions, Registry};
//! use std::collections::HashSet;
//!
//! struct Rot13;
//!
//! fn rot13(text: &str) -> String {
//!     text.chars()
//!         .map(|c| match c {
//!             'a'..='m' | 'A'..='M' => ((c as u8) + 13) as char,
//!             'n'..='z' | 'N'..='Z' => ((c as u8) - 13) as char,
//!             other => other,
//!         })
//!         .collect()
//! }
//!
//! impl Algorithm for Rot13 {
//!     fn hash<'a>(
//!         &'a self,
//!         password: &'a str,
//!         _options: &'a HashOptions,
//!     ) -> BoxFuture<'a, pash::Result<String>> {
//!         async move { Ok(format!("$rot13${}", rot13(password))) }.boxed()
//!     }
//!
//!     fn verify<'a>(
//!         &'a self,
//!         hashstr: &'a str,
//!         password: &'a str,
//!     ) -> BoxFuture<'a, pash::Result<bool>> {
//!         async move { Ok(hashstr == format!("$rot13${}", rot13(password))) }.boxed()
//!     }
//!
//!     fn identifiers(&self) -> HashSet<String> {
//!         HashSet::from(["rot13".to_owned()])
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> pash::Result<()> {
//! let registry = Registry::builder()
//!     .algorithm("rot13", Rot13)
//!     .default_algorithm("rot13")
//!     .build()?;
//!
//! let hashstr = registry.hash("password").await?;
//! assert_eq!(registry.which(&hashstr)?.as_deref(), Some("rot13"));
//! assert!(registry.verify(&hashstr, "password").await?);
//! assert!(!registry.verify(&hashstr, "Password").await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
mod dispatcher;
pub mod error;
pub mod registry;
pub mod selector;

pub use algorithm::{Algorithm, HashOptions};
pub use error::{PashError, Result};
pub use registry::{Registry, RegistryBuilder};
pub use selector::Selection;
