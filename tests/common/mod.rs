//! Shared test algorithms: the rot-N cipher family and instrumented helpers
#![allow(dead_code)]

use futures::future::BoxFuture;
use futures::FutureExt;
use pash::{Algorithm, HashOptions, PashError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn rotate(text: &str, n: u8) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='m' | 'A'..='M' => ((c as u8) + n) as char,
            'n'..='z' | 'N'..='Z' => ((c as u8) - n) as char,
            other => other,
        })
        .collect()
}

/// Toy letter-rotation "hash" producing `$rotN$<rotated>` strings.
///
/// Deterministic and trivially reversible, which makes registry routing and
/// dispatch behavior easy to assert on. Counts how often the registry
/// actually invoked it.
pub struct RotN {
    n: u8,
    calls: Arc<AtomicUsize>,
}

impl RotN {
    pub fn counted(n: u8, calls: Arc<AtomicUsize>) -> Self {
        Self { n, calls }
    }
}

/// A rot-N algorithm claiming the `rotN` identifier
pub fn rot(n: u8) -> RotN {
    RotN::counted(n, Arc::new(AtomicUsize::new(0)))
}

impl Algorithm for RotN {
    fn hash<'a>(
        &'a self,
        password: &'a str,
        _options: &'a HashOptions,
    ) -> BoxFuture<'a, pash::Result<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let hashstr = format!("$rot{}${}", self.n, rotate(password, self.n));
        async move { Ok(hashstr) }.boxed()
    }

    fn verify<'a>(
        &'a self,
        hashstr: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, pash::Result<bool>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let expected = format!("$rot{}${}", self.n, rotate(password, self.n));
        async move { Ok(hashstr == expected) }.boxed()
    }

    fn identifiers(&self) -> HashSet<String> {
        HashSet::from([format!("rot{}", self.n)])
    }
}

/// A rot-N variant that claims a caller-chosen identifier set
pub struct RotWithIdentifiers {
    inner: RotN,
    identifiers: HashSet<String>,
}

pub fn rot_with_identifiers<I>(n: u8, identifiers: I) -> RotWithIdentifiers
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    RotWithIdentifiers {
        inner: rot(n),
        identifiers: identifiers.into_iter().map(Into::into).collect(),
    }
}

impl Algorithm for RotWithIdentifiers {
    fn hash<'a>(
        &'a self,
        password: &'a str,
        options: &'a HashOptions,
    ) -> BoxFuture<'a, pash::Result<String>> {
        self.inner.hash(password, options)
    }

    fn verify<'a>(
        &'a self,
        hashstr: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, pash::Result<bool>> {
        self.inner.verify(hashstr, password)
    }

    fn identifiers(&self) -> HashSet<String> {
        self.identifiers.clone()
    }
}

/// An algorithm that echoes one tuning parameter into its hash string, for
/// asserting opaque options passthrough
pub struct Echo;

impl Algorithm for Echo {
    fn hash<'a>(
        &'a self,
        password: &'a str,
        options: &'a HashOptions,
    ) -> BoxFuture<'a, pash::Result<String>> {
        let cost = options
            .get("cost")
            .and_then(|v| v.as_u64())
            .unwrap_or(1);
        let hashstr = format!("$echo$c={cost}${password}");
        async move { Ok(hashstr) }.boxed()
    }

    fn verify<'a>(
        &'a self,
        hashstr: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, pash::Result<bool>> {
        async move {
            Ok(hashstr
                .rsplit('$')
                .next()
                .is_some_and(|payload| payload == password))
        }
        .boxed()
    }

    fn identifiers(&self) -> HashSet<String> {
        HashSet::from(["echo".to_owned()])
    }
}

/// An algorithm whose operations always fail, for asserting that
/// plugin-originated errors propagate unchanged
pub struct Failing;

impl Algorithm for Failing {
    fn hash<'a>(
        &'a self,
        _password: &'a str,
        _options: &'a HashOptions,
    ) -> BoxFuture<'a, pash::Result<String>> {
        async {
            Err(PashError::backend(std::io::Error::new(
                std::io::ErrorKind::Other,
                "key derivation failed",
            )))
        }
        .boxed()
    }

    fn verify<'a>(
        &'a self,
        _hashstr: &'a str,
        _password: &'a str,
    ) -> BoxFuture<'a, pash::Result<bool>> {
        async {
            Err(PashError::backend(std::io::Error::new(
                std::io::ErrorKind::Other,
                "key derivation failed",
            )))
        }
        .boxed()
    }

    fn identifiers(&self) -> HashSet<String> {
        HashSet::from(["failing".to_owned()])
    }
}
