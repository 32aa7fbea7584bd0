//! Delegate Resolvers
//!
//! The interceptor does not locate files itself. It asks a delegate
//! resolver for the raw body of an import and works on what comes back.

use std::path::Path;
use tracing::debug;

/* Result of successfully resolving an import */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /* Resolved location of the import */
    pub file_path: String,
    /* Raw textual content */
    pub body: String,
}

impl ResolvedSource {
    pub fn new(file_path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            body: body.into(),
        }
    }
}

/* Trait for one link of an import-resolution chain.
   `None` means "not handled here / not found". `imported_from` is an
   opaque token describing the importing source and is passed through. */
pub trait SourceResolver: Send + Sync {
    fn resolve(&self, import_path: &str, imported_from: &str) -> Option<ResolvedSource>;
}

impl<T: SourceResolver + ?Sized> SourceResolver for &T {
    fn resolve(&self, import_path: &str, imported_from: &str) -> Option<ResolvedSource> {
        (**self).resolve(import_path, imported_from)
    }
}

impl<T: SourceResolver + ?Sized> SourceResolver for Box<T> {
    fn resolve(&self, import_path: &str, imported_from: &str) -> Option<ResolvedSource> {
        (**self).resolve(import_path, imported_from)
    }
}

/* Reads the import path verbatim from the local filesystem */
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResolver;

impl FileResolver {
    pub fn new() -> Self {
        Self
    }
}

impl SourceResolver for FileResolver {
    fn resolve(&self, import_path: &str, _imported_from: &str) -> Option<ResolvedSource> {
        let path = Path::new(import_path);

        let canonical = match path.canonicalize() {
            Ok(canonical) => canonical,
            Err(e) => {
                debug!("cannot resolve import {}: {}", import_path, e);
                return None;
            }
        };

        match std::fs::read_to_string(&canonical) {
            Ok(body) => Some(ResolvedSource {
                file_path: canonical.to_string_lossy().to_string(),
                body,
            }),
            Err(e) => {
                debug!("cannot read import {}: {}", canonical.display(), e);
                None
            }
        }
    }
}
