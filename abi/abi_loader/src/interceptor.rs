//! JSON ABI Import Interceptor
//!
//! Wraps a delegate [`SourceResolver`]. Imports ending in `.json` are
//! fetched through the delegate and, when the body is an ABI, answered with
//! a generated Solidity interface instead of the raw JSON. Any parse or
//! generation failure falls back to the raw body; nothing is surfaced to
//! the caller.

use crate::resolver::{ResolvedSource, SourceResolver};
use abi_gen::{describe_interface_with_options, EventPolicy, GenerateError, InterfaceOptions};
use abi_types::{Abi, AbiParseError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const JSON_EXTENSION: &str = ".json";
pub const ABI_EXTENSION: &str = ".abi";

/* Why a JSON body was passed through untouched */
#[derive(Debug, Error)]
pub enum FallbackReason {
    #[error("body is not a contract ABI: {0}")]
    Parse(#[from] AbiParseError),

    #[error("interface generation failed: {0}")]
    Generate(#[from] GenerateError),
}

/* Outcome of trying to turn a resolved JSON body into an interface */
#[derive(Debug)]
pub enum Interception {
    Generated { source: String },
    Fallback { reason: FallbackReason },
}

impl Interception {
    pub fn is_generated(&self) -> bool {
        matches!(self, Interception::Generated { .. })
    }

    /* The body the caller receives: generated source, or `raw` on fallback */
    pub fn into_body(self, raw: String) -> String {
        match self {
            Interception::Generated { source } => source,
            Interception::Fallback { .. } => raw,
        }
    }
}

impl From<Result<String, FallbackReason>> for Interception {
    fn from(result: Result<String, FallbackReason>) -> Self {
        match result {
            Ok(source) => Interception::Generated { source },
            Err(reason) => Interception::Fallback { reason },
        }
    }
}

/* Interface name for a resolved path: the basename with `.json` and then
   `.abi` removed, so `Foo.json` and `dir/Foo.abi.json` both give `Foo`. */
pub fn declared_name(file_path: &str) -> String {
    let basename = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string());

    let stem = strip_extension(&basename, JSON_EXTENSION);
    strip_extension(stem, ABI_EXTENSION).to_string()
}

/* Stripping never leaves an empty name behind */
fn strip_extension<'a>(name: &'a str, extension: &str) -> &'a str {
    match name.strip_suffix(extension) {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    }
}

/* Parse `body` as an ABI and render the interface for `file_path`. No I/O. */
pub fn intercept(file_path: &str, body: &str, event_policy: EventPolicy) -> Interception {
    generate(file_path, body, event_policy).into()
}

fn generate(file_path: &str, body: &str, event_policy: EventPolicy) -> Result<String, FallbackReason> {
    let abi = Abi::from_json(body)?;
    let options = InterfaceOptions::new(declared_name(file_path)).with_event_policy(event_policy);
    Ok(describe_interface_with_options(options, &abi)?)
}

/* Resolver that substitutes generated interfaces for JSON ABI imports */
pub struct AbiInterfaceResolver<R> {
    inner: R,
    event_policy: EventPolicy,
}

impl<R: SourceResolver> AbiInterfaceResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            event_policy: EventPolicy::default(),
        }
    }

    pub fn with_event_policy(mut self, event_policy: EventPolicy) -> Self {
        self.event_policy = event_policy;
        self
    }

    pub fn event_policy(&self) -> EventPolicy {
        self.event_policy
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /* Whether an import path is one this resolver answers for */
    pub fn handles(&self, import_path: &str) -> bool {
        import_path.ends_with(JSON_EXTENSION)
    }
}

impl<R: SourceResolver> SourceResolver for AbiInterfaceResolver<R> {
    fn resolve(&self, import_path: &str, imported_from: &str) -> Option<ResolvedSource> {
        if !self.handles(import_path) {
            return None;
        }

        let ResolvedSource { file_path, body } = self.inner.resolve(import_path, imported_from)?;

        match intercept(&file_path, &body, self.event_policy) {
            Interception::Generated { source } => {
                debug!("generated interface for {}", file_path);
                Some(ResolvedSource {
                    file_path,
                    body: source,
                })
            }
            Interception::Fallback { reason } => {
                debug!("passing {} through unchanged: {}", file_path, reason);
                Some(ResolvedSource { file_path, body })
            }
        }
    }
}
