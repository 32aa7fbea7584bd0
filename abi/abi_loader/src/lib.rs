//! ABI Import Interception
//!
//! This crate sits in an import-resolution chain. Imports of `.json` ABI
//! files are resolved through a delegate resolver and, when the body parses
//! as an ABI, replaced by a generated Solidity interface.

pub mod interceptor;
pub mod resolver;

// Re-export commonly used types at the crate root
pub use interceptor::{declared_name, intercept, AbiInterfaceResolver, FallbackReason, Interception};
pub use resolver::{FileResolver, ResolvedSource, SourceResolver};

// Re-export abi_gen for convenience
pub use abi_gen;
