//! ABI Type Definitions
//!
//! This crate contains the data model for contract ABI descriptions as
//! emitted by Solidity compilers. It provides pure data structures and
//! JSON parsing without any file I/O or code generation logic.

pub mod error;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::AbiParseError;
pub use types::*;
