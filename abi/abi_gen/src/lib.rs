//! Interface Generation
//!
//! Turns a parsed contract ABI into Solidity interface source that other
//! contracts can import.

pub mod codegen;
pub mod error;

pub use codegen::solidity::{
  EventPolicy, InterfaceOptions, SolidityInterfaceWriter, describe_interface,
  describe_interface_with_options,
};
pub use error::GenerateError;

// Re-export abi_types for convenience
pub use abi_types;
