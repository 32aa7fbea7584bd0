use abi_types::EntryKind;
use thiserror::Error;

/// Errors produced while rendering an interface.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GenerateError {
  /// The entry kind has no interface member form under the current options
  /// (constructors always, events when they are omitted).
  #[error("{kind} entries cannot be rendered as interface members")]
  UnexpectedEntry { kind: EntryKind },
}
