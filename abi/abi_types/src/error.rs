use crate::types::EntryKind;
use thiserror::Error;

/// Errors produced while turning ABI JSON into the typed model.
#[derive(Debug, Error)]
pub enum AbiParseError {
    /// The text is not JSON, or does not match the ABI entry schema.
    #[error("malformed ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A `function` or `event` entry carried no `name`.
    #[error("{kind} entry is missing a name")]
    MissingName { kind: EntryKind },
}
