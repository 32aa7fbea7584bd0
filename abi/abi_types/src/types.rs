use crate::error::AbiParseError;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/* Normalized mutability of a function-like entry */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    NonPayable,
    Payable,
}

impl StateMutability {
    /* Fold the modern `stateMutability` field and the legacy `payable` /
       `constant` flags into one value. First match wins:
       payable, then view, then pure, then nonpayable. */
    pub fn resolve(
        state_mutability: Option<StateMutability>,
        payable: bool,
        constant: bool,
    ) -> Self {
        if state_mutability == Some(StateMutability::Payable) || payable {
            return StateMutability::Payable;
        }

        if state_mutability == Some(StateMutability::View) || constant {
            return StateMutability::View;
        }

        if state_mutability == Some(StateMutability::Pure) {
            return StateMutability::Pure;
        }

        StateMutability::NonPayable
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        }
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* Discriminant tag of an ABI entry */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /* Entries without a `type` field predate the tag and are functions */
    #[default]
    Function,
    Constructor,
    Fallback,
    Receive,
    Event,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Function => "function",
            EntryKind::Constructor => "constructor",
            EntryKind::Fallback => "fallback",
            EntryKind::Receive => "receive",
            EntryKind::Event => "event",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single input, output or event field.
///
/// `ty` is the raw type signature (`uint256`, `address[]`, `bytes32[3]`,
/// `tuple`, ...). Tuple members are kept in `components` but the signature
/// string is what gets rendered.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Parameter>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            indexed: None,
            components: Vec::new(),
        }
    }

    /* True for fixed and dynamic arrays (`T[]`, `T[N]`) */
    pub fn is_array(&self) -> bool {
        self.ty.contains('[')
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed.unwrap_or(false)
    }
}

/// Wire form of an ABI entry, exactly as it appears in the JSON array.
///
/// Every field is optional so that old compiler output (no `type`, no
/// `stateMutability`, legacy `payable`/`constant` flags) still parses.
/// Converted into [`AbiEntry`] right after deserialization.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawAbiEntry {
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    #[serde(default)]
    pub outputs: Vec<Parameter>,
    #[serde(default)]
    pub state_mutability: Option<StateMutability>,
    #[serde(default)]
    pub payable: Option<bool>,
    #[serde(default)]
    pub constant: Option<bool>,
    #[serde(default)]
    pub anonymous: Option<bool>,
}

impl RawAbiEntry {
    fn mutability(&self) -> StateMutability {
        StateMutability::resolve(
            self.state_mutability,
            self.payable.unwrap_or(false),
            self.constant.unwrap_or(false),
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FunctionEntry {
    pub name: String,
    pub inputs: Vec<Parameter>,
    pub outputs: Vec<Parameter>,
    pub state_mutability: StateMutability,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ConstructorEntry {
    pub inputs: Vec<Parameter>,
    pub state_mutability: StateMutability,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FallbackEntry {
    pub state_mutability: StateMutability,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ReceiveEntry {
    pub state_mutability: StateMutability,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EventEntry {
    pub name: String,
    pub inputs: Vec<Parameter>,
    pub anonymous: bool,
}

/// One entry of a contract ABI, with mutability already normalized.
#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(try_from = "RawAbiEntry")]
pub enum AbiEntry {
    Function(FunctionEntry),
    Constructor(ConstructorEntry),
    Fallback(FallbackEntry),
    Receive(ReceiveEntry),
    Event(EventEntry),
}

impl AbiEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            AbiEntry::Function(_) => EntryKind::Function,
            AbiEntry::Constructor(_) => EntryKind::Constructor,
            AbiEntry::Fallback(_) => EntryKind::Fallback,
            AbiEntry::Receive(_) => EntryKind::Receive,
            AbiEntry::Event(_) => EntryKind::Event,
        }
    }

    /* Events have no mutability */
    pub fn state_mutability(&self) -> Option<StateMutability> {
        match self {
            AbiEntry::Function(entry) => Some(entry.state_mutability),
            AbiEntry::Constructor(entry) => Some(entry.state_mutability),
            AbiEntry::Fallback(entry) => Some(entry.state_mutability),
            AbiEntry::Receive(entry) => Some(entry.state_mutability),
            AbiEntry::Event(_) => None,
        }
    }
}

impl TryFrom<RawAbiEntry> for AbiEntry {
    type Error = AbiParseError;

    fn try_from(raw: RawAbiEntry) -> Result<Self, Self::Error> {
        let state_mutability = raw.mutability();

        let entry = match raw.kind {
            EntryKind::Function => AbiEntry::Function(FunctionEntry {
                name: raw.name.ok_or(AbiParseError::MissingName {
                    kind: EntryKind::Function,
                })?,
                inputs: raw.inputs,
                outputs: raw.outputs,
                state_mutability,
            }),
            EntryKind::Constructor => AbiEntry::Constructor(ConstructorEntry {
                inputs: raw.inputs,
                state_mutability,
            }),
            EntryKind::Fallback => AbiEntry::Fallback(FallbackEntry { state_mutability }),
            EntryKind::Receive => AbiEntry::Receive(ReceiveEntry { state_mutability }),
            EntryKind::Event => AbiEntry::Event(EventEntry {
                name: raw.name.ok_or(AbiParseError::MissingName {
                    kind: EntryKind::Event,
                })?,
                inputs: raw.inputs,
                anonymous: raw.anonymous.unwrap_or(false),
            }),
        };

        Ok(entry)
    }
}

/// An ordered contract ABI. Order only matters for output order.
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(transparent)]
pub struct Abi(Vec<AbiEntry>);

impl Abi {
    pub fn new(entries: Vec<AbiEntry>) -> Self {
        Self(entries)
    }

    /* Parse the JSON array form produced by compilers */
    pub fn from_json(text: &str) -> Result<Self, AbiParseError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn entries(&self) -> &[AbiEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AbiEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AbiEntry> for Abi {
    fn from_iter<I: IntoIterator<Item = AbiEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Abi {
    type Item = &'a AbiEntry;
    type IntoIter = std::slice::Iter<'a, AbiEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
