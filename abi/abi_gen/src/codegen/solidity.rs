/* Solidity interface writer
 *
 * Renders an ABI as an `interface` block. Every member is `external`;
 * constructors never appear, and events only appear when the event policy
 * asks for them.
 */

use crate::codegen::shared::text::indent;
use crate::error::GenerateError;
use abi_types::{
  Abi, AbiEntry, EntryKind, EventEntry, FallbackEntry, FunctionEntry, Parameter, ReceiveEntry,
  StateMutability,
};
use tracing::debug;

pub const LICENSE_HEADER: &str = "//SPDX-License-Identifier: UNLICENSED";
pub const PRAGMA: &str = "pragma solidity >=0.5.0 <0.8.0;";

/* Interface functions must be externally callable */
const VISIBILITY: &str = "external";

/* Data location appended to array inputs */
const INPUT_ARRAY_LOCATION: &str = "calldata";

/* Data location appended to `string` outputs */
const OUTPUT_STRING_LOCATION: &str = "memory";

/// Whether `event` entries become interface members.
///
/// Events are omitted by default; `Declare` renders them as event
/// declarations inside the interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EventPolicy {
  #[default]
  Omit,
  Declare,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceOptions {
  pub contract_name: String,
  pub event_policy: EventPolicy,
}

impl InterfaceOptions {
  pub fn new(contract_name: impl Into<String>) -> Self {
    Self {
      contract_name: contract_name.into(),
      event_policy: EventPolicy::default(),
    }
  }

  pub fn with_event_policy(mut self, event_policy: EventPolicy) -> Self {
    self.event_policy = event_policy;
    self
  }
}

pub struct SolidityInterfaceWriter {
  options: InterfaceOptions,
}

impl SolidityInterfaceWriter {
  pub fn new(options: InterfaceOptions) -> Self {
    Self { options }
  }

  pub fn options(&self) -> &InterfaceOptions {
    &self.options
  }

  /* True when the entry becomes a member of the interface */
  pub fn includes(&self, entry: &AbiEntry) -> bool {
    match entry {
      AbiEntry::Constructor(_) => false,
      AbiEntry::Event(_) => self.options.event_policy == EventPolicy::Declare,
      AbiEntry::Function(_) | AbiEntry::Fallback(_) | AbiEntry::Receive(_) => true,
    }
  }

  pub fn write_abi(&self, abi: &Abi) -> Result<String, GenerateError> {
    let members = abi
      .iter()
      .filter(|entry| self.includes(entry))
      .map(|entry| {
        self
          .write_abi_entry(entry)
          .map(|member| indent(&format!("{};", member)))
      })
      .collect::<Result<Vec<_>, _>>()?;

    debug!(
      "rendered interface {} with {} of {} entries",
      self.options.contract_name,
      members.len(),
      abi.len()
    );

    Ok(
      [
        LICENSE_HEADER.to_string(),
        PRAGMA.to_string(),
        String::new(),
        format!("interface {} {{", self.options.contract_name),
        members.join("\n\n"),
        "}".to_string(),
      ]
      .join("\n"),
    )
  }

  pub fn write_abi_entry(&self, entry: &AbiEntry) -> Result<String, GenerateError> {
    match entry {
      AbiEntry::Function(function) => Ok(self.write_function_entry(function)),
      AbiEntry::Fallback(fallback) => Ok(self.write_fallback_entry(fallback)),
      AbiEntry::Receive(receive) => Ok(self.write_receive_entry(receive)),
      AbiEntry::Event(event) if self.options.event_policy == EventPolicy::Declare => {
        Ok(self.write_event_entry(event))
      }
      AbiEntry::Event(_) | AbiEntry::Constructor(_) => Err(GenerateError::UnexpectedEntry {
        kind: entry.kind(),
      }),
    }
  }

  pub fn write_function_entry(&self, function: &FunctionEntry) -> String {
    let mut lines = Vec::new();

    if function.inputs.is_empty() {
      lines.push(format!("function {}()", function.name));
    } else {
      lines.push(format!("function {}(", function.name));
      lines.push(indent(&self.write_inputs(&function.inputs)));
      lines.push(")".to_string());
    }

    lines.push(indent(
      &self
        .write_modifiers(EntryKind::Function, function.state_mutability)
        .join("\n"),
    ));

    if !function.outputs.is_empty() {
      let returns = [
        "returns (".to_string(),
        indent(&self.write_outputs(&function.outputs)),
        ")".to_string(),
      ];
      lines.extend(returns.iter().map(|line| indent(line)));
    }

    lines.join("\n")
  }

  pub fn write_fallback_entry(&self, fallback: &FallbackEntry) -> String {
    let mut parts = vec!["function ()"];
    parts.extend(self.write_modifiers(EntryKind::Fallback, fallback.state_mutability));
    parts.join(" ")
  }

  /* Receive handlers are always external payable with no parameters */
  pub fn write_receive_entry(&self, _receive: &ReceiveEntry) -> String {
    "receive () external payable".to_string()
  }

  pub fn write_event_entry(&self, event: &EventEntry) -> String {
    let mut text = if event.inputs.is_empty() {
      format!("event {}()", event.name)
    } else {
      let fields = event
        .inputs
        .iter()
        .map(|parameter| self.write_event_parameter(parameter))
        .collect::<Vec<_>>()
        .join(",\n");
      format!("event {}(\n{}\n)", event.name, indent(&fields))
    };

    if event.anonymous {
      text.push_str(" anonymous");
    }

    text
  }

  /* Visibility first, then mutability when there is one */
  pub fn write_modifiers(
    &self,
    kind: EntryKind,
    state_mutability: StateMutability,
  ) -> Vec<&'static str> {
    let mut modifiers = vec![VISIBILITY];
    modifiers.extend(self.write_mutability(kind, state_mutability));
    modifiers
  }

  /* `view` and `pure` only exist on functions; anything may be payable */
  pub fn write_mutability(
    &self,
    kind: EntryKind,
    state_mutability: StateMutability,
  ) -> Option<&'static str> {
    match (state_mutability, kind) {
      (StateMutability::Payable, _) => Some("payable"),
      (StateMutability::View, EntryKind::Function) => Some("view"),
      (StateMutability::Pure, EntryKind::Function) => Some("pure"),
      _ => None,
    }
  }

  pub fn write_inputs(&self, inputs: &[Parameter]) -> String {
    inputs
      .iter()
      .map(|parameter| {
        if parameter.is_array() {
          self.write_parameter(&with_location(parameter, INPUT_ARRAY_LOCATION))
        } else {
          self.write_parameter(parameter)
        }
      })
      .collect::<Vec<_>>()
      .join(",\n")
  }

  pub fn write_outputs(&self, outputs: &[Parameter]) -> String {
    outputs
      .iter()
      .map(|parameter| {
        if parameter.ty == "string" {
          self.write_parameter(&with_location(parameter, OUTPUT_STRING_LOCATION))
        } else {
          self.write_parameter(parameter)
        }
      })
      .collect::<Vec<_>>()
      .join(",\n")
  }

  pub fn write_parameter(&self, parameter: &Parameter) -> String {
    format!("{} {}", parameter.ty, parameter.name).trim().to_string()
  }

  fn write_event_parameter(&self, parameter: &Parameter) -> String {
    if parameter.is_indexed() {
      format!("{} indexed {}", parameter.ty, parameter.name).trim().to_string()
    } else {
      self.write_parameter(parameter)
    }
  }
}

/* Copy of the parameter with a data location appended to its type */
fn with_location(parameter: &Parameter, location: &str) -> Parameter {
  Parameter {
    ty: format!("{} {}", parameter.ty, location),
    ..parameter.clone()
  }
}

/// Render `abi` as an interface named `declared_name` with default options.
pub fn describe_interface(declared_name: &str, abi: &Abi) -> Result<String, GenerateError> {
  describe_interface_with_options(InterfaceOptions::new(declared_name), abi)
}

pub fn describe_interface_with_options(
  options: InterfaceOptions,
  abi: &Abi,
) -> Result<String, GenerateError> {
  SolidityInterfaceWriter::new(options).write_abi(abi)
}

#[cfg(test)]
mod tests {
  use super::*;
  use abi_types::ConstructorEntry;

  fn writer() -> SolidityInterfaceWriter {
    SolidityInterfaceWriter::new(InterfaceOptions::new("Test"))
  }

  fn function(
    name: &str,
    inputs: Vec<Parameter>,
    outputs: Vec<Parameter>,
    state_mutability: StateMutability,
  ) -> FunctionEntry {
    FunctionEntry {
      name: name.to_string(),
      inputs,
      outputs,
      state_mutability,
    }
  }

  #[test]
  fn test_mutability_keywords_for_functions() {
    let writer = writer();
    assert_eq!(
      writer.write_mutability(EntryKind::Function, StateMutability::Payable),
      Some("payable")
    );
    assert_eq!(
      writer.write_mutability(EntryKind::Function, StateMutability::View),
      Some("view")
    );
    assert_eq!(
      writer.write_mutability(EntryKind::Function, StateMutability::Pure),
      Some("pure")
    );
    assert_eq!(
      writer.write_mutability(EntryKind::Function, StateMutability::NonPayable),
      None
    );
  }

  #[test]
  fn test_mutability_for_fallback_is_payable_only() {
    let writer = writer();
    assert_eq!(
      writer.write_mutability(EntryKind::Fallback, StateMutability::Payable),
      Some("payable")
    );
    assert_eq!(writer.write_mutability(EntryKind::Fallback, StateMutability::View), None);
    assert_eq!(writer.write_mutability(EntryKind::Fallback, StateMutability::Pure), None);
  }

  #[test]
  fn test_modifiers_order() {
    assert_eq!(
      writer().write_modifiers(EntryKind::Function, StateMutability::Payable),
      vec!["external", "payable"]
    );
    assert_eq!(
      writer().write_modifiers(EntryKind::Function, StateMutability::NonPayable),
      vec!["external"]
    );
  }

  #[test]
  fn test_parameter_without_name_is_bare_type() {
    assert_eq!(writer().write_parameter(&Parameter::new("", "uint256")), "uint256");
    assert_eq!(writer().write_parameter(&Parameter::new("to", "address")), "address to");
  }

  #[test]
  fn test_array_inputs_get_calldata() {
    let inputs = vec![
      Parameter::new("ids", "uint256[]"),
      Parameter::new("slots", "bytes32[3]"),
      Parameter::new("owner", "address"),
      Parameter::new("label", "string"),
    ];
    assert_eq!(
      writer().write_inputs(&inputs),
      "uint256[] calldata ids,\nbytes32[3] calldata slots,\naddress owner,\nstring label"
    );
  }

  #[test]
  fn test_string_outputs_get_memory() {
    let outputs = vec![
      Parameter::new("name", "string"),
      Parameter::new("", "uint8"),
      Parameter::new("tags", "string[]"),
    ];
    assert_eq!(
      writer().write_outputs(&outputs),
      "string memory name,\nuint8,\nstring[] tags"
    );
  }

  #[test]
  fn test_write_inputs_leaves_source_untouched() {
    let inputs = vec![Parameter::new("ids", "uint256[]")];
    writer().write_inputs(&inputs);
    assert_eq!(inputs[0].ty, "uint256[]");
  }

  #[test]
  fn test_function_without_inputs_or_outputs() {
    let entry = function("poke", vec![], vec![], StateMutability::NonPayable);
    assert_eq!(writer().write_function_entry(&entry), "function poke()\n  external");
  }

  #[test]
  fn test_function_with_inputs_and_outputs() {
    let entry = function(
      "balanceOf",
      vec![Parameter::new("account", "address")],
      vec![Parameter::new("", "uint256")],
      StateMutability::View,
    );
    assert_eq!(
      writer().write_function_entry(&entry),
      "function balanceOf(\n  address account\n)\n  external\n  view\n  returns (\n    uint256\n  )"
    );
  }

  #[test]
  fn test_fallback_entry() {
    let payable = FallbackEntry {
      state_mutability: StateMutability::Payable,
    };
    let plain = FallbackEntry {
      state_mutability: StateMutability::NonPayable,
    };
    assert_eq!(writer().write_fallback_entry(&payable), "function () external payable");
    assert_eq!(writer().write_fallback_entry(&plain), "function () external");
  }

  #[test]
  fn test_receive_entry_is_fixed() {
    let receive = ReceiveEntry {
      state_mutability: StateMutability::NonPayable,
    };
    assert_eq!(writer().write_receive_entry(&receive), "receive () external payable");
  }

  #[test]
  fn test_constructor_is_rejected_by_entry_writer() {
    let constructor = AbiEntry::Constructor(ConstructorEntry {
      inputs: vec![],
      state_mutability: StateMutability::NonPayable,
    });
    assert_eq!(
      writer().write_abi_entry(&constructor),
      Err(GenerateError::UnexpectedEntry {
        kind: EntryKind::Constructor
      })
    );
  }

  #[test]
  fn test_event_rejected_unless_declared() {
    let event = AbiEntry::Event(EventEntry {
      name: "Ping".to_string(),
      inputs: vec![],
      anonymous: false,
    });
    assert!(writer().write_abi_entry(&event).is_err());

    let declaring =
      SolidityInterfaceWriter::new(InterfaceOptions::new("Test").with_event_policy(EventPolicy::Declare));
    assert_eq!(declaring.write_abi_entry(&event), Ok("event Ping()".to_string()));
  }

  #[test]
  fn test_event_entry_with_indexed_fields() {
    let mut from = Parameter::new("from", "address");
    from.indexed = Some(true);
    let event = EventEntry {
      name: "Transfer".to_string(),
      inputs: vec![from, Parameter::new("value", "uint256")],
      anonymous: true,
    };
    assert_eq!(
      writer().write_event_entry(&event),
      "event Transfer(\n  address indexed from,\n  uint256 value\n) anonymous"
    );
  }

  #[test]
  fn test_includes() {
    let writer = writer();
    let constructor = AbiEntry::Constructor(ConstructorEntry {
      inputs: vec![],
      state_mutability: StateMutability::NonPayable,
    });
    let receive = AbiEntry::Receive(ReceiveEntry {
      state_mutability: StateMutability::Payable,
    });
    assert!(!writer.includes(&constructor));
    assert!(writer.includes(&receive));
  }
}
