//! Schema intermediate representation.
//!
//! The generator never walks raw descriptor objects directly. A thin adapter
//! ([`SchemaSet`]) converts the external descriptor library's types into the
//! fixed records in this module, and everything downstream (resolver,
//! emitters, driver) consumes only these.
//!
//! All records are constructed fresh per generation run and discarded after
//! the corresponding artifacts are written; nothing persists across runs.

mod adapter;

pub use adapter::SchemaSet;

use std::collections::BTreeMap;

/// Name of the well-known global enumeration carrying wire-type IDs.
///
/// Its values follow the convention `MessageType_<Name>`, one per top-level
/// wire message.
pub const WIRE_TYPE_ENUM: &str = "MessageType";

/// One schema file's full set of message and enum definitions.
///
/// This is the unit of a single generation run.
#[derive(Debug, Clone)]
pub struct ModuleUnit {
    /// Schema module name (the descriptor file's stem)
    pub name: String,
    /// Message definitions, in declaration order
    pub messages: Vec<MessageDef>,
    /// Enum definitions, in declaration order
    pub enums: Vec<EnumDef>,
}

/// One message type and its fields.
#[derive(Debug, Clone)]
pub struct MessageDef {
    /// Simple message name
    pub name: String,
    /// Fields, ordered by ascending field number
    pub fields: Vec<FieldDef>,
}

/// One raw field description, as lifted from the descriptor.
///
/// `number` is unique within the owning message; the adapter preserves
/// whatever the descriptor declares and performs no validation of its own.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Field number
    pub number: i32,
    /// Raw descriptor type code
    pub type_code: i32,
    /// Simple name of the referenced message or enum type, when any
    pub type_name: Option<String>,
    /// Whether the field is repeated
    pub repeated: bool,
    /// Whether the field is required
    pub required: bool,
    /// Raw default value string from the descriptor, when declared
    pub default_value: Option<String>,
}

/// One enum type and its values.
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Simple enum name
    pub name: String,
    /// Values in declaration order, never renumbered or resorted
    pub values: Vec<EnumValueDef>,
}

/// One enum value: raw declared name and declared integer.
#[derive(Debug, Clone)]
pub struct EnumValueDef {
    /// Raw value name as declared in the schema
    pub name: String,
    /// Declared integer value
    pub number: i32,
}

/// Wire-type IDs resolved from the global [`WIRE_TYPE_ENUM`] enumeration.
///
/// A missing entry is a normal, non-error case: the message is simply not a
/// top-level wire message.
#[derive(Debug, Clone, Default)]
pub struct WireRegistry {
    ids: BTreeMap<String, i32>,
}

impl WireRegistry {
    /// Looks up the wire-type ID for a message name via the
    /// `MessageType_<Name>` convention.
    pub fn lookup(&self, message_name: &str) -> Option<i32> {
        self.ids
            .get(&format!("{WIRE_TYPE_ENUM}_{message_name}"))
            .copied()
    }

    /// Returns the number of registered wire-type IDs
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no wire-type IDs were found
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub(crate) fn insert(&mut self, value_name: String, number: i32) {
        self.ids.insert(value_name, number);
    }
}
