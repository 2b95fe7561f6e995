//! Descriptor-set adapter.
//!
//! Loads a pre-built `FileDescriptorSet` (as produced by
//! `protoc --descriptor_set_out`) and converts it into the fixed schema IR.
//! Decoding uses `prost`; the set is additionally linked through
//! `prost_reflect::DescriptorPool`, which rejects dangling type references
//! before any artifact is written.

use crate::error::{Error, Result};
use crate::schema::{
    EnumDef, EnumValueDef, FieldDef, MessageDef, ModuleUnit, WireRegistry, WIRE_TYPE_ENUM,
};
use prost::Message;
use prost_reflect::DescriptorPool;
use prost_types::field_descriptor_proto::Label;
use prost_types::{DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorSet};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// A loaded, linked descriptor set for one schema module.
///
/// The set may contain dependency files beyond the named module; those
/// contribute to wire-type-ID resolution but are never generated from.
#[derive(Debug)]
pub struct SchemaSet {
    module: String,
    set: FileDescriptorSet,
}

impl SchemaSet {
    /// Loads a descriptor set from a file on disk.
    pub fn from_file(module: &str, path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            Error::schema_import(module, format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_bytes(module, &bytes)
    }

    /// Decodes and links a descriptor set from raw bytes.
    pub fn from_bytes(module: &str, bytes: &[u8]) -> Result<Self> {
        let set = FileDescriptorSet::decode(bytes).map_err(|e| {
            Error::schema_import(module, format!("failed to decode descriptor set: {e}"))
        })?;

        // Linking resolves every cross-file type reference; a failure here
        // means the schema module cannot be imported at all.
        DescriptorPool::decode(bytes).map_err(|e| {
            Error::schema_import(module, format!("failed to link descriptor set: {e}"))
        })?;

        debug!("loaded descriptor set with {} file(s)", set.file.len());

        Ok(Self {
            module: module.to_string(),
            set,
        })
    }

    /// Returns the schema module name this set was loaded for
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Extracts the module unit for the named schema module.
    ///
    /// The unit is the file in the set whose stem equals the module name;
    /// its absence is a schema import failure.
    pub fn module_unit(&self) -> Result<ModuleUnit> {
        let file = self
            .set
            .file
            .iter()
            .find(|f| file_stem(f.name()) == self.module)
            .ok_or_else(|| {
                Error::schema_import(&self.module, "module not present in descriptor set")
            })?;

        trace!(
            "module '{}' declares {} message(s) and {} enum(s)",
            self.module,
            file.message_type.len(),
            file.enum_type.len()
        );

        Ok(ModuleUnit {
            name: self.module.clone(),
            messages: file.message_type.iter().map(convert_message).collect(),
            enums: file.enum_type.iter().map(convert_enum).collect(),
        })
    }

    /// Builds the wire-type-ID registry from every file in the set.
    ///
    /// Every top-level enum named [`WIRE_TYPE_ENUM`] contributes its values.
    /// An empty registry is normal for modules with no top-level wire
    /// messages.
    pub fn wire_registry(&self) -> WireRegistry {
        let mut registry = WireRegistry::default();
        for file in &self.set.file {
            for enum_type in &file.enum_type {
                if enum_type.name() == WIRE_TYPE_ENUM {
                    for value in &enum_type.value {
                        registry.insert(value.name().to_string(), value.number());
                    }
                }
            }
        }
        registry
    }
}

fn convert_message(message: &DescriptorProto) -> MessageDef {
    let mut fields: Vec<FieldDef> = message.field.iter().map(convert_field).collect();
    // Field tables and initializers iterate by ascending field number
    fields.sort_by_key(|f| f.number);
    MessageDef {
        name: message.name().to_string(),
        fields,
    }
}

fn convert_field(field: &FieldDescriptorProto) -> FieldDef {
    let type_name = match field.type_name() {
        "" => None,
        qualified => Some(simple_name(qualified).to_string()),
    };
    FieldDef {
        name: field.name().to_string(),
        number: field.number(),
        type_code: field.r#type.unwrap_or(0),
        type_name,
        repeated: field.label() == Label::Repeated,
        required: field.label() == Label::Required,
        default_value: field.default_value.clone(),
    }
}

fn convert_enum(enum_type: &EnumDescriptorProto) -> EnumDef {
    EnumDef {
        name: enum_type.name().to_string(),
        values: enum_type
            .value
            .iter()
            .map(|v| EnumValueDef {
                name: v.name().to_string(),
                number: v.number(),
            })
            .collect(),
    }
}

/// Strips directories and the `.proto` suffix from a descriptor file name
fn file_stem(name: &str) -> &str {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.strip_suffix(".proto").unwrap_or(base)
}

/// Returns the last segment of a fully-qualified type name
fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
