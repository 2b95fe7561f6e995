//! Field resolution.
//!
//! Maps one raw field description onto the fixed primitive table, producing
//! the normalized record the emitters consume. The table is total for every
//! descriptor kind the runtime supports; anything else is an
//! [`UnsupportedFieldType`](crate::Error::UnsupportedFieldType) error that
//! aborts the containing message's artifact.

use crate::error::{Error, Result};
use crate::schema::FieldDef;
use prost_types::field_descriptor_proto::Type;

/// A fully resolved field, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    /// Field name
    pub name: String,
    /// Field number
    pub number: i32,
    /// Encoding tag: a runtime type reference (`p.…`) or a message name
    pub tag: String,
    /// Python value type, wrapped as `List[T]` when the field is repeated
    pub py_type: String,
    /// Whether the field is repeated
    pub repeated: bool,
    /// Whether the field is required; affects only the emitted comment
    pub required: bool,
    /// Rendered default literal, when the schema declares one
    pub default: Option<String>,
}

impl FieldRecord {
    /// Returns the referenced message name for message-typed fields.
    ///
    /// Primitive tags always live in the runtime namespace `p.`; a bare
    /// name is a cross-message reference.
    pub fn referenced_message(&self) -> Option<&str> {
        if self.tag.starts_with("p.") {
            None
        } else {
            Some(&self.tag)
        }
    }
}

/// Resolves one raw field description into a [`FieldRecord`].
pub fn resolve(field: &FieldDef) -> Result<FieldRecord> {
    let (tag, base_type) = lookup(field)?;
    let py_type = if field.repeated {
        format!("List[{base_type}]")
    } else {
        base_type
    };
    Ok(FieldRecord {
        name: field.name.clone(),
        number: field.number,
        tag,
        py_type,
        repeated: field.repeated,
        required: field.required,
        default: field
            .default_value
            .as_deref()
            .map(|raw| render_default(field.type_code, raw)),
    })
}

/// The fixed primitive table, keyed by descriptor type code.
fn lookup(field: &FieldDef) -> Result<(String, String)> {
    let pair = match Type::try_from(field.type_code) {
        Ok(Type::Uint32 | Type::Uint64 | Type::Enum) => ("p.UVarintType", "int"),
        Ok(Type::Sint32 | Type::Sint64) => ("p.SVarintType", "int"),
        Ok(Type::String) => ("p.UnicodeType", "str"),
        Ok(Type::Bool) => ("p.BoolType", "bool"),
        Ok(Type::Bytes) => ("p.BytesType", "bytes"),
        Ok(Type::Message) => {
            let name = field.type_name.clone().ok_or_else(|| {
                Error::internal(format!(
                    "message-typed field '{}' has no type name",
                    field.name
                ))
            })?;
            return Ok((name.clone(), name));
        }
        _ => {
            return Err(Error::unsupported_field_type(&field.name, field.type_code));
        }
    };
    Ok((pair.0.to_string(), pair.1.to_string()))
}

/// Renders a descriptor default string as a Python literal.
fn render_default(type_code: i32, raw: &str) -> String {
    match Type::try_from(type_code) {
        Ok(Type::String) => format!("'{}'", escape_py(raw)),
        Ok(Type::Bytes) => format!("b'{}'", escape_py(raw)),
        Ok(Type::Bool) => {
            if raw == "true" {
                "True".to_string()
            } else {
                "False".to_string()
            }
        }
        // Numeric kinds and enum value names render verbatim
        _ => raw.to_string(),
    }
}

/// Escapes a string for a single-quoted Python literal
fn escape_py(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn def(name: &str, number: i32, ty: Type) -> FieldDef {
        FieldDef {
            name: name.to_string(),
            number,
            type_code: ty as i32,
            type_name: None,
            repeated: false,
            required: false,
            default_value: None,
        }
    }

    #[test]
    fn test_primitive_table() {
        let cases = [
            (Type::Uint32, "p.UVarintType", "int"),
            (Type::Uint64, "p.UVarintType", "int"),
            (Type::Enum, "p.UVarintType", "int"),
            (Type::Sint32, "p.SVarintType", "int"),
            (Type::Sint64, "p.SVarintType", "int"),
            (Type::String, "p.UnicodeType", "str"),
            (Type::Bool, "p.BoolType", "bool"),
            (Type::Bytes, "p.BytesType", "bytes"),
        ];
        for (ty, tag, py_type) in cases {
            let record = resolve(&def("f", 1, ty)).unwrap();
            assert_eq!(record.tag, tag);
            assert_eq!(record.py_type, py_type);
            assert_eq!(record.referenced_message(), None);
        }
    }

    #[test]
    fn test_unsupported_kind() {
        for ty in [Type::Int32, Type::Int64, Type::Double, Type::Float, Type::Fixed64] {
            let err = resolve(&def("amount", 4, ty)).unwrap_err();
            match err {
                Error::UnsupportedFieldType { field, type_code } => {
                    assert_eq!(field, "amount");
                    assert_eq!(type_code, ty as i32);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_type_code() {
        let mut field = def("mystery", 1, Type::Bool);
        field.type_code = 99;
        let err = resolve(&field).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedFieldType { type_code: 99, .. }
        ));
    }

    #[test]
    fn test_message_typed_field() {
        let mut field = def("signature", 1, Type::Message);
        field.type_name = Some("LiskSignatureType".to_string());
        let record = resolve(&field).unwrap();
        assert_eq!(record.tag, "LiskSignatureType");
        assert_eq!(record.py_type, "LiskSignatureType");
        assert_eq!(record.referenced_message(), Some("LiskSignatureType"));
    }

    #[test]
    fn test_repeated_wraps_type() {
        let mut field = def("values", 2, Type::Uint32);
        field.repeated = true;
        let record = resolve(&field).unwrap();
        assert_eq!(record.tag, "p.UVarintType");
        assert_eq!(record.py_type, "List[int]");
        assert!(record.repeated);
    }

    #[test]
    fn test_default_rendering() {
        let mut field = def("label", 1, Type::String);
        field.default_value = Some("it's".to_string());
        let record = resolve(&field).unwrap();
        assert_eq!(record.default.as_deref(), Some("'it\\'s'"));

        let mut field = def("flag", 2, Type::Bool);
        field.default_value = Some("true".to_string());
        let record = resolve(&field).unwrap();
        assert_eq!(record.default.as_deref(), Some("True"));

        let mut field = def("count", 3, Type::Uint32);
        field.default_value = Some("10".to_string());
        let record = resolve(&field).unwrap();
        assert_eq!(record.default.as_deref(), Some("10"));
    }
}
