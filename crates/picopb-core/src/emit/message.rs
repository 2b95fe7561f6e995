//! Message source emission.
//!
//! Produces the full artifact body for one message type: runtime-support
//! import, optional guarded typing import, cross-message imports, class
//! header, wire-type constant, field table, and initializer.

use crate::emit::field::FieldRecord;
use crate::emit::{GeneratorConfig, Profile};
use crate::schema::MessageDef;
use std::fmt::Write as FmtWrite;

/// Guarded import of the optional sequence-typing facility.
///
/// The generated artifact degrades gracefully on runtimes without a
/// `typing` module by substituting a null capability marker.
const TYPING_GUARD: &str = "if __debug__:
    try:
        from typing import List
    except ImportError:
        List = None
";

/// Emits the source body for one message type.
pub fn emit_message(
    message: &MessageDef,
    fields: &[FieldRecord],
    wire_id: Option<i32>,
    config: &GeneratorConfig,
) -> String {
    let mut out = String::new();
    write_message(&mut out, message, fields, wire_id, config).expect("String write cannot fail");
    out
}

/// Computes the cross-message import statements for a set of resolved fields.
///
/// Referenced message names are deduplicated and sorted lexicographically,
/// keeping the output byte-stable regardless of field declaration order.
pub fn cross_imports(fields: &[FieldRecord]) -> Vec<String> {
    let mut names: Vec<&str> = fields
        .iter()
        .filter_map(FieldRecord::referenced_message)
        .collect();
    names.sort_unstable();
    names.dedup();
    names
        .into_iter()
        .map(|name| format!("from .{name} import {name}"))
        .collect()
}

fn write_message(
    w: &mut impl FmtWrite,
    message: &MessageDef,
    fields: &[FieldRecord],
    wire_id: Option<i32>,
    config: &GeneratorConfig,
) -> std::fmt::Result {
    match config.profile {
        Profile::Embedded => writeln!(w, "import {} as p", config.runtime_module)?,
        Profile::Full => writeln!(w, "from . import {} as p", config.runtime_module)?,
    }

    if config.typing && fields.iter().any(|f| f.repeated) {
        w.write_str(TYPING_GUARD)?;
    }

    for import in cross_imports(fields) {
        writeln!(w, "{import}")?;
    }

    writeln!(w)?;
    writeln!(w)?;
    writeln!(w, "class {}(p.MessageType):", message.name)?;

    if let Some(id) = wire_id {
        writeln!(w, "    MESSAGE_WIRE_TYPE = {id}")?;
    }

    if fields.is_empty() {
        if wire_id.is_none() {
            writeln!(w, "    pass")?;
        }
        return Ok(());
    }

    writeln!(w, "    FIELDS = {{")?;
    for field in fields {
        let flags = if field.repeated { "p.FLAG_REPEATED" } else { "0" };
        writeln!(
            w,
            "        {}: ('{}', {}, {}),{}",
            field.number,
            field.name,
            field.tag,
            flags,
            field_comment(field)
        )?;
    }
    writeln!(w, "    }}")?;
    writeln!(w)?;

    writeln!(w, "    def __init__(")?;
    writeln!(w, "        self,")?;
    for (i, field) in fields.iter().enumerate() {
        let sep = if i + 1 == fields.len() { "" } else { "," };
        if config.typing {
            writeln!(w, "        {}: {} = None{}", field.name, field.py_type, sep)?;
        } else {
            writeln!(w, "        {}=None{}", field.name, sep)?;
        }
    }
    if config.typing {
        writeln!(w, "    ) -> None:")?;
    } else {
        writeln!(w, "    ):")?;
    }
    for field in fields {
        if field.repeated {
            // Unset repeated fields default to a fresh empty sequence
            writeln!(
                w,
                "        self.{0} = {0} if {0} is not None else []",
                field.name
            )?;
        } else {
            writeln!(w, "        self.{0} = {0}", field.name)?;
        }
    }

    Ok(())
}

fn field_comment(field: &FieldRecord) -> String {
    let mut comments = Vec::new();
    if field.required {
        comments.push("required".to_string());
    }
    if let Some(default) = &field.default {
        comments.push(format!("default={default}"));
    }
    if comments.is_empty() {
        String::new()
    } else {
        format!("  # {}", comments.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::field::resolve;
    use crate::schema::FieldDef;
    use pretty_assertions::assert_eq;
    use prost_types::field_descriptor_proto::Type;

    fn record(name: &str, number: i32, ty: Type, repeated: bool) -> FieldRecord {
        resolve(&FieldDef {
            name: name.to_string(),
            number,
            type_code: ty as i32,
            type_name: None,
            repeated,
            required: false,
            default_value: None,
        })
        .unwrap()
    }

    fn message_record(name: &str, number: i32, target: &str) -> FieldRecord {
        resolve(&FieldDef {
            name: name.to_string(),
            number,
            type_code: Type::Message as i32,
            type_name: Some(target.to_string()),
            repeated: false,
            required: false,
            default_value: None,
        })
        .unwrap()
    }

    fn msg(name: &str) -> MessageDef {
        MessageDef {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_cross_imports_sorted_and_deduplicated() {
        let fields = vec![
            message_record("b1", 1, "B"),
            message_record("a", 2, "A"),
            message_record("b2", 3, "B"),
            record("plain", 4, Type::Uint32, false),
        ];
        assert_eq!(
            cross_imports(&fields),
            vec!["from .A import A".to_string(), "from .B import B".to_string()]
        );
    }

    #[test]
    fn test_emit_full_message() {
        let fields = vec![
            record("name", 1, Type::String, false),
            record("values", 2, Type::Uint32, true),
        ];
        let body = emit_message(&msg("Example"), &fields, None, &GeneratorConfig::default());
        assert_eq!(
            body,
            "\
import protobuf as p
if __debug__:
    try:
        from typing import List
    except ImportError:
        List = None


class Example(p.MessageType):
    FIELDS = {
        1: ('name', p.UnicodeType, 0),
        2: ('values', p.UVarintType, p.FLAG_REPEATED),
    }

    def __init__(
        self,
        name: str = None,
        values: List[int] = None
    ) -> None:
        self.name = name
        self.values = values if values is not None else []
"
        );
    }

    #[test]
    fn test_emit_wire_type_constant() {
        let body = emit_message(
            &msg("Cancel"),
            &[],
            Some(20),
            &GeneratorConfig::default(),
        );
        assert_eq!(
            body,
            "\
import protobuf as p


class Cancel(p.MessageType):
    MESSAGE_WIRE_TYPE = 20
"
        );
    }

    #[test]
    fn test_emit_empty_body() {
        let body = emit_message(&msg("Ping"), &[], None, &GeneratorConfig::default());
        assert_eq!(
            body,
            "\
import protobuf as p


class Ping(p.MessageType):
    pass
"
        );
    }

    #[test]
    fn test_emit_without_typing() {
        let config = GeneratorConfig::default().typing(false);
        let fields = vec![record("values", 1, Type::Uint32, true)];
        let body = emit_message(&msg("Example"), &fields, None, &config);
        assert_eq!(
            body,
            "\
import protobuf as p


class Example(p.MessageType):
    FIELDS = {
        1: ('values', p.UVarintType, p.FLAG_REPEATED),
    }

    def __init__(
        self,
        values=None
    ):
        self.values = values if values is not None else []
"
        );
    }

    #[test]
    fn test_emit_full_profile_import() {
        let config = GeneratorConfig::default().profile(Profile::Full);
        let body = emit_message(&msg("Ping"), &[], None, &config);
        assert!(body.starts_with("from . import protobuf as p\n"));
    }

    #[test]
    fn test_emit_required_and_default_comments() {
        let mut field = FieldDef {
            name: "address_n".to_string(),
            number: 1,
            type_code: Type::Uint32 as i32,
            type_name: None,
            repeated: false,
            required: true,
            default_value: Some("0".to_string()),
        };
        let required = resolve(&field).unwrap();
        field.required = false;
        let defaulted = resolve(&field).unwrap();

        let body = emit_message(
            &msg("Example"),
            &[required, defaulted],
            None,
            &GeneratorConfig::default(),
        );
        assert!(body.contains("        1: ('address_n', p.UVarintType, 0),  # required default=0\n"));
        assert!(body.contains("        1: ('address_n', p.UVarintType, 0),  # default=0\n"));
    }

    #[test]
    fn test_message_typed_field_emission() {
        let fields = vec![message_record("signature", 1, "LiskSignatureType")];
        let body = emit_message(&msg("LiskTransactionAsset"), &fields, None, &GeneratorConfig::default());
        assert!(body.contains("from .LiskSignatureType import LiskSignatureType\n"));
        assert!(body.contains("        1: ('signature', LiskSignatureType, 0),\n"));
        assert!(body.contains("        signature: LiskSignatureType = None\n"));
    }
}
