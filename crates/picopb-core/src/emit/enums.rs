//! Enum value normalization and enum source emission.

use crate::schema::EnumDef;
use std::fmt::Write as FmtWrite;

/// Derives the de-prefixed constant name for an enum value.
///
/// Two stages, order-sensitive:
///
/// 1. `<EnumName>_` is stripped from the front of the value name, so
///    `PinMatrixRequestType_Current` under `PinMatrixRequestType` becomes
///    `Current`.
/// 2. When the enum name ends in `Type`, the reduced prefix (enum name
///    minus that suffix, plus `_`) is tested against the original value
///    name, and a match overwrites the stage-1 result, so
///    `ButtonRequest_Other` under `ButtonRequestType` becomes `Other`.
///
/// A value matching neither stage keeps its declared name.
pub fn normalize_enum_value(enum_name: &str, value_name: &str) -> String {
    let mut normalized = value_name;

    if let Some(rest) = value_name
        .strip_prefix(enum_name)
        .and_then(|rest| rest.strip_prefix('_'))
    {
        normalized = rest;
    }

    // Stage 2 always re-tests the original value name, never the stage-1
    // result, and wins whenever it matches.
    if let Some(reduced) = enum_name.strip_suffix("Type") {
        if let Some(rest) = value_name
            .strip_prefix(reduced)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            normalized = rest;
        }
    }

    normalized.to_string()
}

/// Emits the source body for one enum type.
///
/// One named constant per value, declared integers verbatim, declaration
/// order preserved.
pub fn emit_enum(def: &EnumDef) -> String {
    let mut out = String::new();
    for value in &def.values {
        writeln!(
            out,
            "{} = {}",
            normalize_enum_value(&def.name, &value.name),
            value.number
        )
        .expect("String write cannot fail");
    }
    out
}
