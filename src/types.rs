//! Maps a field's declared type to the pieces of generated source that
//! mention it: the runtime wire-form generic, the value type, the
//! default-value type/reference, and the default-value literal.
//!
//! Generated code never names `std` types directly; everything routes
//! through the runtime prelude alias (`__prelude::i32`, `__prelude::String`,
//! `__prelude::ByteVec`, ...) so the per-file preamble is the only import.

use std::iter;

use itertools::Itertools;
use prost_types::field_descriptor_proto::Type;
use prost_types::{FieldDescriptorProto, FileDescriptorProto};

use crate::ident;
use crate::type_index::TypeIndex;
use crate::wire;
use crate::GeneratorError;

/// The runtime-prelude wire form used as the generic argument of
/// `merge_value`, `add_entries_to`, `add_values`, and `write_values`.
pub fn raw_field_type(
    field: &FieldDescriptorProto,
    file: &FileDescriptorProto,
    index: &TypeIndex,
) -> Result<String, GeneratorError> {
    Ok(match wire::field_type(field)? {
        Type::Bool => "__prelude::pr::Bool".to_owned(),
        Type::Bytes => format!("__prelude::pr::Bytes<{}>", rust_type(field, file, index)?),
        Type::Double => "__prelude::pr::Double".to_owned(),
        Type::Enum => format!("__prelude::pr::Enum<{}>", rust_type(field, file, index)?),
        Type::Fixed32 => "__prelude::pr::Fixed32".to_owned(),
        Type::Fixed64 => "__prelude::pr::Fixed64".to_owned(),
        Type::Float => "__prelude::pr::Float".to_owned(),
        Type::Group => format!("__prelude::pr::Group<{}>", rust_type(field, file, index)?),
        Type::Int32 => "__prelude::pr::Int32".to_owned(),
        Type::Int64 => "__prelude::pr::Int64".to_owned(),
        Type::Message => format!("__prelude::pr::Message<{}>", rust_type(field, file, index)?),
        Type::Sfixed32 => "__prelude::pr::Sfixed32".to_owned(),
        Type::Sfixed64 => "__prelude::pr::Sfixed64".to_owned(),
        Type::Sint32 => "__prelude::pr::Sint32".to_owned(),
        Type::Sint64 => "__prelude::pr::Sint64".to_owned(),
        Type::String => "__prelude::pr::String".to_owned(),
        Type::Uint32 => "__prelude::pr::Uint32".to_owned(),
        Type::Uint64 => "__prelude::pr::Uint64".to_owned(),
    })
}

/// The value type a field is stored as.
pub fn rust_type(
    field: &FieldDescriptorProto,
    file: &FileDescriptorProto,
    index: &TypeIndex,
) -> Result<String, GeneratorError> {
    Ok(match wire::field_type(field)? {
        Type::Bool => "__prelude::bool".to_owned(),
        Type::Bytes => "__prelude::ByteVec".to_owned(),
        Type::Double => "__prelude::f64".to_owned(),
        Type::Float => "__prelude::f32".to_owned(),
        Type::Fixed32 | Type::Uint32 => "__prelude::u32".to_owned(),
        Type::Fixed64 | Type::Uint64 => "__prelude::u64".to_owned(),
        Type::Int32 | Type::Sfixed32 | Type::Sint32 => "__prelude::i32".to_owned(),
        Type::Int64 | Type::Sfixed64 | Type::Sint64 => "__prelude::i64".to_owned(),
        Type::String => "__prelude::String".to_owned(),
        Type::Enum => {
            let entry = index.enum_type(field.type_name());
            type_path(file, entry.file, &entry.ancestors, entry.proto.name())
        }
        Type::Group | Type::Message => {
            let entry = index.message(field.type_name());
            type_path(file, entry.file, &entry.ancestors, entry.proto.name())
        }
    })
}

/// The type of the field's default constant. Statically allocated string
/// and bytes literals need the `'static` borrow forms.
pub fn default_type(
    field: &FieldDescriptorProto,
    file: &FileDescriptorProto,
    index: &TypeIndex,
) -> Result<String, GeneratorError> {
    Ok(match wire::field_type(field)? {
        Type::Bytes => "&'static [__prelude::u8]".to_owned(),
        Type::String => "&'static __prelude::str".to_owned(),
        _ => rust_type(field, file, index)?,
    })
}

/// The type a reader returning the default produces.
pub fn default_type_ref(
    field: &FieldDescriptorProto,
    file: &FileDescriptorProto,
    index: &TypeIndex,
) -> Result<String, GeneratorError> {
    Ok(match wire::field_type(field)? {
        Type::Bytes => "&[__prelude::u8]".to_owned(),
        Type::String => "&__prelude::str".to_owned(),
        _ => rust_type(field, file, index)?,
    })
}

/// The default-value literal for the field's default constant.
pub fn default_value(
    field: &FieldDescriptorProto,
    file: &FileDescriptorProto,
    index: &TypeIndex,
) -> Result<String, GeneratorError> {
    Ok(match wire::field_type(field)? {
        Type::Bool => if field.default_value() == "true" { "true" } else { "false" }.to_owned(),
        Type::Bytes => format!(
            "b\"{}\"",
            escape_bytes(&unescape_c_escape_string(field.default_value()))
        ),
        Type::String => format!("\"{}\"", field.default_value().escape_default()),
        Type::Double => float_literal(field.default_value(), "f64"),
        Type::Float => float_literal(field.default_value(), "f32"),
        Type::Fixed32
        | Type::Uint32
        | Type::Fixed64
        | Type::Uint64
        | Type::Int32
        | Type::Sfixed32
        | Type::Sint32
        | Type::Int64
        | Type::Sfixed64
        | Type::Sint64 => int_literal(field.default_value()),
        Type::Enum => {
            let entry = index.enum_type(field.type_name());
            let value_name = if field.default_value().is_empty() {
                // No explicit default: the first declared value.
                entry
                    .proto
                    .value
                    .first()
                    .unwrap_or_else(|| panic!("enum {} has no values", entry.proto.name()))
                    .name()
            } else {
                field.default_value()
            };
            format!(
                "{}::{}",
                type_path(file, entry.file, &entry.ancestors, entry.proto.name()),
                ident::escape(value_name)
            )
        }
        Type::Group | Type::Message => String::new(),
    })
}

/// Whether the value type is `Copy`, which decides the shape of the proto2
/// reader.
pub fn is_copyable(field_type: Type) -> bool {
    !matches!(
        field_type,
        Type::Bytes | Type::String | Type::Message | Type::Group
    )
}

/// Assembles the path of a message or enum as seen from `referrer`: rooted
/// at `__file`, detouring through `__imports::<file_mod>` when the target
/// lives in another descriptor file, then one module segment per containing
/// message, outermost first.
fn type_path(
    referrer: &FileDescriptorProto,
    target_file: &FileDescriptorProto,
    ancestors: &[&str],
    name: &str,
) -> String {
    let import = if referrer.name() == target_file.name() {
        None
    } else {
        Some(format!(
            "__imports::{}",
            ident::file_mod_name(target_file.name())
        ))
    };
    iter::once("__file".to_owned())
        .chain(import)
        .chain(ancestors.iter().map(|parent| ident::message_mod_name(parent)))
        .chain(iter::once(ident::escape(name)))
        .join("::")
}

fn int_literal(text: &str) -> String {
    if text.is_empty() {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

fn float_literal(text: &str, primitive: &str) -> String {
    match text {
        "" => "0.0".to_owned(),
        "inf" => format!("{}::INFINITY", primitive),
        "-inf" => format!("{}::NEG_INFINITY", primitive),
        "nan" => format!("{}::NAN", primitive),
        _ if text.contains(['.', 'e', 'E']) => text.to_owned(),
        _ => format!("{}.0", text),
    }
}

fn escape_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&byte| std::ascii::escape_default(byte))
        .map(char::from)
        .collect()
}

/// Reverses protoc's C-style escaping of bytes defaults.
///
/// Based on `google::protobuf::UnescapeCEscapeString`.
fn unescape_c_escape_string(s: &str) -> Vec<u8> {
    let src = s.as_bytes();
    let len = src.len();
    let mut dst = Vec::new();

    let mut p = 0;
    while p < len {
        if src[p] != b'\\' {
            dst.push(src[p]);
            p += 1;
            continue;
        }
        p += 1;
        if p == len {
            panic!("invalid c-escaped default bytes value ({}): ends with '\\'", s);
        }
        match src[p] {
            b'a' => {
                dst.push(0x07);
                p += 1;
            }
            b'b' => {
                dst.push(0x08);
                p += 1;
            }
            b'f' => {
                dst.push(0x0C);
                p += 1;
            }
            b'n' => {
                dst.push(0x0A);
                p += 1;
            }
            b'r' => {
                dst.push(0x0D);
                p += 1;
            }
            b't' => {
                dst.push(0x09);
                p += 1;
            }
            b'v' => {
                dst.push(0x0B);
                p += 1;
            }
            b'\\' => {
                dst.push(0x5C);
                p += 1;
            }
            b'?' => {
                dst.push(0x3F);
                p += 1;
            }
            b'\'' => {
                dst.push(0x27);
                p += 1;
            }
            b'"' => {
                dst.push(0x22);
                p += 1;
            }
            b'0'..=b'7' => {
                let mut octal = 0;
                for _ in 0..3 {
                    if p < len && (b'0'..=b'7').contains(&src[p]) {
                        octal = octal * 8 + (src[p] - b'0');
                        p += 1;
                    } else {
                        break;
                    }
                }
                dst.push(octal);
            }
            b'x' | b'X' => {
                if p + 3 > len {
                    panic!("invalid c-escaped default bytes value ({}): incomplete hex value", s);
                }
                match u8::from_str_radix(&s[p + 1..p + 3], 16) {
                    Ok(byte) => dst.push(byte),
                    _ => panic!("invalid c-escaped default bytes value ({}): invalid hex value", s),
                }
                p += 3;
            }
            _ => panic!("invalid c-escaped default bytes value ({}): invalid escape", s),
        }
    }
    dst
}
