//! Wire-format helpers: the 3-bit wire type codes and tag computation.

use prost_types::field_descriptor_proto::Type;
use prost_types::FieldDescriptorProto;

use crate::GeneratorError;

/// The wire type of a protobuf value, paired with a field number to form a
/// tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireType {
    Varint = 0,
    Bit64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    #[allow(dead_code)]
    EndGroup = 4,
    Bit32 = 5,
}

impl WireType {
    /// Whether values of this wire type may be packed into a single
    /// length-delimited frame.
    pub fn is_packable(self) -> bool {
        matches!(self, WireType::Varint | WireType::Bit64 | WireType::Bit32)
    }
}

/// Resolves a field's declared type, failing on an integer outside the
/// descriptor enum. Everything downstream matches on the resolved `Type`
/// and is total.
pub fn field_type(field: &FieldDescriptorProto) -> Result<Type, GeneratorError> {
    Type::try_from(field.r#type.unwrap_or_default()).map_err(|_| GeneratorError::UnknownFieldType)
}

/// The wire type a value of the given declared type is framed with.
pub fn wire_type(field_type: Type) -> WireType {
    match field_type {
        Type::Fixed64 | Type::Sfixed64 | Type::Double => WireType::Bit64,
        Type::Fixed32 | Type::Sfixed32 | Type::Float => WireType::Bit32,
        Type::Int32
        | Type::Int64
        | Type::Uint32
        | Type::Uint64
        | Type::Sint32
        | Type::Sint64
        | Type::Bool
        | Type::Enum => WireType::Varint,
        Type::Message | Type::Bytes | Type::String => WireType::LengthDelimited,
        Type::Group => WireType::StartGroup,
    }
}

/// `(number << 3) | wire_type`, the tag as it appears on the wire and in
/// generated match arms.
pub fn make_tag(number: i32, wire_type: WireType) -> u32 {
    (number as u32) << 3 | wire_type as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_type_table() {
        assert_eq!(WireType::Varint, wire_type(Type::Int32));
        assert_eq!(WireType::Varint, wire_type(Type::Sint64));
        assert_eq!(WireType::Varint, wire_type(Type::Bool));
        assert_eq!(WireType::Varint, wire_type(Type::Enum));
        assert_eq!(WireType::Bit64, wire_type(Type::Fixed64));
        assert_eq!(WireType::Bit64, wire_type(Type::Double));
        assert_eq!(WireType::Bit32, wire_type(Type::Sfixed32));
        assert_eq!(WireType::Bit32, wire_type(Type::Float));
        assert_eq!(WireType::LengthDelimited, wire_type(Type::String));
        assert_eq!(WireType::LengthDelimited, wire_type(Type::Bytes));
        assert_eq!(WireType::LengthDelimited, wire_type(Type::Message));
        assert_eq!(WireType::StartGroup, wire_type(Type::Group));
    }

    #[test]
    fn test_make_tag() {
        assert_eq!(8, make_tag(1, WireType::Varint));
        assert_eq!(10, make_tag(1, WireType::LengthDelimited));
        assert_eq!(56, make_tag(7, WireType::Varint));
        assert_eq!(18, make_tag(2, WireType::LengthDelimited));
        assert_eq!(16, make_tag(2, WireType::Varint));
    }

    #[test]
    fn test_packable() {
        assert!(WireType::Varint.is_packable());
        assert!(WireType::Bit32.is_packable());
        assert!(WireType::Bit64.is_packable());
        assert!(!WireType::LengthDelimited.is_packable());
        assert!(!WireType::StartGroup.is_packable());
    }

    #[test]
    fn test_unknown_field_type() {
        let field = FieldDescriptorProto {
            r#type: Some(99),
            ..Default::default()
        };
        assert!(field_type(&field).is_err());
    }
}
