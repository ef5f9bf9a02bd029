//! An index over every message and enum in the request.
//!
//! `FieldDescriptorProto.type_name` carries fully qualified names
//! (`.pkg.Outer.Inner`); this index maps them back to the file that declares
//! the type and its chain of containing messages, which is everything the
//! type mapper needs to assemble a `__file::...` path.

use std::collections::HashMap;

use prost_types::{DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto};

pub struct MessageEntry<'a> {
    pub file: &'a FileDescriptorProto,
    /// Simple names of the containing messages, outermost first.
    pub ancestors: Vec<&'a str>,
    pub proto: &'a DescriptorProto,
}

impl<'a> MessageEntry<'a> {
    pub fn is_map_entry(&self) -> bool {
        self.proto
            .options
            .as_ref()
            .and_then(|options| options.map_entry)
            .unwrap_or(false)
    }

    pub fn field_by_number(&self, number: i32) -> &'a FieldDescriptorProto {
        self.proto
            .field
            .iter()
            .find(|field| field.number() == number)
            .unwrap_or_else(|| panic!("message {} has no field {}", self.proto.name(), number))
    }
}

pub struct EnumEntry<'a> {
    pub file: &'a FileDescriptorProto,
    pub ancestors: Vec<&'a str>,
    pub proto: &'a EnumDescriptorProto,
}

pub struct TypeIndex<'a> {
    messages: HashMap<String, MessageEntry<'a>>,
    enums: HashMap<String, EnumEntry<'a>>,
}

impl<'a> TypeIndex<'a> {
    pub fn new(files: &'a [FileDescriptorProto]) -> TypeIndex<'a> {
        let mut index = TypeIndex {
            messages: HashMap::new(),
            enums: HashMap::new(),
        };
        for file in files {
            let scope = if file.package().is_empty() {
                String::new()
            } else {
                format!(".{}", file.package())
            };
            for message in &file.message_type {
                index.add_message(file, &mut Vec::new(), &scope, message);
            }
            for enum_type in &file.enum_type {
                index.add_enum(file, &[], &scope, enum_type);
            }
        }
        index
    }

    fn add_message(
        &mut self,
        file: &'a FileDescriptorProto,
        ancestors: &mut Vec<&'a str>,
        scope: &str,
        message: &'a DescriptorProto,
    ) {
        let fq_name = format!("{}.{}", scope, message.name());
        ancestors.push(message.name());
        for nested in &message.nested_type {
            self.add_message(file, ancestors, &fq_name, nested);
        }
        for nested in &message.enum_type {
            self.add_enum(file, ancestors, &fq_name, nested);
        }
        ancestors.pop();
        self.messages.insert(
            fq_name,
            MessageEntry {
                file,
                ancestors: ancestors.clone(),
                proto: message,
            },
        );
    }

    fn add_enum(
        &mut self,
        file: &'a FileDescriptorProto,
        ancestors: &[&'a str],
        scope: &str,
        enum_type: &'a EnumDescriptorProto,
    ) {
        self.enums.insert(
            format!("{}.{}", scope, enum_type.name()),
            EnumEntry {
                file,
                ancestors: ancestors.to_vec(),
                proto: enum_type,
            },
        );
    }

    /// Looks up a message by the fully qualified name protoc put in a
    /// field's `type_name`. Absence is a malformed request.
    pub fn message(&self, type_name: &str) -> &MessageEntry<'a> {
        self.messages
            .get(type_name)
            .unwrap_or_else(|| panic!("unresolved message type {:?}", type_name))
    }

    pub fn enum_type(&self, type_name: &str) -> &EnumEntry<'a> {
        self.enums
            .get(type_name)
            .unwrap_or_else(|| panic!("unresolved enum type {:?}", type_name))
    }

    /// Whether `type_name` names a synthetic map-entry message.
    pub fn is_map_entry(&self, type_name: &str) -> bool {
        self.messages
            .get(type_name)
            .map_or(false, MessageEntry::is_map_entry)
    }
}
