//! Per-field lowering.
//!
//! Every field contributes up to eight artifacts to its containing message:
//! a struct member, merge-loop branches, a size contribution, a write
//! contribution, an initialization check, an accessor surface, a
//! field-number constant, and (for extension fields) an extension
//! declaration. Which shape each artifact takes is decided once, from the
//! field's descriptor, as one of four variants.

use std::fmt::Write;

use log::debug;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{FieldDescriptorProto, FileDescriptorProto};

use crate::ident;
use crate::printer::Printer;
use crate::syntax::Syntax;
use crate::type_index::TypeIndex;
use crate::types;
use crate::wire;
use crate::GeneratorError;

/// The four lowering variants: how a field is stored, merged, and
/// surfaced.
pub enum FieldShape<'a> {
    Primitive,
    SubMessage,
    Repeated {
        packable: bool,
        packed: bool,
    },
    Map {
        key: &'a FieldDescriptorProto,
        value: &'a FieldDescriptorProto,
    },
}

pub struct FieldGenerator<'a> {
    field: &'a FieldDescriptorProto,
    /// The file the field is declared in. Its syntax governs presence and
    /// accessor shape, even when the field's type lives elsewhere.
    file: &'a FileDescriptorProto,
    index: &'a TypeIndex<'a>,
    field_type: Type,
    shape: FieldShape<'a>,
}

impl<'a> FieldGenerator<'a> {
    pub fn new(
        field: &'a FieldDescriptorProto,
        file: &'a FileDescriptorProto,
        index: &'a TypeIndex<'a>,
    ) -> Result<FieldGenerator<'a>, GeneratorError> {
        debug!("    field: {:?}", field.name());

        let field_type = wire::field_type(field)?;
        let repeated = field.label() == Label::Repeated;
        let message_like = matches!(field_type, Type::Message | Type::Group);

        let shape = if repeated && message_like && index.is_map_entry(field.type_name()) {
            let entry = index.message(field.type_name());
            FieldShape::Map {
                key: entry.field_by_number(1),
                value: entry.field_by_number(2),
            }
        } else if repeated {
            let packable = wire::wire_type(field_type).is_packable();
            let packed = packable
                && field
                    .options
                    .as_ref()
                    .and_then(|options| options.packed)
                    .unwrap_or(Syntax::of_file(file) == Syntax::Proto3);
            FieldShape::Repeated { packable, packed }
        } else if message_like {
            FieldShape::SubMessage
        } else {
            FieldShape::Primitive
        };

        Ok(FieldGenerator {
            field,
            file,
            index,
            field_type,
            shape,
        })
    }

    fn name(&self) -> String {
        ident::escape(self.field.name())
    }

    fn number_name(&self) -> String {
        ident::field_number_name(self.field.name())
    }

    fn syntax(&self) -> Syntax {
        Syntax::of_file(self.file)
    }

    /// The type of the struct member holding this field.
    fn field_type(&self) -> Result<String, GeneratorError> {
        let rust_type = types::rust_type(self.field, self.file, self.index)?;
        Ok(match self.shape {
            FieldShape::Primitive => match self.syntax() {
                Syntax::Proto2 => format!("__prelude::Option<{}>", rust_type),
                Syntax::Proto3 => rust_type,
            },
            FieldShape::SubMessage => format!("__prelude::Option<__prelude::Box<{}>>", rust_type),
            FieldShape::Repeated { .. } => format!("__prelude::RepeatedField<{}>", rust_type),
            FieldShape::Map { key, value } => format!(
                "__prelude::MapField<{}, {}>",
                types::rust_type(key, self.file, self.index)?,
                types::rust_type(value, self.file, self.index)?
            ),
        })
    }

    /// The generic argument of the runtime's repeated-entry operations.
    fn generic_arg(&self) -> Result<String, GeneratorError> {
        match self.shape {
            FieldShape::Map { key, value } => Ok(format!(
                "({}, {})",
                types::raw_field_type(key, self.file, self.index)?,
                types::raw_field_type(value, self.file, self.index)?
            )),
            _ => types::raw_field_type(self.field, self.file, self.index),
        }
    }

    fn is_packed(&self) -> bool {
        matches!(self.shape, FieldShape::Repeated { packed: true, .. })
    }

    fn is_packable(&self) -> bool {
        matches!(self.shape, FieldShape::Repeated { packable: true, .. })
    }

    pub fn generate_struct_field<W: Write>(
        &self,
        printer: &mut Printer<W>,
    ) -> Result<(), GeneratorError> {
        printer.print(
            &[("name", &self.name()), ("type", &self.field_type()?)],
            "$name$: $type$,\n",
        );
        Ok(())
    }

    pub fn generate_field_number_const<W: Write>(&self, printer: &mut Printer<W>) {
        printer.print(
            &[
                ("num", &self.number_name()),
                ("num_val", &self.field.number().to_string()),
            ],
            "pub const $num$: __prelude::FieldNumber = unsafe { __prelude::FieldNumber::new_unchecked($num_val$) };\n",
        );
    }

    pub fn generate_merge_branches<W: Write>(
        &self,
        printer: &mut Printer<W>,
    ) -> Result<(), GeneratorError> {
        let name = self.name();
        let num = self.number_name();
        let tag = wire::make_tag(self.field.number(), wire::wire_type(self.field_type)).to_string();

        match self.shape {
            FieldShape::Primitive => {
                let raw = types::raw_field_type(self.field, self.file, self.index)?;
                let vars = [
                    ("name", name.as_str()),
                    ("type", raw.as_str()),
                    ("num", num.as_str()),
                    ("tag", tag.as_str()),
                ];
                match self.syntax() {
                    Syntax::Proto2 => printer.print(
                        &vars,
                        "$tag$ => field.merge_value::<$type$>(Self::$num$, self.$name$.get_or_insert_with(__prelude::Default::default))?,\n",
                    ),
                    Syntax::Proto3 => printer.print(
                        &vars,
                        "$tag$ => field.merge_value::<$type$>(Self::$num$, &mut self.$name$)?,\n",
                    ),
                }
            }
            FieldShape::SubMessage => {
                let raw = types::raw_field_type(self.field, self.file, self.index)?;
                printer.print(
                    &[
                        ("name", name.as_str()),
                        ("type", raw.as_str()),
                        ("num", num.as_str()),
                        ("tag", tag.as_str()),
                    ],
                    concat!(
                        "$tag$ =>\n",
                        "  match &mut self.$name$ {\n",
                        "    __prelude::Some(v) => field.merge_value::<$type$>(Self::$num$, v)?,\n",
                        "    opt @ __prelude::None => *opt = __prelude::Some(__prelude::Box::new(field.read_value::<$type$>(Self::$num$)?)),\n",
                        "  },\n",
                    ),
                );
            }
            FieldShape::Repeated { .. } | FieldShape::Map { .. } => {
                let arg = self.generic_arg()?;
                let packed_tag =
                    wire::make_tag(self.field.number(), wire::WireType::LengthDelimited).to_string();
                let vars = [
                    ("name", name.as_str()),
                    ("arg", arg.as_str()),
                    ("num", num.as_str()),
                    ("unpacked", tag.as_str()),
                    ("packed", packed_tag.as_str()),
                ];
                if self.is_packable() {
                    if self.is_packed() {
                        printer.print(
                            &vars,
                            concat!(
                                "$packed$ => field.add_entries_to::<_, __prelude::pr::Packed<$arg$>>(Self::$num$, &mut self.$name$)?,\n",
                                "$unpacked$ => field.add_entries_to::<_, $arg$>(Self::$num$, &mut self.$name$)?,\n",
                            ),
                        );
                    } else {
                        printer.print(
                            &vars,
                            concat!(
                                "$unpacked$ => field.add_entries_to::<_, $arg$>(Self::$num$, &mut self.$name$)?,\n",
                                "$packed$ => field.add_entries_to::<_, __prelude::pr::Packed<$arg$>>(Self::$num$, &mut self.$name$)?,\n",
                            ),
                        );
                    }
                } else {
                    printer.print(
                        &vars,
                        "$unpacked$ => field.add_entries_to::<_, $arg$>(Self::$num$, &mut self.$name$)?,\n",
                    );
                }
            }
        }
        Ok(())
    }

    pub fn generate_calculate_size<W: Write>(
        &self,
        printer: &mut Printer<W>,
    ) -> Result<(), GeneratorError> {
        if let FieldShape::Repeated { .. } | FieldShape::Map { .. } = self.shape {
            let vars = [
                ("name", self.name()),
                ("arg", self.generic_arg()?),
                ("num", self.number_name()),
            ];
            let vars: Vec<(&str, &str)> =
                vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
            if self.is_packed() {
                printer.print(
                    &vars,
                    "builder = builder.add_values::<_, __prelude::pr::Packed<$arg$>>(Self::$num$, &self.$name$)?;\n",
                );
            } else {
                printer.print(
                    &vars,
                    "builder = builder.add_values::<_, $arg$>(Self::$num$, &self.$name$)?;\n",
                );
            }
        }
        Ok(())
    }

    pub fn generate_write_to<W: Write>(
        &self,
        printer: &mut Printer<W>,
    ) -> Result<(), GeneratorError> {
        if let FieldShape::Repeated { .. } | FieldShape::Map { .. } = self.shape {
            let vars = [
                ("name", self.name()),
                ("arg", self.generic_arg()?),
                ("num", self.number_name()),
            ];
            let vars: Vec<(&str, &str)> =
                vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
            if self.is_packed() {
                printer.print(
                    &vars,
                    "output.write_values::<_, __prelude::pr::Packed<$arg$>>(Self::$num$, &self.$name$)?;\n",
                );
            } else {
                printer.print(
                    &vars,
                    "output.write_values::<_, $arg$>(Self::$num$, &self.$name$)?;\n",
                );
            }
        }
        Ok(())
    }

    pub fn generate_is_initialized<W: Write>(&self, printer: &mut Printer<W>) {
        if let FieldShape::Repeated { .. } | FieldShape::Map { .. } = self.shape {
            printer.print(
                &[("name", self.name().as_str())],
                concat!(
                    "if !__prelude::p::is_initialized(&self.$name$) {\n",
                    "  return false;\n",
                    "}\n",
                ),
            );
        }
    }

    /// The accessor surface inside the message's inherent impl.
    pub fn generate_items<W: Write>(&self, printer: &mut Printer<W>) -> Result<(), GeneratorError> {
        match self.shape {
            FieldShape::Primitive => self.generate_primitive_items(printer),
            FieldShape::SubMessage => {
                let rust_type = types::rust_type(self.field, self.file, self.index)?;
                printer.print(
                    &[
                        ("name", self.name().as_str()),
                        ("raw_name", self.field.name()),
                        ("type", rust_type.as_str()),
                    ],
                    concat!(
                        "pub fn $raw_name$_option(&self) -> __prelude::Option<&$type$> {\n",
                        "  self.$name$.as_deref()\n",
                        "}\n",
                        "pub fn $raw_name$_mut(&mut self) -> &mut $type$ {\n",
                        "  self.$name$.get_or_insert_with(__prelude::Default::default)\n",
                        "}\n",
                        "pub fn has_$raw_name$(&self) -> bool {\n",
                        "  self.$name$.is_some()\n",
                        "}\n",
                        "pub fn set_$raw_name$(&mut self, value: $type$) {\n",
                        "  self.$name$ = __prelude::Some(__prelude::From::from(value))\n",
                        "}\n",
                        "pub fn take_$raw_name$(&mut self) -> __prelude::Option<$type$> {\n",
                        "  self.$name$.take().map(|v| *v)\n",
                        "}\n",
                        "pub fn clear_$raw_name$(&mut self) {\n",
                        "  self.$name$ = __prelude::None\n",
                        "}\n",
                    ),
                );
                Ok(())
            }
            FieldShape::Repeated { .. } | FieldShape::Map { .. } => {
                printer.print(
                    &[
                        ("name", self.name().as_str()),
                        ("raw_name", self.field.name()),
                        ("type", self.field_type()?.as_str()),
                    ],
                    concat!(
                        "pub fn $name$(&self) -> &$type$ {\n",
                        "  &self.$name$\n",
                        "}\n",
                        "pub fn $raw_name$_mut(&mut self) -> &mut $type$ {\n",
                        "  &mut self.$name$\n",
                        "}\n",
                    ),
                );
                Ok(())
            }
        }
    }

    fn generate_primitive_items<W: Write>(
        &self,
        printer: &mut Printer<W>,
    ) -> Result<(), GeneratorError> {
        let name = self.name();
        let rust_type = types::rust_type(self.field, self.file, self.index)?;
        let default = ident::field_default_name(self.field.name());
        let default_type = types::default_type(self.field, self.file, self.index)?;
        let default_ref = types::default_type_ref(self.field, self.file, self.index)?;
        let default_val = types::default_value(self.field, self.file, self.index)?;
        let vars = [
            ("name", name.as_str()),
            ("raw_name", self.field.name()),
            ("type", rust_type.as_str()),
            ("default", default.as_str()),
            ("default_type", default_type.as_str()),
            ("default_ref", default_ref.as_str()),
            ("default_val", default_val.as_str()),
        ];

        match self.syntax() {
            Syntax::Proto2 => {
                if types::is_copyable(self.field_type) {
                    printer.print(
                        &vars,
                        concat!(
                            "pub const $default$: $default_type$ = $default_val$;\n",
                            "pub fn $name$(&self) -> $default_ref$ {\n",
                            "  self.$name$.unwrap_or(Self::$default$)\n",
                            "}\n",
                        ),
                    );
                } else {
                    printer.print(
                        &vars,
                        concat!(
                            "pub const $default$: $default_type$ = $default_val$;\n",
                            "pub fn $name$(&self) -> $default_ref$ {\n",
                            "  self.$name$.as_ref().map_or(Self::$default$, __prelude::AsRef::as_ref)\n",
                            "}\n",
                        ),
                    );
                }
                printer.print(
                    &vars,
                    concat!(
                        "pub fn $raw_name$_option(&self) -> __prelude::Option<&$type$> {\n",
                        "  self.$name$.as_ref()\n",
                        "}\n",
                        "pub fn $raw_name$_mut(&mut self) -> &mut $type$ {\n",
                        "  self.$name$.get_or_insert_with(__prelude::Default::default)\n",
                        "}\n",
                        "pub fn has_$raw_name$(&self) -> bool {\n",
                        "  self.$name$.is_some()\n",
                        "}\n",
                        "pub fn set_$raw_name$(&mut self, value: $type$) {\n",
                        "  self.$name$ = __prelude::Some(__prelude::From::from(value))\n",
                        "}\n",
                        "pub fn take_$raw_name$(&mut self) -> __prelude::Option<$type$> {\n",
                        "  self.$name$.take()\n",
                        "}\n",
                        "pub fn clear_$raw_name$(&mut self) {\n",
                        "  self.$name$ = __prelude::None\n",
                        "}\n",
                    ),
                );
            }
            Syntax::Proto3 => {
                printer.print(
                    &vars,
                    concat!(
                        "pub static $default$: $default_type$ = $default_val$;\n",
                        "pub fn $name$(&self) -> &$type$ {\n",
                        "  &self.$name$\n",
                        "}\n",
                        "pub fn $raw_name$_mut(&mut self) -> &mut $type$ {\n",
                        "  &mut self.$name$\n",
                        "}\n",
                    ),
                );
            }
        }
        Ok(())
    }

    /// Extension declaration for extension fields.
    pub fn generate_extension<W: Write>(&self, _printer: &mut Printer<W>) {
        match self.shape {
            // Map fields cannot be extensions.
            FieldShape::Map { .. } => {}
            // TODO: emit `Extension`/`RepeatedExtension` statics once the
            // runtime's extension registration surface is finalized.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::{DescriptorProto, MessageOptions};

    fn file(syntax: Option<&str>) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some("test.proto".to_owned()),
            package: Some("test".to_owned()),
            syntax: syntax.map(str::to_owned),
            ..Default::default()
        }
    }

    fn scalar(name: &str, number: i32, type_: Type, label: Label) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.to_owned()),
            number: Some(number),
            label: Some(label as i32),
            r#type: Some(type_ as i32),
            ..Default::default()
        }
    }

    fn emit(
        field: &FieldDescriptorProto,
        file: &FileDescriptorProto,
        files: &[FileDescriptorProto],
        artifact: fn(&FieldGenerator, &mut Printer<&mut String>) -> Result<(), GeneratorError>,
    ) -> String {
        let index = TypeIndex::new(files);
        let generator = FieldGenerator::new(field, file, &index).unwrap();
        let mut buf = String::new();
        let mut printer = Printer::new(&mut buf);
        artifact(&generator, &mut printer).unwrap();
        buf
    }

    #[test]
    fn test_proto3_scalar_member_and_merge() {
        let file = file(Some("proto3"));
        let field = scalar("count", 7, Type::Int32, Label::Optional);

        let member = emit(&field, &file, &[], |g, p| g.generate_struct_field(p));
        assert_eq!("count: __prelude::i32,\n", member);

        let merge = emit(&field, &file, &[], |g, p| g.generate_merge_branches(p));
        assert_eq!(
            "56 => field.merge_value::<__prelude::pr::Int32>(Self::COUNT_NUMBER, &mut self.count)?,\n",
            merge
        );
    }

    #[test]
    fn test_proto2_scalar_member_and_merge() {
        let file = file(None);
        let field = scalar("count", 7, Type::Int32, Label::Optional);

        let member = emit(&field, &file, &[], |g, p| g.generate_struct_field(p));
        assert_eq!("count: __prelude::Option<__prelude::i32>,\n", member);

        let merge = emit(&field, &file, &[], |g, p| g.generate_merge_branches(p));
        assert_eq!(
            "56 => field.merge_value::<__prelude::pr::Int32>(Self::COUNT_NUMBER, self.count.get_or_insert_with(__prelude::Default::default))?,\n",
            merge
        );
    }

    #[test]
    fn test_keyword_field_member_uses_raw_ident() {
        let file = file(Some("proto3"));
        let field = scalar("type", 1, Type::Int32, Label::Optional);
        let member = emit(&field, &file, &[], |g, p| g.generate_struct_field(p));
        assert_eq!("r#type: __prelude::i32,\n", member);
    }

    #[test]
    fn test_packed_repeated_merge_order() {
        let file = file(Some("proto2"));
        let mut field = scalar("xs", 2, Type::Int32, Label::Repeated);
        field.options = Some(prost_types::FieldOptions {
            packed: Some(true),
            ..Default::default()
        });

        let merge = emit(&field, &file, &[], |g, p| g.generate_merge_branches(p));
        assert_eq!(
            concat!(
                "18 => field.add_entries_to::<_, __prelude::pr::Packed<__prelude::pr::Int32>>(Self::XS_NUMBER, &mut self.xs)?,\n",
                "16 => field.add_entries_to::<_, __prelude::pr::Int32>(Self::XS_NUMBER, &mut self.xs)?,\n",
            ),
            merge
        );

        let size = emit(&field, &file, &[], |g, p| g.generate_calculate_size(p));
        assert_eq!(
            "builder = builder.add_values::<_, __prelude::pr::Packed<__prelude::pr::Int32>>(Self::XS_NUMBER, &self.xs)?;\n",
            size
        );
    }

    #[test]
    fn test_unpacked_repeated_merge_order() {
        let file = file(Some("proto2"));
        let field = scalar("xs", 2, Type::Int32, Label::Repeated);

        let merge = emit(&field, &file, &[], |g, p| g.generate_merge_branches(p));
        assert_eq!(
            concat!(
                "16 => field.add_entries_to::<_, __prelude::pr::Int32>(Self::XS_NUMBER, &mut self.xs)?,\n",
                "18 => field.add_entries_to::<_, __prelude::pr::Packed<__prelude::pr::Int32>>(Self::XS_NUMBER, &mut self.xs)?,\n",
            ),
            merge
        );
    }

    #[test]
    fn test_proto3_repeated_defaults_to_packed() {
        let file = file(Some("proto3"));
        let field = scalar("xs", 2, Type::Int32, Label::Repeated);
        let size = emit(&field, &file, &[], |g, p| g.generate_calculate_size(p));
        assert!(size.contains("__prelude::pr::Packed<__prelude::pr::Int32>"));
    }

    #[test]
    fn test_repeated_string_single_merge_arm() {
        let file = file(Some("proto3"));
        let field = scalar("names", 3, Type::String, Label::Repeated);
        let merge = emit(&field, &file, &[], |g, p| g.generate_merge_branches(p));
        assert_eq!(
            "26 => field.add_entries_to::<_, __prelude::pr::String>(Self::NAMES_NUMBER, &mut self.names)?,\n",
            merge
        );
    }

    #[test]
    fn test_field_number_const() {
        let file = file(Some("proto3"));
        let field = scalar("count", 7, Type::Int32, Label::Optional);
        let index = TypeIndex::new(&[]);
        let generator = FieldGenerator::new(&field, &file, &index).unwrap();
        let mut buf = String::new();
        let mut printer = Printer::new(&mut buf);
        generator.generate_field_number_const(&mut printer);
        assert_eq!(
            "pub const COUNT_NUMBER: __prelude::FieldNumber = unsafe { __prelude::FieldNumber::new_unchecked(7) };\n",
            buf
        );
    }

    fn map_files() -> Vec<FileDescriptorProto> {
        let entry = DescriptorProto {
            name: Some("LabelsEntry".to_owned()),
            field: vec![
                scalar("key", 1, Type::String, Label::Optional),
                scalar("value", 2, Type::Int32, Label::Optional),
            ],
            options: Some(MessageOptions {
                map_entry: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        vec![FileDescriptorProto {
            name: Some("test.proto".to_owned()),
            package: Some("test".to_owned()),
            syntax: Some("proto3".to_owned()),
            message_type: vec![DescriptorProto {
                name: Some("Holder".to_owned()),
                nested_type: vec![entry],
                ..Default::default()
            }],
            ..Default::default()
        }]
    }

    #[test]
    fn test_map_field() {
        let files = map_files();
        let mut field = scalar("labels", 4, Type::Message, Label::Repeated);
        field.type_name = Some(".test.Holder.LabelsEntry".to_owned());

        let member = emit(&field, &files[0], &files, |g, p| g.generate_struct_field(p));
        assert_eq!(
            "labels: __prelude::MapField<__prelude::String, __prelude::i32>,\n",
            member
        );

        let merge = emit(&field, &files[0], &files, |g, p| g.generate_merge_branches(p));
        assert_eq!(
            "34 => field.add_entries_to::<_, (__prelude::pr::String, __prelude::pr::Int32)>(Self::LABELS_NUMBER, &mut self.labels)?,\n",
            merge
        );
    }

    #[test]
    fn test_proto2_string_accessors() {
        let file = file(None);
        let mut field = scalar("name", 1, Type::String, Label::Optional);
        field.default_value = Some("anon".to_owned());

        let items = emit(&field, &file, &[], |g, p| g.generate_items(p));
        assert!(items.starts_with(
            "pub const NAME_DEFAULT: &'static __prelude::str = \"anon\";\n"
        ));
        assert!(items.contains(concat!(
            "pub fn name(&self) -> &__prelude::str {\n",
            "  self.name.as_ref().map_or(Self::NAME_DEFAULT, __prelude::AsRef::as_ref)\n",
            "}\n",
        )));
        assert!(items.contains("pub fn has_name(&self) -> bool {\n"));
        assert!(items.contains("pub fn set_name(&mut self, value: __prelude::String) {\n"));
        assert!(items.contains("pub fn take_name(&mut self) -> __prelude::Option<__prelude::String> {\n"));
        assert!(items.contains("pub fn clear_name(&mut self) {\n"));
    }

    #[test]
    fn test_proto3_scalar_accessors() {
        let file = file(Some("proto3"));
        let field = scalar("count", 7, Type::Int32, Label::Optional);
        let items = emit(&field, &file, &[], |g, p| g.generate_items(p));
        assert_eq!(
            concat!(
                "pub static COUNT_DEFAULT: __prelude::i32 = 0;\n",
                "pub fn count(&self) -> &__prelude::i32 {\n",
                "  &self.count\n",
                "}\n",
                "pub fn count_mut(&mut self) -> &mut __prelude::i32 {\n",
                "  &mut self.count\n",
                "}\n",
            ),
            items
        );
    }

    #[test]
    fn test_submessage_member_and_merge() {
        let files = map_files();
        let mut field = scalar("holder", 2, Type::Message, Label::Optional);
        field.type_name = Some(".test.Holder".to_owned());

        let member = emit(&field, &files[0], &files, |g, p| g.generate_struct_field(p));
        assert_eq!(
            "holder: __prelude::Option<__prelude::Box<__file::Holder>>,\n",
            member
        );

        let merge = emit(&field, &files[0], &files, |g, p| g.generate_merge_branches(p));
        assert_eq!(
            concat!(
                "18 =>\n",
                "  match &mut self.holder {\n",
                "    __prelude::Some(v) => field.merge_value::<__prelude::pr::Message<__file::Holder>>(Self::HOLDER_NUMBER, v)?,\n",
                "    opt @ __prelude::None => *opt = __prelude::Some(__prelude::Box::new(field.read_value::<__prelude::pr::Message<__file::Holder>>(Self::HOLDER_NUMBER)?)),\n",
                "  },\n",
            ),
            merge
        );
    }
}
