//! Message lowering.
//!
//! One message becomes: the struct, the `Message` impl (merge loop, size,
//! write, unknown-field accessors), an `Initializable` impl, the
//! extension-set surface when the message declares extension ranges, the
//! reflection debug hook, the inherent impl with field constants and
//! accessors, and a nested module for inner types.

use std::fmt::Write;

use log::debug;
use prost_types::{DescriptorProto, FileDescriptorProto};

use crate::ident;
use crate::printer::Printer;
use crate::type_index::TypeIndex;
use crate::GeneratorError;

use super::enums::EnumGenerator;
use super::fields::FieldGenerator;

pub struct MessageGenerator<'a> {
    message: &'a DescriptorProto,
    file: &'a FileDescriptorProto,
    index: &'a TypeIndex<'a>,
    full_name: String,
}

impl<'a> MessageGenerator<'a> {
    /// `scope` is the dotted protobuf name containing this message (package
    /// plus any outer messages), empty at the root of an unpackaged file.
    pub fn new(
        message: &'a DescriptorProto,
        file: &'a FileDescriptorProto,
        index: &'a TypeIndex<'a>,
        scope: &str,
    ) -> MessageGenerator<'a> {
        let full_name = if scope.is_empty() {
            message.name().to_owned()
        } else {
            format!("{}.{}", scope, message.name())
        };
        MessageGenerator {
            message,
            file,
            index,
            full_name,
        }
    }

    fn nested_messages(&self) -> impl Iterator<Item = &'a DescriptorProto> {
        // Synthetic map-entry types are lowered through their map field, not
        // as messages.
        self.message.nested_type.iter().filter(|nested| {
            !nested
                .options
                .as_ref()
                .and_then(|options| options.map_entry)
                .unwrap_or(false)
        })
    }

    fn has_inner_items(&self) -> bool {
        self.nested_messages().next().is_some()
            || !self.message.enum_type.is_empty()
            || !self.message.extension.is_empty()
            || !self.message.oneof_decl.is_empty()
    }

    pub fn generate<W: Write>(&self, printer: &mut Printer<W>) -> Result<(), GeneratorError> {
        debug!("  message: {:?}", self.message.name());

        let name = ident::escape(self.message.name());
        let mod_name = ident::message_mod_name(self.message.name());
        let vars = [
            ("name", name.as_str()),
            ("mod_name", mod_name.as_str()),
            ("full_name", self.full_name.as_str()),
        ];

        let fields = self
            .message
            .field
            .iter()
            .map(|field| FieldGenerator::new(field, self.file, self.index))
            .collect::<Result<Vec<_>, _>>()?;
        let has_extension_ranges = !self.message.extension_range.is_empty();

        printer.print(
            &vars,
            concat!(
                "#[derive(Clone, Debug, PartialEq, Default)]\n",
                "pub struct $name$ {\n",
            ),
        );
        printer.indent();
        for field in &fields {
            field.generate_struct_field(printer)?;
        }
        if has_extension_ranges {
            printer.print_raw("__extensions: __prelude::ExtensionSet<Self>,\n");
        }
        printer.print_raw("__unknown_fields: __prelude::UnknownFieldSet,\n");
        printer.outdent();
        printer.print_raw("}\n");

        printer.print(&vars, "impl __prelude::Message for self::$name$ {\n");
        printer.indent();
        printer.print_raw(
            "fn merge_from<T: __prelude::Input>(&mut self, input: &mut __prelude::CodedReader<T>) -> __prelude::read::Result<()> {\n",
        );
        printer.indent();
        printer.print_raw("while let __prelude::Some(field) = input.read_field()? {\n");
        printer.indent();
        printer.print_raw("match field.tag() {\n");
        printer.indent();
        for field in &fields {
            field.generate_merge_branches(printer)?;
        }
        if has_extension_ranges {
            printer.print_raw(concat!(
                "_ => \n",
                "  field\n",
                "    .check_and_try_add_field_to(&mut self.__extensions)?\n",
                "    .or_try(&mut self.__unknown_fields)?\n",
                "    .or_skip()?\n",
            ));
        } else {
            printer.print_raw(concat!(
                "_ => \n",
                "  field\n",
                "    .check_and_try_add_field_to(&mut self.__unknown_fields)?\n",
                "    .or_skip()?\n",
            ));
        }
        printer.outdent();
        printer.print_raw("}\n");
        printer.outdent();
        printer.print_raw(concat!("}\n", "__prelude::Ok(())\n"));
        printer.outdent();
        printer.print_raw(concat!(
            "}\n",
            "fn calculate_size(&self) -> __prelude::Option<__prelude::Length> {\n",
        ));
        printer.indent();
        printer.print_raw("let mut builder = __prelude::pio::LengthBuilder::new();\n");
        for field in &fields {
            field.generate_calculate_size(printer)?;
        }
        if has_extension_ranges {
            printer.print_raw("builder = builder.add_fields(&self.__extensions)?;\n");
        }
        printer.print_raw(concat!(
            "builder = builder.add_fields(&self.__unknown_fields)?;\n",
            "__prelude::Some(builder.build())",
        ));
        printer.outdent();
        printer.print_raw(concat!(
            "}\n",
            "fn write_to<T: __prelude::Output>(&self, output: &mut __prelude::CodedWriter<T>) -> __prelude::write::Result {\n",
        ));
        printer.indent();
        for field in &fields {
            field.generate_write_to(printer)?;
        }
        if has_extension_ranges {
            printer.print_raw("output.write_fields(&self.__extensions)?;\n");
        }
        printer.print_raw(concat!(
            "output.write_fields(&self.__unknown_fields)?;\n",
            "__prelude::Ok(())\n",
        ));
        printer.outdent();
        printer.print_raw(concat!(
            "}\n",
            "fn unknown_fields(&self) -> &__prelude::UnknownFieldSet {\n",
            "  &self.__unknown_fields\n",
            "}\n",
            "fn unknown_fields_mut(&mut self) -> &mut __prelude::UnknownFieldSet {\n",
            "  &mut self.__unknown_fields\n",
            "}\n",
        ));
        printer.outdent();
        printer.print(
            &vars,
            concat!("}\n", "impl __prelude::Initializable for self::$name$ {\n"),
        );
        printer.indent();
        printer.print_raw("fn is_initialized(&self) -> bool {\n");
        printer.indent();
        for field in &fields {
            field.generate_is_initialized(printer);
        }
        printer.print_raw("true\n");
        printer.outdent();
        printer.print_raw("}\n");
        printer.outdent();
        printer.print_raw("}\n");

        if has_extension_ranges {
            printer.print(
                &vars,
                concat!(
                    "impl __prelude::ExtendableMessage for self::$name$ {\n",
                    "  fn extensions(&self) -> &__prelude::ExtensionSet<Self> {\n",
                    "    &self.__extensions\n",
                    "  }\n",
                    "  fn extensions_mut(&mut self) -> &mut __prelude::ExtensionSet<Self> {\n",
                    "    &mut self.__extensions\n",
                    "  }\n",
                    "}\n",
                ),
            );
        }

        // TODO: bind the full descriptor through prefl::msg_type! once the
        // runtime's reflection registry lands; dbg_msg! is the only hook the
        // runtime accepts today.
        printer.print(
            &vars,
            "__prelude::prefl::dbg_msg!(self::$name$ { full_name: \"$full_name$\", name: \"$name$\" });\n",
        );

        printer.print(&vars, "impl self::$name$ {\n");
        printer.indent();
        for field in &fields {
            field.generate_field_number_const(printer);
            field.generate_items(printer)?;
        }
        printer.outdent();
        printer.print_raw("}\n");

        if self.has_inner_items() {
            printer.print(&vars, "pub mod $mod_name$ {\n");
            printer.indent();
            printer.print_raw(concat!(
                "pub(self) use super::__file;\n",
                "pub(self) use ::protrust::gen_prelude as __prelude;\n",
                "\n",
            ));
            for nested in self.nested_messages() {
                MessageGenerator::new(nested, self.file, self.index, &self.full_name)
                    .generate(printer)?;
            }
            for nested_enum in &self.message.enum_type {
                EnumGenerator::new(nested_enum).generate(printer);
            }
            for extension in &self.message.extension {
                FieldGenerator::new(extension, self.file, self.index)?
                    .generate_extension(printer);
            }
            // TODO: oneof emission; declarations already open this module.
            printer.outdent();
            printer.print_raw("}\n");
        }
        Ok(())
    }
}
