//! Enum lowering.
//!
//! Generated enums are open: a newtype over `i32` that models every value,
//! with the declared values as constants. The zero value is the default
//! whether or not a declared value carries number 0, and `Debug` falls back
//! to the raw integer for undeclared values.

use std::fmt::Write;

use log::debug;
use prost_types::EnumDescriptorProto;

use crate::ident;
use crate::printer::Printer;

pub struct EnumGenerator<'a> {
    enum_type: &'a EnumDescriptorProto,
}

impl<'a> EnumGenerator<'a> {
    pub fn new(enum_type: &'a EnumDescriptorProto) -> EnumGenerator<'a> {
        EnumGenerator { enum_type }
    }

    pub fn generate<W: Write>(&self, printer: &mut Printer<W>) {
        debug!("  enum: {:?}", self.enum_type.name());

        let name = ident::escape(self.enum_type.name());
        let vars = [("name", name.as_str())];

        printer.print(
            &vars,
            concat!(
                "#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]\n",
                "pub struct $name$(pub i32);\n",
                "\n",
                "impl __prelude::Enum for $name$ { }\n",
                "impl __prelude::From<i32> for $name$ {\n",
                "  fn from(x: i32) -> Self {\n",
                "    Self(x)\n",
                "  }\n",
                "}\n",
                "impl __prelude::From<$name$> for i32 {\n",
                "  fn from(x: $name$) -> Self {\n",
                "    x.0\n",
                "  }\n",
                "}\n",
                "impl __prelude::Default for $name$ {\n",
                "  fn default() -> Self {\n",
                "    Self(0)\n",
                "  }\n",
                "}\n",
            ),
        );

        printer.print(&vars, "impl $name$ {\n");
        printer.indent();
        for value in &self.enum_type.value {
            printer.print(
                &[
                    ("name", ident::escape(value.name()).as_str()),
                    ("value", value.number().to_string().as_str()),
                ],
                "pub const $name$: Self = Self($value$);\n",
            );
        }
        printer.outdent();
        printer.print_raw("}\n");

        printer.print(&vars, "impl __prelude::Debug for $name$ {\n");
        printer.indent();
        printer.print_raw(
            "fn fmt(&self, f: &mut __prelude::Formatter) -> __prelude::fmt::Result {\n",
        );
        printer.indent();
        // Aliased values produce duplicate patterns; the attribute keeps the
        // match total without deduplicating descriptor order.
        printer.print_raw(concat!(
            "#[allow(unreachable_patterns)]\n",
            "match *self {\n",
        ));
        printer.indent();
        for value in &self.enum_type.value {
            printer.print(
                &[("name", ident::escape(value.name()).as_str())],
                "Self::$name$ => f.write_str(\"$name$\"),\n",
            );
        }
        printer.print_raw("Self(x) => x.fmt(f),\n");
        printer.outdent();
        printer.print_raw("}\n");
        printer.outdent();
        printer.print_raw("}\n");
        printer.outdent();
        printer.print_raw("}\n");
    }
}
