//! Per-file output.
//!
//! One descriptor file becomes one generated source: a preamble binding the
//! enclosing module's `__file` alias and the runtime prelude, then every
//! top-level message, enum, and extension in descriptor order.

use std::fmt::Write;

use prost_types::FileDescriptorProto;

use crate::printer::Printer;
use crate::type_index::TypeIndex;
use crate::GeneratorError;

use super::enums::EnumGenerator;
use super::fields::FieldGenerator;
use super::messages::MessageGenerator;

pub struct FileGenerator<'a> {
    file: &'a FileDescriptorProto,
    index: &'a TypeIndex<'a>,
}

impl<'a> FileGenerator<'a> {
    pub fn new(file: &'a FileDescriptorProto, index: &'a TypeIndex<'a>) -> FileGenerator<'a> {
        FileGenerator { file, index }
    }

    pub fn generate<W: Write>(&self, printer: &mut Printer<W>) -> Result<(), GeneratorError> {
        printer.print_raw(concat!(
            "pub(self) use super::__file;\n",
            "pub(self) use ::protrust::gen_prelude as __prelude;\n",
            "\n",
        ));

        for message in &self.file.message_type {
            MessageGenerator::new(message, self.file, self.index, self.file.package())
                .generate(printer)?;
        }
        for enum_type in &self.file.enum_type {
            EnumGenerator::new(enum_type).generate(printer);
        }
        for extension in &self.file.extension {
            FieldGenerator::new(extension, self.file, self.index)?.generate_extension(printer);
        }
        Ok(())
    }
}
