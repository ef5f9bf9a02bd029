//! The generator entry points and the module-index driver.
//!
//! `RustGenerator` is the plugin's code generator: it parses options,
//! indexes every descriptor in the request, and hands the batch to
//! `ModGenerator`, which writes the `mod.rs` index and one source per input
//! file. Descriptor cross-references span files, so only the batch entry
//! point is implemented; the single-file one refuses.

use log::debug;
use prost_types::FileDescriptorProto;

use crate::context::GeneratorContext;
use crate::ident;
use crate::options::Options;
use crate::printer::Printer;
use crate::type_index::TypeIndex;
use crate::GeneratorError;

mod enums;
mod fields;
mod files;
mod messages;

use files::FileGenerator;

/// A code generator driven by the plugin protocol.
pub trait CodeGenerator {
    /// Generates output for a single file. Unsupported here: descriptor
    /// cross-references require the whole request.
    fn generate(
        &self,
        _file: &FileDescriptorProto,
        _parameter: &str,
        _context: &GeneratorContext,
    ) -> Result<(), GeneratorError> {
        Err(GeneratorError::Unimplemented)
    }

    /// Generates output for every file in the request.
    fn generate_all(
        &self,
        files: &[FileDescriptorProto],
        parameter: &str,
        context: &GeneratorContext,
    ) -> Result<(), GeneratorError>;
}

/// The protrust-backed Rust generator.
pub struct RustGenerator;

impl CodeGenerator for RustGenerator {
    fn generate_all(
        &self,
        files: &[FileDescriptorProto],
        parameter: &str,
        context: &GeneratorContext,
    ) -> Result<(), GeneratorError> {
        let options = Options::parse(parameter)?;
        let index = TypeIndex::new(files);
        ModGenerator::new(&options, &index).generate(files, context)
    }
}

/// Name of the runtime-backed source inside each per-file module.
const SOURCE_IMPORT: &str = "protrust";

/// Writes the top-level index binding each input file to its module path,
/// and drives the per-file generators.
pub struct ModGenerator<'a> {
    options: &'a Options,
    index: &'a TypeIndex<'a>,
}

impl<'a> ModGenerator<'a> {
    pub fn new(options: &'a Options, index: &'a TypeIndex<'a>) -> ModGenerator<'a> {
        ModGenerator { options, index }
    }

    pub fn generate(
        &self,
        files: &[FileDescriptorProto],
        context: &GeneratorContext,
    ) -> Result<(), GeneratorError> {
        let mut mod_printer = Printer::new(context.open("mod.rs"));
        mod_printer.print_raw(
            "// DO NOT EDIT! This file was generated by protoc-gen-rust as part of the protrust library\n\n",
        );

        for file in files {
            debug!("file: {:?}, package: {:?}", file.name(), file.package());
            self.generate_file_mod(file, &mut mod_printer);

            let path =
                ident::output_file_path(file.name(), SOURCE_IMPORT, &self.options.file_extension);
            let mut file_printer = Printer::new(context.open(&path));
            FileGenerator::new(file, self.index).generate(&mut file_printer)?;
        }
        Ok(())
    }

    fn generate_file_mod<W: std::fmt::Write>(
        &self,
        file: &FileDescriptorProto,
        printer: &mut Printer<W>,
    ) {
        let file_mod = ident::file_mod_name(file.name());
        printer.print(
            &[("file_dir", file.name()), ("file_mod", file_mod.as_str())],
            concat!("#[path = \"$file_dir$\"]\n", "pub mod $file_mod$ {\n"),
        );
        printer.indent();
        printer.print(
            &[("file_mod", file_mod.as_str())],
            concat!(
                "pub(self) use super::globals as __globals;\n",
                "pub(self) use super::$file_mod$ as __file;\n",
            ),
        );

        printer.print_raw("pub(self) mod __imports {\n");
        printer.indent();
        for dependency in &file.dependency {
            printer.print(
                &[("import", ident::file_mod_name(dependency).as_str())],
                "pub(super) use super::super::$import$;\n",
            );
        }
        printer.outdent();
        printer.print_raw("}\n\n");

        let source_file = format!("{}{}", SOURCE_IMPORT, self.options.file_extension);
        printer.print(
            &[("source_file", source_file.as_str())],
            concat!(
                "#[path = \"$source_file$\"]\n",
                "mod protrust;\n",
                "\n",
                "pub use self::protrust::*;\n",
                "\n",
            ),
        );

        for import in &self.options.imports {
            let import_file = format!("{}{}", import, self.options.file_extension);
            printer.print(
                &[
                    ("import", import.as_str()),
                    ("import_file", import_file.as_str()),
                ],
                concat!(
                    "\n",
                    "#[path = \"$import_file$\"]\n",
                    "mod $import$;\n",
                    "\n",
                    "pub use self::$import$::*;\n",
                ),
            );
        }

        printer.outdent();
        printer.print_raw("}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_file(name: &str) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some(name.to_owned()),
            ..Default::default()
        }
    }

    fn run(files: &[FileDescriptorProto], parameter: &str) -> Vec<(String, String)> {
        let context = GeneratorContext::new();
        RustGenerator
            .generate_all(files, parameter, &context)
            .unwrap();
        context
            .into_response()
            .file
            .into_iter()
            .map(|file| (file.name.unwrap(), file.content.unwrap()))
            .collect()
    }

    #[test]
    fn test_single_file_mod_block() {
        let outputs = run(&[empty_file("empty.proto")], "");
        assert_eq!(2, outputs.len());
        assert_eq!("mod.rs", outputs[0].0);
        assert_eq!("empty.proto/protrust.rs", outputs[1].0);

        let expected_mod = concat!(
            "// DO NOT EDIT! This file was generated by protoc-gen-rust as part of the protrust library\n",
            "\n",
            "#[path = \"empty.proto\"]\n",
            "pub mod empty_proto {\n",
            "  pub(self) use super::globals as __globals;\n",
            "  pub(self) use super::empty_proto as __file;\n",
            "  pub(self) mod __imports {\n",
            "  }\n",
            "\n",
            "  #[path = \"protrust.rs\"]\n",
            "  mod protrust;\n",
            "\n",
            "  pub use self::protrust::*;\n",
            "\n",
            "}\n",
        );
        assert_eq!(expected_mod, outputs[0].1);
    }

    #[test]
    fn test_dependency_imports() {
        let mut dependent = empty_file("a/b.proto");
        dependent.dependency = vec!["c.proto".to_owned()];
        let outputs = run(&[empty_file("c.proto"), dependent], "");

        assert_eq!("mod.rs", outputs[0].0);
        assert_eq!("c.proto/protrust.rs", outputs[1].0);
        assert_eq!("a/b.proto/protrust.rs", outputs[2].0);

        let mod_rs = &outputs[0].1;
        let c_pos = mod_rs.find("pub mod c_proto {").unwrap();
        let ab_pos = mod_rs.find("pub mod a_b_proto {").unwrap();
        assert!(c_pos < ab_pos, "index follows request order");
        assert!(mod_rs.contains(concat!(
            "  pub(self) mod __imports {\n",
            "    pub(super) use super::super::c_proto;\n",
            "  }\n",
        )));
    }

    #[test]
    fn test_option_imports_reexported() {
        let outputs = run(&[empty_file("empty.proto")], "imports=timestamp");
        let mod_rs = &outputs[0].1;
        assert!(mod_rs.contains(concat!(
            "\n",
            "  #[path = \"timestamp.rs\"]\n",
            "  mod timestamp;\n",
            "\n",
            "  pub use self::timestamp::*;\n",
        )));
    }

    #[test]
    fn test_file_extension_applied() {
        let outputs = run(&[empty_file("empty.proto")], "file_extension=.g.rs");
        assert_eq!("empty.proto/protrust.g.rs", outputs[1].0);
        assert!(outputs[0].1.contains("#[path = \"protrust.g.rs\"]\n"));
    }

    #[test]
    fn test_generate_single_file_is_unimplemented() {
        let context = GeneratorContext::new();
        let file = empty_file("empty.proto");
        let err = RustGenerator.generate(&file, "", &context).unwrap_err();
        assert_eq!("unimplemented; use GenerateAll", err.to_string());
    }
}
