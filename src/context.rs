//! The response-building side of the plugin protocol.
//!
//! Generators do not touch the file system; every `open` call reserves one
//! `File` entry in the eventual `CodeGeneratorResponse` and hands back a
//! sink for its content. Entries appear in the response in open order, and
//! a sink fills its reserved slot when it is released, so two sinks may be
//! live at once (the index printer stays open across per-file streams).

use std::cell::RefCell;
use std::fmt;
use std::mem;

use prost_types::compiler::code_generator_response;
use prost_types::compiler::CodeGeneratorResponse;

pub struct GeneratorContext {
    files: RefCell<Vec<code_generator_response::File>>,
}

impl GeneratorContext {
    pub fn new() -> GeneratorContext {
        GeneratorContext {
            files: RefCell::new(Vec::new()),
        }
    }

    /// Adds one file to the response and returns the sink for its content.
    pub fn open(&self, name: &str) -> FileSink<'_> {
        let mut files = self.files.borrow_mut();
        files.push(code_generator_response::File {
            name: Some(name.to_owned()),
            ..Default::default()
        });
        FileSink {
            files: &self.files,
            index: files.len() - 1,
            buf: String::new(),
        }
    }

    pub fn into_response(self) -> CodeGeneratorResponse {
        CodeGeneratorResponse {
            file: self.files.into_inner(),
            ..Default::default()
        }
    }
}

impl Default for GeneratorContext {
    fn default() -> GeneratorContext {
        GeneratorContext::new()
    }
}

/// Write half of one response file. Content lands in the reserved response
/// slot when the sink is dropped.
pub struct FileSink<'a> {
    files: &'a RefCell<Vec<code_generator_response::File>>,
    index: usize,
    buf: String,
}

impl fmt::Write for FileSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl Drop for FileSink<'_> {
    fn drop(&mut self) {
        self.files.borrow_mut()[self.index].content = Some(mem::take(&mut self.buf));
    }
}
