//! `protrustc` turns Protocol Buffers descriptors into Rust code backed by
//! the `protrust` runtime.
//!
//! The crate is the engine behind the `protoc-gen-rust` plugin binary:
//! protoc hands it a `CodeGeneratorRequest` over stdin, and for every input
//! `.proto` the engine emits one runtime-backed source plus a `mod.rs`
//! index binding each file to its module path.
//!
//! ```no_run
//! use std::io::Read;
//!
//! use prost::Message;
//! use prost_types::compiler::CodeGeneratorRequest;
//!
//! let mut buf = Vec::new();
//! std::io::stdin().read_to_end(&mut buf).unwrap();
//! let request = CodeGeneratorRequest::decode(&*buf).unwrap();
//! let response = protrustc::run_plugin(request);
//! ```

#![doc(html_root_url = "https://docs.rs/protrustc/0.1.0")]

use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use thiserror::Error;

mod code_generator;
mod context;
mod ident;
mod options;
mod printer;
mod syntax;
mod type_index;
mod types;
mod wire;

pub use crate::code_generator::{CodeGenerator, RustGenerator};
pub use crate::context::{FileSink, GeneratorContext};
pub use crate::options::Options;

/// Errors surfaced through the plugin response.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The plugin parameter string named an option the generator does not
    /// recognize.
    #[error("Unknown generator option: {0}")]
    UnknownOption(String),

    /// A field descriptor carried a type outside the descriptor enum.
    #[error("unknown field type")]
    UnknownFieldType,

    /// Single-file generation was requested; descriptor cross-references
    /// require the whole batch.
    #[error("unimplemented; use GenerateAll")]
    Unimplemented,
}

/// Runs the generator over a decoded request and produces the response,
/// reporting any generation failure in-band through the response's `error`
/// field.
///
/// Every file in the request is generated, dependencies included: the
/// emitted index re-exports a module per dependency, so the output only
/// resolves when those modules exist alongside it.
pub fn run_plugin(request: CodeGeneratorRequest) -> CodeGeneratorResponse {
    let context = GeneratorContext::new();
    match RustGenerator.generate_all(&request.proto_file, request.parameter(), &context) {
        Ok(()) => context.into_response(),
        Err(error) => CodeGeneratorResponse {
            error: Some(error.to_string()),
            ..Default::default()
        },
    }
}
