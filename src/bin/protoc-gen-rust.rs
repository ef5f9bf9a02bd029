//! The protoc plugin executable.
//!
//! protoc invokes this with a `CodeGeneratorRequest` on stdin and expects a
//! `CodeGeneratorResponse` on stdout. Generation failures are reported
//! in-band through the response's `error` field; only an unreadable request
//! or an unwritable response exits non-zero.

use std::io::{self, Read, Write};

use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;

    let request = CodeGeneratorRequest::decode(&*buf).map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid CodeGeneratorRequest: {}", error),
        )
    })?;

    let response = protrustc::run_plugin(request);

    let mut out = Vec::new();
    response.encode(&mut out).map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid CodeGeneratorResponse: {}", error),
        )
    })?;
    io::stdout().write_all(&out)?;

    Ok(())
}
