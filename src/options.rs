//! Plugin parameter parsing.
//!
//! protoc hands the string after `--rust_out=` (up to the `:`) to the
//! plugin verbatim. It is a comma-separated list of `key=value` pairs.

use crate::GeneratorError;

/// Recognized generator options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Suffix of generated file names.
    pub file_extension: String,
    /// Additional sibling modules re-exported from every per-file module.
    pub imports: Vec<String>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            file_extension: ".rs".to_owned(),
            imports: Vec::new(),
        }
    }
}

impl Options {
    /// Parses the plugin parameter string. Any key other than
    /// `file_extension` and `imports` aborts generation.
    pub fn parse(parameter: &str) -> Result<Options, GeneratorError> {
        let mut options = Options::default();
        for pair in parameter.split(',').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "file_extension" => options.file_extension = value.to_owned(),
                "imports" => options.imports.extend(
                    value
                        .split(',')
                        .filter(|import| !import.is_empty())
                        .map(str::to_owned),
                ),
                _ => return Err(GeneratorError::UnknownOption(key.to_owned())),
            }
        }
        Ok(options)
    }
}
