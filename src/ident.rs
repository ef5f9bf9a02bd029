//! Identifier derivation for generated code.
//!
//! Every name emitted by the generators is derived here, purely from
//! descriptor content, so that two runs over the same request produce the
//! same identifiers.

/// Reserved words of the target language. An identifier equal to one of
/// these is emitted in raw form (`r#loop`).
static RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct",
    "trait", "true", "type", "unsafe", "use", "where", "while", "dyn", "abstract", "become", "box",
    "do", "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "async",
    "await", "try",
];

/// Escapes an identifier that collides with a Rust keyword by prefixing it
/// with the raw-identifier marker. Non-colliding names pass through.
pub fn escape(s: &str) -> String {
    if RUST_KEYWORDS.contains(&s) {
        format!("r#{}", s)
    } else {
        s.to_owned()
    }
}

/// Derives the module name that holds a message's nested types: the simple
/// name lowercased, with an underscore inserted before any uppercase letter
/// that follows a lowercase one (`FooBar` becomes `foo_bar`).
pub fn message_mod_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_ascii_lowercase();
        }
    }
    result
}

/// Derives the module name a descriptor file is bound to in the index:
/// every character that is not an ASCII letter becomes `_`.
pub fn file_mod_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { '_' })
        .collect()
}

/// Name of the `FieldNumber` constant for a field. Field names are assumed
/// snake-ish already, so this is a character-wise uppercase.
pub fn field_number_name(field_name: &str) -> String {
    let mut result = field_name.to_ascii_uppercase();
    result.push_str("_NUMBER");
    result
}

/// Name of the default-value constant for a field.
pub fn field_default_name(field_name: &str) -> String {
    let mut result = field_name.to_ascii_uppercase();
    result.push_str("_DEFAULT");
    result
}

/// Path of a generated source within the response: the descriptor file's
/// name is the directory, the import name plus the configured extension is
/// the file.
pub fn output_file_path(file_name: &str, import_name: &str, extension: &str) -> String {
    format!("{}/{}{}", file_name, import_name, extension)
}
