//! The output printer threaded through every generator.
//!
//! A printer pairs a sink with an indentation level and a `$name$`
//! substitution facility. Indentation is two spaces per level and is only
//! written in front of non-empty lines, so a template that ends mid-line
//! leaves the printer mid-line and the next print continues it.

use std::fmt::Write;

pub struct Printer<W> {
    sink: W,
    indent: usize,
    at_line_start: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(sink: W) -> Printer<W> {
        Printer {
            sink,
            indent: 0,
            at_line_start: true,
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn outdent(&mut self) {
        assert!(self.indent > 0, "outdent without matching indent");
        self.indent -= 1;
    }

    /// Prints `text`, replacing each `$name$` with the matching value from
    /// `vars`. `$$` produces a literal `$`. A malformed template or an
    /// undefined variable is a generator bug.
    pub fn print(&mut self, vars: &[(&str, &str)], text: &str) {
        let mut rest = text;
        while let Some(pos) = rest.find('$') {
            self.write(&rest[..pos]);
            let after = &rest[pos + 1..];
            let end = after
                .find('$')
                .unwrap_or_else(|| panic!("unterminated variable in template {:?}", text));
            let name = &after[..end];
            if name.is_empty() {
                self.write("$");
            } else {
                let value = vars
                    .iter()
                    .find(|(var, _)| *var == name)
                    .map(|(_, value)| *value)
                    .unwrap_or_else(|| panic!("undefined template variable {:?}", name));
                self.write(value);
            }
            rest = &after[end + 1..];
        }
        self.write(rest);
    }

    /// Prints `text` verbatim, without substitution. Indentation still
    /// applies.
    pub fn print_raw(&mut self, text: &str) {
        self.write(text);
    }

    fn write(&mut self, text: &str) {
        let mut first = true;
        for line in text.split('\n') {
            if !first {
                self.sink.write_char('\n').expect("printer sink failed");
                self.at_line_start = true;
            }
            first = false;
            if line.is_empty() {
                continue;
            }
            if self.at_line_start {
                for _ in 0..self.indent {
                    self.sink.write_str("  ").expect("printer sink failed");
                }
                self.at_line_start = false;
            }
            self.sink.write_str(line).expect("printer sink failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print_to_string(f: impl FnOnce(&mut Printer<&mut String>)) -> String {
        let mut buf = String::new();
        let mut printer = Printer::new(&mut buf);
        f(&mut printer);
        buf
    }

    #[test]
    fn test_substitution() {
        let out = print_to_string(|p| {
            p.print(&[("name", "Foo"), ("num", "7")], "pub struct $name$; // $num$\n");
        });
        assert_eq!("pub struct Foo; // 7\n", out);
    }

    #[test]
    fn test_dollar_escape() {
        let out = print_to_string(|p| p.print(&[], "a $$ sign\n"));
        assert_eq!("a $ sign\n", out);
    }

    #[test]
    fn test_indent_nesting() {
        let out = print_to_string(|p| {
            p.print_raw("mod a {\n");
            p.indent();
            p.print_raw("fn b() {\n");
            p.indent();
            p.print_raw("c();\n");
            p.outdent();
            p.print_raw("}\n");
            p.outdent();
            p.print_raw("}\n");
        });
        assert_eq!("mod a {\n  fn b() {\n    c();\n  }\n}\n", out);
    }

    #[test]
    fn test_blank_lines_not_indented() {
        let out = print_to_string(|p| {
            p.indent();
            p.print_raw("a\n\nb\n");
        });
        assert_eq!("  a\n\n  b\n", out);
    }

    #[test]
    fn test_mid_line_continuation() {
        let out = print_to_string(|p| {
            p.indent();
            p.print_raw("value");
            p.outdent();
            p.print_raw("}\n");
        });
        // The closing brace lands on the same line as the value because the
        // previous print left the printer mid-line.
        assert_eq!("  value}\n", out);
    }

    #[test]
    fn test_literal_indent_inside_template() {
        let out = print_to_string(|p| {
            p.indent();
            p.print_raw("fn f() {\n  body\n}\n");
        });
        assert_eq!("  fn f() {\n    body\n  }\n", out);
    }

    #[test]
    #[should_panic(expected = "undefined template variable")]
    fn test_undefined_variable_panics() {
        print_to_string(|p| p.print(&[], "$missing$"));
    }
}
