use prost_types::FileDescriptorProto;

/// The `.proto` language version of a descriptor file. Field presence and
/// therefore accessor shape hang off this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Syntax {
    Proto2,
    Proto3,
}

impl Syntax {
    pub fn of_file(file: &FileDescriptorProto) -> Syntax {
        file.syntax.as_deref().into()
    }
}

impl From<Option<&str>> for Syntax {
    fn from(optional_str: Option<&str>) -> Self {
        match optional_str {
            None | Some("") | Some("proto2") => Syntax::Proto2,
            Some("proto3") => Syntax::Proto3,
            Some(s) => panic!("unknown syntax: {s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_syntax_string() {
        assert_eq!(Syntax::Proto2, None.into());
        assert_eq!(Syntax::Proto2, Some("proto2").into());
        assert_eq!(Syntax::Proto2, Some("").into());
        assert_eq!(Syntax::Proto3, Some("proto3").into());
    }

    #[test]
    #[should_panic(expected = "unknown syntax")]
    fn test_unknown_syntax_panics() {
        let _: Syntax = Some("proto4").into();
    }
}
