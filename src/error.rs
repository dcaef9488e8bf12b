use std::fmt;

use crate::model::{SectionId, SectionKind};

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    SectionNotFound(SectionId),
    IndexOutOfRange { index: usize, len: usize },
    ContentMismatch {
        expected: SectionKind,
        found: SectionKind,
    },
    NotAList(SectionKind),
    Font(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::SectionNotFound(id) => write!(f, "no section with id {id}"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
            Error::ContentMismatch { expected, found } => write!(
                f,
                "content of kind '{}' cannot replace a '{}' section",
                found.key(),
                expected.key()
            ),
            Error::NotAList(kind) => write!(f, "'{}' sections have no entries", kind.key()),
            Error::Font(msg) => write!(f, "font error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
