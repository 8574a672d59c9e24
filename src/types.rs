use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One step of a resolved path: a property name or an array index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PathToken {
    Key(String),
    Index(usize),
}

/// The character `resolve` splits its input on.
///
/// Produced paths always use `.` and `[index]`, whatever the separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Separator {
    #[default]
    Dot,
    Slash,
    Custom(char),
}

impl Separator {
    pub fn as_char(&self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Slash => '/',
            Separator::Custom(c) => *c,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ResolverError {
    #[error("argument required: {argument}")]
    ArgumentRequired { argument: &'static str },
    #[error("malformed path: {0}")]
    MalformedPath(String),
}
