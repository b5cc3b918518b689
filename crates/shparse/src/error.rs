//! Error types for shparse
//!
//! Every error carries the stream name given to the parser so callers can
//! tell which source failed. Lexical and syntax errors also carry the
//! position where the fault was detected.

use crate::limits::LimitExceeded;
use crate::parser::Position;
use thiserror::Error;

/// Result type alias using shparse's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// shparse error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Unterminated quote or invalid character.
    #[error("{}{position}: {message}", prefix(.name))]
    Lex {
        name: String,
        position: Position,
        message: String,
    },

    /// Unexpected token, missing closing keyword or bracket, or a missing
    /// command.
    #[error("{}{position}: {message}", prefix(.name))]
    Syntax {
        name: String,
        position: Position,
        message: String,
    },

    /// The input stream could not be read or is not valid UTF-8.
    #[error("{}io error: {source}", label(.name))]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Resource limit exceeded.
    #[error("{}resource limit exceeded: {source}", label(.name))]
    ResourceLimit {
        name: String,
        #[source]
        source: LimitExceeded,
    },
}

fn prefix(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("{}:", name)
    }
}

fn label(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("{}: ", name)
    }
}

impl Error {
    /// Create a syntax error.
    pub fn syntax(name: impl Into<String>, position: Position, message: impl Into<String>) -> Self {
        Self::Syntax {
            name: name.into(),
            position,
            message: message.into(),
        }
    }

    /// Name of the stream that failed.
    pub fn name(&self) -> &str {
        match self {
            Error::Lex { name, .. }
            | Error::Syntax { name, .. }
            | Error::Io { name, .. }
            | Error::ResourceLimit { name, .. } => name,
        }
    }

    /// Where the fault was detected, for lexical and syntax errors.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex { position, .. } | Error::Syntax { position, .. } => Some(*position),
            Error::Io { .. } | Error::ResourceLimit { .. } => None,
        }
    }

    /// True for unterminated quotes and invalid characters.
    pub fn is_lex(&self) -> bool {
        matches!(self, Error::Lex { .. })
    }

    /// True for structural errors found by the parser.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position {
            line,
            column,
            offset: 0,
        }
    }

    #[test]
    fn test_display_with_name() {
        let err = Error::syntax("script.sh", pos(3, 7), "unexpected `fi`");
        assert_eq!(err.to_string(), "script.sh:3:7: unexpected `fi`");
    }

    #[test]
    fn test_display_without_name() {
        let err = Error::Lex {
            name: String::new(),
            position: pos(1, 6),
            message: "unterminated single-quoted string".to_string(),
        };
        assert_eq!(err.to_string(), "1:6: unterminated single-quoted string");
    }

    #[test]
    fn test_limit_display() {
        let err = Error::ResourceLimit {
            name: "in".to_string(),
            source: LimitExceeded::MaxDepth(4),
        };
        assert_eq!(
            err.to_string(),
            "in: resource limit exceeded: maximum nesting depth exceeded (4)"
        );
        assert_eq!(err.position(), None);
        assert_eq!(err.name(), "in");
    }
}
