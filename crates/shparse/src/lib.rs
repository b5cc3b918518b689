//! shparse - Parser and canonical printer for POSIX-like shell syntax
//!
//! Part of the Everruns ecosystem.
//!
//! Source text is tokenized, parsed by recursive descent into a [`Program`]
//! and can be rendered back to one canonical spelling.
//!
//! # Example
//!
//! ```rust
//! use shparse::{BinaryOp, Node};
//!
//! fn main() -> anyhow::Result<()> {
//!     let program = shparse::parse("foo && bar || baz\n".as_bytes(), "example.sh")?;
//!     assert_eq!(program.statements.len(), 1);
//!
//!     let Node::Binary(chain) = &program.statements[0] else {
//!         panic!("expected a chain");
//!     };
//!     assert_eq!(chain.op, BinaryOp::And);
//!
//!     assert_eq!(program.render(), "foo && bar || baz");
//!     Ok(())
//! }
//! ```
//!
//! # Grammar
//!
//! Simple commands with `>`, `>>` and `<` redirections, `( ... )`
//! subshells, `{ ... }` blocks, `if`/`elif`/`else`, `while`, `name() { ... }`
//! function definitions, comments, and chains joined by `&&`, `||` and `|`.
//! The three chain operators share one precedence level and associate to
//! the right.

mod error;
mod limits;
pub mod parser;

pub use error::{Error, Result};
pub use limits::{LimitExceeded, ParserLimits};
pub use parser::{
    BinaryExpr, BinaryOp, Block, Command, Comment, ElifClause, FuncDecl, IfStatement, Literal,
    Node, Parser, Position, Program, Redirect, RedirectOp, Subshell, WhileStatement,
};

use std::io::{self, Read};

/// Parse a whole stream. `name` labels the stream in error messages.
///
/// The stream is read to its end (or to the configured size limit) before
/// parsing; the caller keeps ownership of it.
pub fn parse<R: Read>(reader: R, name: &str) -> Result<Program> {
    parse_with_limits(reader, name, ParserLimits::default())
}

/// Parse a whole stream with custom resource limits.
pub fn parse_with_limits<R: Read>(reader: R, name: &str, limits: ParserLimits) -> Result<Program> {
    let io_error = |source| Error::Io {
        name: name.to_string(),
        source,
    };

    // One byte past the limit is enough to detect oversized input
    let cap = (limits.max_input_bytes as u64).saturating_add(1);
    let mut bytes = Vec::new();
    reader.take(cap).read_to_end(&mut bytes).map_err(io_error)?;
    if bytes.len() > limits.max_input_bytes {
        return Err(Error::ResourceLimit {
            name: name.to_string(),
            source: LimitExceeded::InputTooLarge(limits.max_input_bytes),
        });
    }

    let input = String::from_utf8(bytes)
        .map_err(|e| io_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Parser::with_limits(&input, name, limits).parse()
}

/// Parse source text that is already in memory.
pub fn parse_str(input: &str, name: &str) -> Result<Program> {
    Parser::new(input, name).parse()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reader() {
        let program = parse("echo hi\n".as_bytes(), "stdin").unwrap();
        assert_eq!(program.render(), "echo hi");
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let bytes: &[u8] = &[b'e', 0xff, 0xfe];
        let err = parse(bytes, "bin").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.name(), "bin");
    }

    #[test]
    fn test_reader_respects_size_limit() {
        let limits = ParserLimits::new().max_input_bytes(8);
        let err = parse_with_limits("echo 0123456789".as_bytes(), "big", limits).unwrap_err();
        assert!(matches!(
            err,
            Error::ResourceLimit {
                source: LimitExceeded::InputTooLarge(8),
                ..
            }
        ));
    }

    #[test]
    fn test_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Program>();
        assert_send_sync::<Node>();
        assert_send_sync::<Error>();
    }
}
