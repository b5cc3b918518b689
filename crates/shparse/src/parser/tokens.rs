//! Token types for the lexer

use std::fmt;

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word (command name, argument, redirect target). Quotes are kept
    /// verbatim in the text.
    Word(String),

    /// Comment text following `#`, up to but not including the newline
    Comment(String),

    /// Newline character
    Newline,

    /// Semicolon (;)
    Semicolon,

    /// Pipe (|)
    Pipe,

    /// And (&&)
    And,

    /// Or (||)
    Or,

    /// Redirect output (>)
    RedirectOut,

    /// Redirect output append (>>)
    RedirectAppend,

    /// Redirect input (<)
    RedirectIn,

    /// Left parenthesis (()
    LeftParen,

    /// Right parenthesis ())
    RightParen,

    /// Left brace ({)
    LeftBrace,

    /// Right brace (})
    RightBrace,
}

impl Token {
    /// Statement separators: `;` and newline are interchangeable.
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Semicolon | Token::Newline)
    }

    /// True if this is the word `text`.
    pub fn is_word(&self, text: &str) -> bool {
        matches!(self, Token::Word(w) if w == text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "`{}`", w),
            Token::Comment(_) => write!(f, "comment"),
            Token::Newline => write!(f, "newline"),
            Token::Semicolon => write!(f, "`;`"),
            Token::Pipe => write!(f, "`|`"),
            Token::And => write!(f, "`&&`"),
            Token::Or => write!(f, "`||`"),
            Token::RedirectOut => write!(f, "`>`"),
            Token::RedirectAppend => write!(f, "`>>`"),
            Token::RedirectIn => write!(f, "`<`"),
            Token::LeftParen => write!(f, "`(`"),
            Token::RightParen => write!(f, "`)`"),
            Token::LeftBrace => write!(f, "`{{`"),
            Token::RightBrace => write!(f, "`}}`"),
        }
    }
}
