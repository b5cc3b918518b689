//! Lexer for shell scripts
//!
//! Tokenizes input into a stream of tokens with source position tracking.
//! Quoted spans are scanned as opaque regions and kept verbatim in the word
//! text; no unescaping or expansion happens at this layer.

use thiserror::Error;

use super::span::{Position, Span};
use super::tokens::Token;

/// A token with its source location span.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Lexical error. The parser attaches the stream name when surfacing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LexError {
    pub position: Position,
    pub message: String,
}

impl LexError {
    fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Lexer for shell scripts.
pub struct Lexer<'a> {
    /// Current position in the input
    position: Position,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            position: Position::new(),
            chars: input.chars().peekable(),
        }
    }

    /// Get the current position in the input.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Get the next token from the input (without span info).
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        Ok(self.next_spanned_token()?.map(|t| t.token))
    }

    /// Get the next token with its source span.
    pub fn next_spanned_token(&mut self) -> Result<Option<SpannedToken>, LexError> {
        self.skip_whitespace();
        let start = self.position;
        let Some(token) = self.next_token_inner()? else {
            return Ok(None);
        };
        Ok(Some(SpannedToken {
            token,
            span: Span::from_positions(start, self.position),
        }))
    }

    /// Collect every remaining token, stopping at the first lexical error.
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_spanned_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Look one character past the next one without consuming anything.
    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if let Some(c) = ch {
            self.position.advance(c);
        }
        ch
    }

    /// Internal: get next token (called after whitespace skip)
    fn next_token_inner(&mut self) -> Result<Option<Token>, LexError> {
        let Some(ch) = self.peek_char() else {
            return Ok(None);
        };

        let token = match ch {
            '\n' => {
                self.advance();
                Token::Newline
            }
            ';' => {
                self.advance();
                Token::Semicolon
            }
            '|' => {
                self.advance();
                if self.peek_char() == Some('|') {
                    self.advance();
                    Token::Or
                } else {
                    Token::Pipe
                }
            }
            '&' => {
                let start = self.position;
                self.advance();
                if self.peek_char() == Some('&') {
                    self.advance();
                    Token::And
                } else {
                    return Err(LexError::new(start, "unexpected character `&`"));
                }
            }
            '>' => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    Token::RedirectAppend
                } else {
                    Token::RedirectOut
                }
            }
            '<' => {
                self.advance();
                Token::RedirectIn
            }
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            '{' => {
                self.advance();
                Token::LeftBrace
            }
            '}' => {
                self.advance();
                Token::RightBrace
            }
            '#' => self.read_comment(),
            _ => self.read_word()?,
        };
        Ok(Some(token))
    }

    /// Skip blanks and backslash-newline line continuations.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' => {
                    self.advance();
                }
                '\\' if self.peek_second() == Some('\n') => {
                    self.advance();
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn read_comment(&mut self) -> Token {
        self.advance(); // consume '#'
        let mut text = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }
        Token::Comment(text)
    }

    fn read_word(&mut self) -> Result<Token, LexError> {
        let mut word = String::new();

        while let Some(ch) = self.peek_char() {
            match ch {
                '\'' | '"' => self.read_quoted_into(ch, &mut word)?,
                // A line continuation ends the word like any other blank
                '\\' if self.peek_second() == Some('\n') => break,
                '\\' => {
                    word.push(ch);
                    self.advance();
                    if let Some(next) = self.advance() {
                        word.push(next);
                    }
                }
                _ if is_word_char(ch) => {
                    word.push(ch);
                    self.advance();
                }
                _ => break,
            }
        }

        Ok(Token::Word(word))
    }

    /// Append a quoted span, quotes included, to `word`.
    fn read_quoted_into(&mut self, quote: char, word: &mut String) -> Result<(), LexError> {
        let start = self.position;
        word.push(quote);
        self.advance(); // consume opening quote

        loop {
            match self.advance() {
                None => {
                    let kind = if quote == '\'' { "single" } else { "double" };
                    return Err(LexError::new(
                        start,
                        format!("unterminated {}-quoted string", kind),
                    ));
                }
                Some(c) if c == quote => {
                    word.push(c);
                    return Ok(());
                }
                // Inside double quotes a backslash protects the next char
                Some('\\') if quote == '"' => {
                    word.push('\\');
                    if let Some(next) = self.advance() {
                        word.push(next);
                    }
                }
                Some(c) => word.push(c),
            }
        }
    }
}

fn is_word_char(ch: char) -> bool {
    !matches!(
        ch,
        ' ' | '\t' | '\n' | ';' | '|' | '&' | '>' | '<' | '(' | ')'
    )
}
