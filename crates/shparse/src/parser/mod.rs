//! Parser module for shparse
//!
//! Implements a recursive descent parser for a POSIX-like shell subset.
//!
//! Chains are flat: `&&`, `||` and `|` bind equally tight and always
//! associate to the right, so `a | b && c` parses as `a | (b && c)`.
//!
//! Closing words (`then`, `elif`, `else`, `fi`, `do`, `done`) are only
//! special where a statement list may end or a condition is followed by
//! its keyword; anywhere else they are plain words.

mod ast;
mod lexer;
mod printer;
mod span;
mod tokens;

pub use ast::*;
pub use lexer::{LexError, Lexer, SpannedToken};
pub use span::{Position, Span};
pub use tokens::Token;

use crate::error::{Error, Result};
use crate::limits::{DepthCounter, LimitExceeded, ParserLimits};

/// Words closing an if body.
const IF_BODY_END: &[&str] = &["elif", "else", "fi"];

/// Parser for shell scripts.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Stream name used in diagnostics
    name: String,
    input_len: usize,
    limits: ParserLimits,
    depth: DepthCounter,
    current: Option<SpannedToken>,
    peeked: Option<SpannedToken>,
}

/// What the token in command position starts.
enum UnitStart {
    Subshell,
    Block,
    If,
    While,
    Word,
    Other,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input. `name` only appears in
    /// error messages.
    pub fn new(input: &'a str, name: impl Into<String>) -> Self {
        Self::with_limits(input, name, ParserLimits::default())
    }

    /// Create a new parser with custom resource limits.
    pub fn with_limits(input: &'a str, name: impl Into<String>, limits: ParserLimits) -> Self {
        Self {
            lexer: Lexer::new(input),
            name: name.into(),
            input_len: input.len(),
            limits,
            depth: DepthCounter::default(),
            current: None,
            peeked: None,
        }
    }

    /// Parse the input and return the AST.
    pub fn parse(mut self) -> Result<Program> {
        let result = self.parse_program();

        #[cfg(feature = "logging")]
        match &result {
            Ok(program) => tracing::debug!(
                name = %self.name,
                statements = program.statements.len(),
                "parsed program"
            ),
            Err(err) => tracing::debug!(name = %self.name, error = %err, "parse failed"),
        }

        result
    }

    fn parse_program(&mut self) -> Result<Program> {
        if self.input_len > self.limits.max_input_bytes {
            return Err(self.limit_error(LimitExceeded::InputTooLarge(
                self.limits.max_input_bytes,
            )));
        }

        self.advance()?;
        let statements = self.parse_statement_list(&[])?;

        // The list only stops early on a closing `)` or `}`
        if let Some(tok) = &self.current {
            return Err(Error::syntax(
                &self.name,
                tok.span.start,
                format!("unexpected {}", tok.token),
            ));
        }

        Ok(Program { statements })
    }

    fn advance(&mut self) -> Result<()> {
        self.current = match self.peeked.take() {
            Some(tok) => Some(tok),
            None => self
                .lexer
                .next_spanned_token()
                .map_err(|e| self.lex_error(e))?,
        };
        Ok(())
    }

    /// Look at the token after the current one.
    fn peek(&mut self) -> Result<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self
                .lexer
                .next_spanned_token()
                .map_err(|e| self.lex_error(e))?;
        }
        Ok(self.peeked.as_ref().map(|t| &t.token))
    }

    fn current_token(&self) -> Option<&Token> {
        self.current.as_ref().map(|t| &t.token)
    }

    fn current_position(&self) -> Position {
        match &self.current {
            Some(tok) => tok.span.start,
            None => self.lexer.position(),
        }
    }

    fn at_word(&self, word: &str) -> bool {
        self.current_token().is_some_and(|t| t.is_word(word))
    }

    fn at_separator(&self) -> bool {
        self.current_token().is_some_and(Token::is_separator)
    }

    fn skip_separators(&mut self) -> Result<()> {
        while self.at_separator() {
            self.advance()?;
        }
        Ok(())
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while matches!(self.current_token(), Some(Token::Newline)) {
            self.advance()?;
        }
        Ok(())
    }

    /// A statement list ends at end of input, at `)` or `}`, or at one of
    /// the reserved words in `ends`.
    fn at_list_end(&self, ends: &[&str]) -> bool {
        match self.current_token() {
            None | Some(Token::RightParen) | Some(Token::RightBrace) => true,
            Some(Token::Word(w)) => ends.contains(&w.as_str()),
            Some(_) => false,
        }
    }

    /// Parse statements until the list ends. Separators around and between
    /// statements are discarded.
    fn parse_statement_list(&mut self, ends: &[&str]) -> Result<Vec<Node>> {
        let mut statements: Vec<Node> = Vec::new();

        loop {
            self.skip_separators()?;
            if self.at_list_end(ends) {
                break;
            }

            if let Some(Token::Comment(text)) = self.current_token() {
                statements.push(Comment::new(text.clone()).into());
                self.advance()?;
                continue;
            }

            statements.push(self.parse_chain()?);

            let terminated = self.at_separator()
                || matches!(self.current_token(), Some(Token::Comment(_)))
                || self.at_list_end(ends);
            if !terminated {
                return Err(self.unexpected("`;` or newline"));
            }
        }

        Ok(statements)
    }

    /// A statement list that must hold at least one statement.
    fn parse_body(&mut self, ends: &[&str]) -> Result<Vec<Node>> {
        let statements = self.parse_statement_list(ends)?;
        if statements.is_empty() {
            return Err(self.unexpected("command"));
        }
        Ok(statements)
    }

    /// Parse a chain of units joined by `&&`, `||` or `|`.
    ///
    /// Each link nests the rest of the chain one level deeper in the tree,
    /// so links count toward the depth limit like compound commands do.
    fn parse_chain(&mut self) -> Result<Node> {
        let first = self.parse_unit()?;

        let mut links = Vec::new();
        while let Some(op) = self.current_binary_op() {
            self.enter()?;
            self.advance()?;
            self.skip_newlines()?;
            links.push((op, self.parse_unit()?));
        }
        for _ in 0..links.len() {
            self.depth.pop();
        }

        // Fold from the right so each right child holds the rest of the chain
        let mut links = links.into_iter().rev();
        let Some((mut op, mut rest)) = links.next() else {
            return Ok(first);
        };
        for (prev_op, operand) in links {
            rest = BinaryExpr::new(op, operand, rest).into();
            op = prev_op;
        }
        Ok(BinaryExpr::new(op, first, rest).into())
    }

    fn current_binary_op(&self) -> Option<BinaryOp> {
        match self.current_token()? {
            Token::And => Some(BinaryOp::And),
            Token::Or => Some(BinaryOp::Or),
            Token::Pipe => Some(BinaryOp::Pipe),
            _ => None,
        }
    }

    /// Parse one simple or compound command.
    fn parse_unit(&mut self) -> Result<Node> {
        let start = match self.current_token() {
            None => return Err(self.unexpected("command")),
            Some(Token::LeftParen) => UnitStart::Subshell,
            Some(Token::LeftBrace) => UnitStart::Block,
            Some(Token::Word(w)) => match w.as_str() {
                "if" => UnitStart::If,
                "while" => UnitStart::While,
                _ => UnitStart::Word,
            },
            Some(_) => UnitStart::Other,
        };

        match start {
            UnitStart::Subshell => Ok(self.parse_subshell()?.into()),
            UnitStart::Block => Ok(self.parse_block()?.into()),
            UnitStart::If => self.parse_if(),
            UnitStart::While => self.parse_while(),
            UnitStart::Word => {
                if matches!(self.peek()?, Some(Token::LeftParen)) {
                    self.parse_function()
                } else {
                    self.parse_command()
                }
            }
            UnitStart::Other => self.parse_command(),
        }
    }

    /// Parse a simple command: words and redirections in any order.
    fn parse_command(&mut self) -> Result<Node> {
        let mut args: Vec<Node> = Vec::new();

        loop {
            let op = match self.current_token() {
                Some(Token::Word(w)) => {
                    let word = Literal::new(w.clone());
                    self.advance()?;
                    args.push(word.into());
                    continue;
                }
                Some(Token::RedirectOut) => RedirectOp::Output,
                Some(Token::RedirectAppend) => RedirectOp::Append,
                Some(Token::RedirectIn) => RedirectOp::Input,
                _ => break,
            };
            self.advance()?;
            let target = self.expect_word(&format!("redirect target after `{}`", op.as_str()))?;
            args.push(Redirect::new(op, target).into());
        }

        if args.is_empty() {
            return Err(self.unexpected("command"));
        }
        Ok(Command::new(args).into())
    }

    fn expect_word(&mut self, what: &str) -> Result<Literal> {
        match self.current_token() {
            Some(Token::Word(w)) => {
                let word = Literal::new(w.clone());
                self.advance()?;
                Ok(word)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// Consume `expected` or fail with "expected <what>".
    fn expect(&mut self, expected: &Token, what: impl FnOnce() -> String) -> Result<()> {
        if self.current_token() == Some(expected) {
            self.advance()
        } else {
            Err(self.unexpected(&what()))
        }
    }

    /// Consume the closing token of a construct opened at `opened`.
    fn expect_close(&mut self, closer: Token, construct: &str, opened: Position) -> Result<()> {
        self.expect(&closer, || {
            format!("{} to close `{}` opened at {}", closer, construct, opened)
        })?;
        self.depth.pop();
        Ok(())
    }

    /// Enter a compound command: check depth, then step past its opening
    /// token. Returns where it was opened.
    fn open(&mut self) -> Result<Position> {
        let position = self.current_position();
        self.enter()?;
        self.advance()?;
        Ok(position)
    }

    /// Go one level deeper in the tree or fail with `MaxDepth`.
    fn enter(&mut self) -> Result<()> {
        self.depth
            .push(&self.limits)
            .map_err(|source| self.limit_error(source))
    }

    fn parse_subshell(&mut self) -> Result<Subshell> {
        let opened = self.open()?;
        let statements = self.parse_body(&[])?;
        self.expect_close(Token::RightParen, "(", opened)?;
        Ok(Subshell { statements })
    }

    fn parse_block(&mut self) -> Result<Block> {
        let opened = self.open()?;
        let statements = self.parse_body(&[])?;
        self.expect_close(Token::RightBrace, "{", opened)?;
        Ok(Block { statements })
    }

    /// Parse a condition and the separators that must follow it.
    fn parse_condition(&mut self, keyword: &str) -> Result<Box<Node>> {
        let condition = self.parse_chain()?;
        if !self.at_separator() {
            return Err(self.unexpected(&format!("`;` or newline after `{}` condition", keyword)));
        }
        self.skip_separators()?;
        Ok(Box::new(condition))
    }

    fn parse_if(&mut self) -> Result<Node> {
        let opened = self.open()?;

        let then = Token::Word("then".to_string());
        let condition = self.parse_condition("if")?;
        self.expect(&then, || "`then` after `if` condition".to_string())?;
        let then_branch = self.parse_body(IF_BODY_END)?;

        let mut elif_clauses = Vec::new();
        while self.at_word("elif") {
            self.advance()?;
            let condition = self.parse_condition("elif")?;
            self.expect(&then, || "`then` after `elif` condition".to_string())?;
            let then_branch = self.parse_body(IF_BODY_END)?;
            elif_clauses.push(ElifClause {
                condition,
                then_branch,
            });
        }

        let mut else_branch = Vec::new();
        if self.at_word("else") {
            self.advance()?;
            else_branch = self.parse_body(&["fi"])?;
        }

        self.expect_close(Token::Word("fi".to_string()), "if", opened)?;

        Ok(IfStatement {
            condition,
            then_branch,
            elif_clauses,
            else_branch,
        }
        .into())
    }

    fn parse_while(&mut self) -> Result<Node> {
        let opened = self.open()?;

        let condition = self.parse_condition("while")?;
        self.expect(&Token::Word("do".to_string()), || {
            "`do` after `while` condition".to_string()
        })?;
        let do_branch = self.parse_body(&["done"])?;

        self.expect_close(Token::Word("done".to_string()), "while", opened)?;

        Ok(WhileStatement {
            condition,
            do_branch,
        }
        .into())
    }

    /// Parse `name() { ... }`. The current token is the name and the next
    /// one is `(`.
    fn parse_function(&mut self) -> Result<Node> {
        let name = self.expect_word("function name")?;
        self.expect(&Token::LeftParen, || "`(`".to_string())?;
        self.expect(&Token::RightParen, || {
            format!("`)` after `(` in definition of `{}`", name.text)
        })?;
        self.skip_newlines()?;

        if self.current_token() != Some(&Token::LeftBrace) {
            return Err(self.unexpected(&format!("`{{` to begin body of `{}`", name.text)));
        }
        let body = self.parse_block()?;

        Ok(FuncDecl { name, body }.into())
    }

    /// Syntax error at the current token.
    fn unexpected(&self, expected: &str) -> Error {
        let found = match self.current_token() {
            Some(tok) => tok.to_string(),
            None => "end of input".to_string(),
        };
        Error::syntax(
            &self.name,
            self.current_position(),
            format!("expected {}, found {}", expected, found),
        )
    }

    fn lex_error(&self, err: LexError) -> Error {
        Error::Lex {
            name: self.name.clone(),
            position: err.position,
            message: err.message,
        }
    }

    fn limit_error(&self, source: LimitExceeded) -> Error {
        Error::ResourceLimit {
            name: self.name.clone(),
            source,
        }
    }
}
