//! Canonical printer
//!
//! Every node renders to exactly one spelling: bodies on a single line with
//! each statement terminated by `;`, one space around chain operators and
//! between words. Comments end with a newline instead of `;` so the output
//! parses back to the same tree.

use std::fmt::{self, Display, Formatter, Write};

use super::ast::*;

impl Node {
    /// Render the node in canonical form.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Program {
    /// Render the whole program in canonical form.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(n) => Display::fmt(n, f),
            Node::Comment(n) => Display::fmt(n, f),
            Node::Command(n) => Display::fmt(n, f),
            Node::Redirect(n) => Display::fmt(n, f),
            Node::Subshell(n) => Display::fmt(n, f),
            Node::Block(n) => Display::fmt(n, f),
            Node::If(n) => Display::fmt(n, f),
            Node::Elif(n) => Display::fmt(n, f),
            Node::While(n) => Display::fmt(n, f),
            Node::Binary(n) => Display::fmt(n, f),
            Node::FuncDecl(n) => Display::fmt(n, f),
            Node::Program(n) => Display::fmt(n, f),
        }
    }
}

/// Write each statement of a body preceded by a space and terminated by
/// `;`, or by a newline for comments.
fn write_body(f: &mut Formatter<'_>, statements: &[Node]) -> fmt::Result {
    for stmt in statements {
        write!(f, " {}", stmt)?;
        if matches!(stmt, Node::Comment(_)) {
            f.write_char('\n')?;
        } else {
            f.write_char(';')?;
        }
    }
    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut after_comment = false;
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str(if after_comment { "\n" } else { "; " })?;
            }
            Display::fmt(stmt, f)?;
            after_comment = matches!(stmt, Node::Comment(_));
        }
        Ok(())
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.text)
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            Display::fmt(arg, f)?;
        }
        Ok(())
    }
}

impl Display for Redirect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.as_str(), self.target)
    }
}

impl Display for Subshell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        write_body(f, &self.statements)?;
        f.write_str(" )")
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        write_body(f, &self.statements)?;
        f.write_str(" }")
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "if {}; then", self.condition)?;
        write_body(f, &self.then_branch)?;
        for elif in &self.elif_clauses {
            write!(f, " {}", elif)?;
        }
        if !self.else_branch.is_empty() {
            f.write_str(" else")?;
            write_body(f, &self.else_branch)?;
        }
        f.write_str(" fi")
    }
}

impl Display for ElifClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "elif {}; then", self.condition)?;
        write_body(f, &self.then_branch)
    }
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "while {}; do", self.condition)?;
        write_body(f, &self.do_branch)?;
        f.write_str(" done")
    }
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.as_str(), self.right)
    }
}

impl Display for FuncDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}() {}", self.name, self.body)
    }
}
