//! AST types for parsed shell scripts
//!
//! Nodes are plain values: every child is owned by exactly one parent and
//! trees are never mutated after construction. Rendering lives in
//! [`printer`](super::printer).

#[cfg(feature = "serde")]
use serde::Serialize;

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Node {
    /// An opaque word (e.g. `foo`, `'a b'`, `${x}`)
    Literal(Literal),

    /// A `#` comment
    Comment(Comment),

    /// A simple command (e.g. `echo hello > out`)
    Command(Command),

    /// A single redirection inside a command
    Redirect(Redirect),

    /// Commands in parentheses
    Subshell(Subshell),

    /// Brace group
    Block(Block),

    /// If statement
    If(IfStatement),

    /// One `elif` link of an if statement
    Elif(ElifClause),

    /// While loop
    While(WhileStatement),

    /// Two commands joined by `&&`, `||` or `|`
    Binary(BinaryExpr),

    /// Function definition
    FuncDecl(FuncDecl),

    /// A whole script
    Program(Program),
}

/// A complete script: the unit returned by parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Program {
    pub statements: Vec<Node>,
}

impl Program {
    pub fn new(statements: Vec<Node>) -> Self {
        Self { statements }
    }
}

/// A word, stored exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Literal {
    pub text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Comment text, without the leading `#` but with any space after it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A simple command: words and redirects in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Command {
    pub args: Vec<Node>,
}

impl Command {
    pub fn new(args: Vec<Node>) -> Self {
        Self { args }
    }

    /// Build a command made only of literal words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: words
                .into_iter()
                .map(|w| Node::Literal(Literal::new(w)))
                .collect(),
        }
    }
}

/// Redirection operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum RedirectOp {
    /// `>` - redirect output
    Output,
    /// `>>` - append output
    Append,
    /// `<` - redirect input
    Input,
}

impl RedirectOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RedirectOp::Output => ">",
            RedirectOp::Append => ">>",
            RedirectOp::Input => "<",
        }
    }
}

/// I/O redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Redirect {
    pub op: RedirectOp,
    /// Target word
    pub target: Box<Node>,
}

impl Redirect {
    pub fn new(op: RedirectOp, target: impl Into<Node>) -> Self {
        Self {
            op,
            target: Box::new(target.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Subshell {
    pub statements: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Block {
    pub statements: Vec<Node>,
}

/// If statement. `else_branch` is empty when there is no `else`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct IfStatement {
    pub condition: Box<Node>,
    pub then_branch: Vec<Node>,
    pub elif_clauses: Vec<ElifClause>,
    pub else_branch: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ElifClause {
    pub condition: Box<Node>,
    pub then_branch: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WhileStatement {
    pub condition: Box<Node>,
    pub do_branch: Vec<Node>,
}

/// Chain operators. All three bind equally tight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum BinaryOp {
    /// `&&` - run right if left succeeded
    And,
    /// `||` - run right if left failed
    Or,
    /// `|` - pipe left's output into right
    Pipe,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Pipe => "|",
        }
    }
}

/// One link of a chain. Chains lean right: `a && b || c` is
/// `And(a, Or(b, c))`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

impl BinaryExpr {
    pub fn new(op: BinaryOp, left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Self {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }
}

/// Function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FuncDecl {
    pub name: Literal,
    pub body: Block,
}

macro_rules! impl_into_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

impl_into_node! {
    Literal => Literal,
    Comment => Comment,
    Command => Command,
    Redirect => Redirect,
    Subshell => Subshell,
    Block => Block,
    IfStatement => If,
    ElifClause => Elif,
    WhileStatement => While,
    BinaryExpr => Binary,
    FuncDecl => FuncDecl,
    Program => Program,
}
