//! Property-based tests for the parser
//!
//! Uses proptest to check chain shape, round-trip stability and that the
//! parser never panics.

use proptest::prelude::*;
use shparse::{BinaryOp, Node};

/// Strategies for generating shell-like input
mod strategies {
    use proptest::prelude::*;

    /// Generate arbitrary strings (may be invalid shell)
    pub fn arbitrary_string() -> impl Strategy<Value = String> {
        prop::string::string_regex(".{0,100}").unwrap()
    }

    /// Generate strings built from shell metacharacters
    pub fn shellish_string() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-z(){};|&<>'\"#\\\\ \n]{0,60}").unwrap()
    }

    /// Generate simple words that are not reserved
    pub fn word() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-z][a-z0-9_./-]{0,8}")
            .unwrap()
            .prop_filter("reserved word", |w| {
                !matches!(
                    w.as_str(),
                    "if" | "then" | "elif" | "else" | "fi" | "while" | "do" | "done"
                )
            })
    }

    /// Generate a simple command in canonical form
    pub fn command() -> impl Strategy<Value = String> {
        prop::collection::vec(word(), 1..4).prop_map(|words| words.join(" "))
    }

    pub fn chain_op() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("&&"), Just("||"), Just("|")]
    }

    /// Generate a chain of at least three commands
    pub fn chain() -> impl Strategy<Value = (Vec<String>, Vec<&'static str>)> {
        (3usize..8).prop_flat_map(|n| {
            (
                prop::collection::vec(command(), n),
                prop::collection::vec(chain_op(), n - 1),
            )
        })
    }

    /// Generate a canonical statement, possibly compound
    pub fn statement() -> impl Strategy<Value = String> {
        let leaf = command();
        leaf.prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                (inner.clone(), chain_op(), inner.clone())
                    .prop_map(|(a, op, b)| format!("{} {} {}", a, op, b)),
                inner.clone().prop_map(|s| format!("( {}; )", s)),
                inner.clone().prop_map(|s| format!("{{ {}; }}", s)),
                (inner.clone(), inner.clone())
                    .prop_map(|(c, t)| format!("if {}; then {}; fi", c, t)),
                (inner.clone(), inner.clone())
                    .prop_map(|(c, t)| format!("while {}; do {}; done", c, t)),
                (word(), inner).prop_map(|(n, b)| format!("{}() {{ {}; }}", n, b)),
            ]
        })
    }
}

fn parse_one(input: &str) -> Node {
    let program = shparse::parse_str(input, "prop").unwrap();
    assert_eq!(program.statements.len(), 1, "input: {:?}", input);
    program.statements.into_iter().next().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Parser should never panic on arbitrary input
    #[test]
    fn never_panics_on_arbitrary_input(input in strategies::arbitrary_string()) {
        let _ = shparse::parse_str(&input, "fuzz");
    }

    /// Parser should never panic on metacharacter soup
    #[test]
    fn never_panics_on_shellish_input(input in strategies::shellish_string()) {
        let _ = shparse::parse_str(&input, "fuzz");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every chain of three or more commands leans right, whatever the mix
    /// of operators
    #[test]
    fn chains_are_right_associative((commands, ops) in strategies::chain()) {
        let mut input = commands[0].clone();
        for (op, cmd) in ops.iter().zip(&commands[1..]) {
            input.push_str(&format!(" {} {}", op, cmd));
        }

        let mut node = parse_one(&input);
        for (i, op) in ops.iter().enumerate() {
            let Node::Binary(bin) = node else {
                panic!("expected binary node at link {} of {:?}", i, input);
            };
            prop_assert_eq!(bin.op.as_str(), *op);
            prop_assert!(matches!(*bin.left, Node::Command(_)));
            node = *bin.right;
        }
        prop_assert!(matches!(node, Node::Command(_)));
    }

    /// Canonical text renders back to itself
    #[test]
    fn canonical_text_round_trips(stmt in strategies::statement()) {
        let program = shparse::parse_str(&stmt, "prop").unwrap();
        prop_assert_eq!(program.render(), stmt);
    }

    /// Rendering is a fixed point: parse(render(t)) == t
    #[test]
    fn render_then_parse_is_identity(stmts in prop::collection::vec(strategies::statement(), 1..4)) {
        let program = shparse::parse_str(&stmts.join("\n"), "prop").unwrap();
        let reparsed = shparse::parse_str(&program.render(), "prop").unwrap();
        prop_assert_eq!(reparsed, program);
    }

    /// Extra separators never change the tree
    #[test]
    fn separators_are_idempotent(cmds in prop::collection::vec(strategies::command(), 1..5)) {
        let tight = cmds.join("; ");
        let loose = format!("\n;\n{}\n;;\n", cmds.join("\n\n;\n"));
        let a = shparse::parse_str(&tight, "prop").unwrap();
        let b = shparse::parse_str(&loose, "prop").unwrap();
        prop_assert_eq!(a.statements.len(), cmds.len());
        prop_assert_eq!(a, b);
    }
}

#[test]
fn mixed_chain_example() {
    let node = parse_one("a || b | c && d");
    let Node::Binary(top) = node else {
        panic!("expected binary node");
    };
    assert_eq!(top.op, BinaryOp::Or);
    assert_eq!(top.right.render(), "b | c && d");
}
