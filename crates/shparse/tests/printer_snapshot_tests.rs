//! Canonical rendering of messy input
//!
//! Whatever the spacing, separators or line breaks of the source, the
//! printer emits one spelling.

use insta::assert_snapshot;

fn canon(input: &str) -> String {
    shparse::parse_str(input, "snapshot").unwrap().render()
}

#[test]
fn normalizes_whitespace_and_separators() {
    assert_snapshot!(canon("  foo   a\tb ;;\n\n bar  "), @"foo a b; bar");
}

#[test]
fn normalizes_redirects() {
    assert_snapshot!(canon("cat <in >>log  >out"), @"cat < in >> log > out");
}

#[test]
fn normalizes_multiline_if() {
    let input = "if test -f x\nthen\n  echo yes\nelif test -d x\nthen\n  echo dir\nelse\n  echo no\nfi\n";
    assert_snapshot!(canon(input), @"if test -f x; then echo yes; elif test -d x; then echo dir; else echo no; fi");
}

#[test]
fn normalizes_function_and_loop() {
    let input = "greet ( )\n{\n  while read line\n  do echo \"$line\" |  tr a b\n  done\n}\n";
    assert_snapshot!(canon(input), @r#"greet() { while read line; do echo "$line" | tr a b; done; }"#);
}

#[test]
fn chain_spanning_lines() {
    assert_snapshot!(canon("make &&\n  make test ||\n  echo failed"), @"make && make test || echo failed");
}

#[test]
fn comments_stay_in_place() {
    let input = "# setup\nmkdir out # create\n{\n  # inner\n  touch out/a\n}\n";
    let rendered = canon(input);
    assert_eq!(
        rendered,
        "# setup\nmkdir out; # create\n{ # inner\n touch out/a; }"
    );
    // The canonical text is a fixed point
    assert_eq!(canon(&rendered), rendered);
}

#[test]
fn quoted_words_are_untouched() {
    assert_snapshot!(canon("echo  'a  b'   \"c ; d\" e\\ f"), @r#"echo 'a  b' "c ; d" e\ f"#);
}
