//! JSON serialization of parsed trees
//!
//! Run with: cargo test --features serde

#![cfg(feature = "serde")]

use serde_json::json;

#[test]
fn simple_command_serializes() {
    let program = shparse::parse_str("echo hi > out", "json").unwrap();
    let value = serde_json::to_value(&program).unwrap();
    assert_eq!(
        value,
        json!({
            "statements": [
                { "Command": { "args": [
                    { "Literal": { "text": "echo" } },
                    { "Literal": { "text": "hi" } },
                    { "Redirect": {
                        "op": "Output",
                        "target": { "Literal": { "text": "out" } }
                    } }
                ] } }
            ]
        })
    );
}

#[test]
fn chain_serializes_right_nested() {
    let program = shparse::parse_str("a | b && c", "json").unwrap();
    let value = serde_json::to_value(&program).unwrap();
    let top = &value["statements"][0]["Binary"];
    assert_eq!(top["op"], "Pipe");
    assert_eq!(top["left"]["Command"]["args"][0]["Literal"]["text"], "a");
    assert_eq!(top["right"]["Binary"]["op"], "And");
}

#[test]
fn compound_statements_serialize() {
    let program = shparse::parse_str(
        "f() { if a; then b; elif c; then d; fi; }\n# done\n",
        "json",
    )
    .unwrap();
    let value = serde_json::to_value(&program).unwrap();

    let func = &value["statements"][0]["FuncDecl"];
    assert_eq!(func["name"]["text"], "f");
    let if_stmt = &func["body"]["statements"][0]["If"];
    assert_eq!(if_stmt["elif_clauses"].as_array().map(Vec::len), Some(1));
    assert_eq!(if_stmt["else_branch"], json!([]));
    assert_eq!(value["statements"][1]["Comment"]["text"], " done");
}
