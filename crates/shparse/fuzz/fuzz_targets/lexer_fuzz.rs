//! Fuzz target for the shparse lexer
//!
//! Tokenizes arbitrary input looking for panics, infinite loops and spans
//! that run backwards.
//!
//! Run with: cargo +nightly fuzz run lexer_fuzz -- -max_total_time=300

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 1_000_000 {
        return;
    }

    if let Ok(tokens) = shparse::parser::Lexer::new(input).tokenize() {
        for pair in tokens.windows(2) {
            assert!(pair[0].span.end.offset <= pair[1].span.start.offset);
        }
    }
});
