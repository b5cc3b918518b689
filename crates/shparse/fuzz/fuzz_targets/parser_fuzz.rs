//! Fuzz target for the shparse parser
//!
//! Parses arbitrary input looking for panics, stack overflows from deep
//! nesting, and canonical output that fails to parse again.
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=300

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Stream parsing covers the UTF-8 check and the size limit
    let Ok(program) = shparse::parse(data, "fuzz") else {
        return;
    };

    let rendered = program.render();
    let reparsed = shparse::parse_str(&rendered, "fuzz-rendered")
        .unwrap_or_else(|e| panic!("canonical output failed to parse: {e}\n{rendered}"));
    assert_eq!(reparsed, program, "render is not a fixed point:\n{rendered}");
});
