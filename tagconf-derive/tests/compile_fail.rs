//! Compile-fail tests to verify error messages
//!
//! Targets that are not structs with named fields, and tags that are not
//! literals, must be rejected with a clear message at the offending token.

#[test]
fn ui_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*.rs");
}
