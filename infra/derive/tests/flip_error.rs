#[test]
fn flip_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/flip_error_pass.rs");
}
