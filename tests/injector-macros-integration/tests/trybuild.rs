//! trybuild compile-time tests for injector_macros

#[test]
fn trybuild_injector_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/wireable_ok.rs");
}

#[test]
fn ui_injector_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/wireable_enum_ok.rs");
}
