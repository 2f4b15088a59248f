//! Failing runs: the previous manifest survives and the error says why.

use deps_flatten::core::{FlattenError, user_friendly_error};
use deps_flatten::flatten::{FlattenConfig, run_with_echo};
use deps_flatten::test_utils::{CheckoutFixture, DepsFixture, readme_content};
use std::fs;

const PREVIOUS: &str = "previous@0";

/// Runs the pipeline over a checkout that already has a manifest.
fn run_over_previous(checkout: &CheckoutFixture) -> FlattenError {
    fs::write(checkout.output_path(), PREVIOUS).unwrap();
    let mut echo = Vec::new();
    let err = run_with_echo(&FlattenConfig::new(checkout.root()), &mut echo).unwrap_err();
    assert!(echo.is_empty(), "nothing may be echoed on failure");
    assert_eq!(checkout.read_output().unwrap(), PREVIOUS);
    err
}

#[test]
fn test_undefined_variable() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::undefined_var(), "[abc123]").unwrap();

    let err = run_over_previous(&checkout);

    assert!(matches!(&err, FlattenError::UnresolvedVariable { name } if name == "does_not_exist"));
    let ctx = user_friendly_error(err.into());
    assert!(ctx.suggestion.unwrap().contains("does_not_exist"));
}

#[test]
fn test_code_in_deps_is_rejected() {
    let checkout =
        CheckoutFixture::from_fixture(&DepsFixture::invalid_syntax(), "[abc123]").unwrap();

    let err = run_over_previous(&checkout);

    match err {
        FlattenError::ConfigParseError {
            line,
            column,
            ..
        } => {
            assert_eq!(line, 1);
            assert_eq!(column, 8);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_unknown_call_is_rejected() {
    let checkout = CheckoutFixture::new("deps = {'a': Str('x')}", "[abc123]").unwrap();

    let err = run_over_previous(&checkout);

    assert!(matches!(err, FlattenError::ConfigParseError { .. }));
}

#[test]
fn test_missing_deps_file() {
    let checkout = CheckoutFixture::new("", "[abc123]").unwrap();
    fs::remove_file(checkout.deps_path()).unwrap();

    let err = run_over_previous(&checkout);

    assert!(matches!(err, FlattenError::FileNotFound { .. }));
}

#[test]
fn test_missing_readme() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();
    fs::remove_file(checkout.readme_path()).unwrap();

    let err = run_over_previous(&checkout);

    assert!(matches!(err, FlattenError::FileNotFound { .. }));
}

#[test]
fn test_short_readme() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();
    checkout.write_readme("# Accessibility\n\nshort").unwrap();

    let err = run_over_previous(&checkout);

    assert!(matches!(
        err,
        FlattenError::LineIndexOutOfRange {
            index: 4,
            line_count: 3,
            ..
        }
    ));
}

#[test]
fn test_readme_without_brackets() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();
    checkout.write_readme(&readme_content("Commit: abc123")).unwrap();

    let err = run_over_previous(&checkout);

    assert!(matches!(err, FlattenError::PatternNotFound { index: 4, .. }));
}

#[test]
fn test_unpinned_dependency() {
    let checkout = CheckoutFixture::new("deps = {'a': 'https://example.com/a.git'}", "[abc123]").unwrap();

    let err = run_over_previous(&checkout);

    assert!(matches!(err, FlattenError::InvalidReference { reference } if reference == "https://example.com/a.git"));
}

#[test]
fn test_unwritable_output() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();
    let output = checkout.root().join("missing-dir").join("deps_flatten.txt");
    let config = FlattenConfig::new(checkout.root()).with_output_path(&output);

    let err = run_with_echo(&config, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, FlattenError::IoWriteError { .. }));
    assert!(!output.exists());
}
