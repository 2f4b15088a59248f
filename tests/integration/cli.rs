//! Integration tests for the `deps-flatten` binary.

use assert_cmd::Command;
use deps_flatten::test_utils::{CheckoutFixture, DepsFixture};
use predicates::prelude::*;
use std::fs;

const CHROMIUM_ABC123: &str = "https://chromium.googlesource.com/chromium/src@abc123";

fn deps_flatten() -> Command {
    let mut cmd = Command::cargo_bin("deps-flatten").unwrap();
    cmd.env_remove("DEPS_FLATTEN_CHECKOUT_ROOT").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_defaults_in_working_directory() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "Commit: [abc123]").unwrap();

    deps_flatten()
        .current_dir(checkout.root())
        .assert()
        .success()
        .stdout(format!("{CHROMIUM_ABC123}\npkgA@rev1\npkgB@rev2\n"));

    assert_eq!(
        checkout.read_output().unwrap(),
        format!("{CHROMIUM_ABC123}\npkgA@rev1\npkgB@rev2")
    );
}

#[test]
fn test_checkout_root_flag_and_env() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();

    deps_flatten().arg("--checkout-root").arg(checkout.root()).assert().success();
    let first = fs::read(checkout.output_path()).unwrap();

    fs::remove_file(checkout.output_path()).unwrap();
    deps_flatten()
        .env("DEPS_FLATTEN_CHECKOUT_ROOT", checkout.root())
        .assert()
        .success();
    let second = fs::read(checkout.output_path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_explicit_deps_and_output() {
    let checkout = CheckoutFixture::new("", "[abc123]").unwrap();
    let deps = checkout.root().join("engine.DEPS");
    fs::write(&deps, "deps = {'zlib': 'https://example.com/zlib.git@f00d'}").unwrap();
    let output = checkout.root().join("out.txt");

    deps_flatten()
        .current_dir(checkout.root())
        .args(["-d", "engine.DEPS", "-o", "out.txt"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        format!("{CHROMIUM_ABC123}\nhttps://example.com/zlib.git@f00d")
    );
    assert!(!checkout.output_path().exists());
}

#[test]
fn test_json_format() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();

    deps_flatten()
        .arg("--checkout-root")
        .arg(checkout.root())
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"revision\": \"rev1\""));

    let parsed: serde_json::Value = serde_json::from_str(&checkout.read_output().unwrap()).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(3));
    assert_eq!(parsed[0]["location"], "https://chromium.googlesource.com/chromium/src");
    assert_eq!(parsed[0]["revision"], "abc123");
}

#[test]
fn test_check_upstream_passes_on_consistent_deps() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::engine(), "[abc123]").unwrap();

    deps_flatten()
        .arg("--checkout-root")
        .arg(checkout.root())
        .arg("--check-upstream")
        .assert()
        .success();
}

#[test]
fn test_check_upstream_reports_mismatch() {
    let deps = "vars = {'upstream_gone': 'x'}\ndeps = {'z': 'https://example.com/zlib.git@1'}";
    let checkout = CheckoutFixture::new(deps, "[abc123]").unwrap();

    deps_flatten()
        .arg("--checkout-root")
        .arg(checkout.root())
        .arg("--check-upstream")
        .assert()
        .failure()
        .stderr(predicate::str::contains("upstream_zlib"))
        .stderr(predicate::str::contains("upstream_gone"));

    assert!(!checkout.output_path().exists());
}

#[test]
fn test_undefined_variable_exit_code() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::undefined_var(), "[abc123]").unwrap();

    deps_flatten()
        .arg("--checkout-root")
        .arg(checkout.root())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Var is not defined: does_not_exist"))
        .stderr(predicate::str::contains("Only host_cpu and host_os"))
        .stderr(predicate::str::contains("Failed to flatten"));

    assert!(!checkout.output_path().exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();

    deps_flatten()
        .arg("--checkout-root")
        .arg(checkout.root())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_quiet_keeps_stderr_empty() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();

    deps_flatten()
        .arg("--checkout-root")
        .arg(checkout.root())
        .arg("--quiet")
        .env("RUST_LOG", "trace")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_help() {
    deps_flatten()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--check-upstream"))
        .stdout(predicate::str::contains("--checkout-root"));
}
