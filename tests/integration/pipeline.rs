//! Library-level runs of the flattening pipeline.

use deps_flatten::deps::{PlatformDefaults, parse_deps_file};
use deps_flatten::flatten::{FlattenConfig, build_manifest, run_with_echo};
use deps_flatten::manifest::ManifestFormat;
use deps_flatten::test_utils::{CheckoutFixture, DepsFixture, init_test_logging};
use std::fs;

#[test]
fn test_engine_deps() {
    init_test_logging(None);
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::engine(), "Commit: [c0ffee]").unwrap();

    let manifest = build_manifest(&FlattenConfig::new(checkout.root())).unwrap();

    assert_eq!(
        manifest.entries(),
        [
            "https://chromium.googlesource.com/chromium/src@c0ffee",
            "https://chromium.googlesource.com/vulkan-deps@aaaa1111",
            "https://flutter.googlesource.com/mirrors/zlib.git@f00dfeed",
            "https://flutter.googlesource.com/skia.git@0123abcd",
        ]
    );
}

#[test]
fn test_engine_deps_keeps_non_dependency_scope() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::engine(), "[c0ffee]").unwrap();

    let deps_file = parse_deps_file(&checkout.deps_path(), &PlatformDefaults::default()).unwrap();

    assert_eq!(deps_file.deps.len(), 4);
    assert!(deps_file.scope.contains_key("hooks"));
    assert!(deps_file.deps_os.is_empty());
}

#[test]
fn test_platform_override_changes_only_structured_entries() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::engine(), "[c0ffee]").unwrap();
    let mac = PlatformDefaults::empty().with("host_os", "mac").with("host_cpu", "arm64");

    let linux = build_manifest(&FlattenConfig::new(checkout.root())).unwrap();
    let other = build_manifest(&FlattenConfig::new(checkout.root()).with_platform(mac)).unwrap();

    assert_eq!(linux, other);
}

#[test]
fn test_vars_override_platform_default() {
    let deps = "vars = {'host_os': 'win'}\ndeps = {'tool': 'https://example.com/' + Var('host_os') + '.git@1'}";
    let checkout = CheckoutFixture::new(deps, "[abc123]").unwrap();

    let manifest = build_manifest(&FlattenConfig::new(checkout.root())).unwrap();

    assert!(manifest.entries().contains(&"https://example.com/win.git@1".to_string()));
}

#[test]
fn test_rerun_is_byte_identical() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::engine(), "[c0ffee]").unwrap();
    let config = FlattenConfig::new(checkout.root());

    run_with_echo(&config, &mut Vec::new()).unwrap();
    let first = fs::read(checkout.output_path()).unwrap();
    run_with_echo(&config, &mut Vec::new()).unwrap();

    assert_eq!(fs::read(checkout.output_path()).unwrap(), first);
}

#[test]
fn test_readme_duplicate_of_deps_entry_is_kept() {
    let deps = "deps = {'chromium': 'https://chromium.googlesource.com/chromium/src@abc123'}";
    let checkout = CheckoutFixture::new(deps, "[abc123]").unwrap();

    let manifest = build_manifest(&FlattenConfig::new(checkout.root())).unwrap();

    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest.entries()[0], manifest.entries()[1]);
}

#[test]
fn test_json_output_file() {
    let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "[abc123]").unwrap();
    let config = FlattenConfig::new(checkout.root()).with_format(ManifestFormat::Json);

    let mut echo = Vec::new();
    run_with_echo(&config, &mut echo).unwrap();

    let written = checkout.read_output().unwrap();
    assert_eq!(String::from_utf8(echo).unwrap(), format!("{written}\n"));
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed[1]["location"], "pkgA");
    assert_eq!(parsed[2]["revision"], "rev2");
}
