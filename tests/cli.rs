use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_migration_flags() {
    cargo_bin_cmd!("keyferry")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--src_port"))
        .stdout(predicate::str::contains("--dst_port"))
        .stdout(predicate::str::contains("--pattern"))
        .stdout(predicate::str::contains("--flush"))
        .stdout(predicate::str::contains("--replace"));
}

#[test]
fn test_missing_hosts_is_a_usage_error() {
    cargo_bin_cmd!("keyferry")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SRC_HOST"));
}

#[test]
fn test_unresolvable_source_fails_with_context() {
    // RFC 2606 reserves .invalid, so resolution always fails and no network
    // is touched.
    cargo_bin_cmd!("keyferry")
        .args(["src.keyferry.invalid", "dst.keyferry.invalid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect to"));
}
