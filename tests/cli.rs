//! Integration tests for top-level CLI behavior.

mod common;

use std::process::Command;

fn run_taxocheck(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_taxocheck");
    Command::new(bin)
        .args(args)
        .env_remove("TAXOCHECK_WORKING_PATH")
        .env_remove("TAXOCHECK_PLUGINS")
        .env_remove("TAXOCHECK_CONTENT")
        .env_remove("TAXOCHECK_PLAYBOOKS")
        .output()
        .expect("failed to run taxocheck binary")
}

#[test]
fn check_reports_drift_with_exit_code_one() {
    let repos = common::drifted_repos();
    let wp = repos.path().to_str().unwrap();
    let output = run_taxocheck(&["check", "--working-path", wp]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("ERR11: Plugin nova_conf in osp has no content dir at all"));
    assert!(stdout.contains("ERR26: "));
    assert!(stdout.contains("Total: 4 error(s)"));
    assert!(stdout.contains("Total: 5 error(s)"));
}

#[test]
fn check_is_clean_for_synced_repos() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::create_dir_all(root.join("plugins/kernel")).unwrap();
    std::fs::write(root.join("plugins/kernel/panic.py"), "ERROR_KEY = 'PANIC'\n").unwrap();
    std::fs::create_dir_all(root.join("content/kernel/panic/PANIC/osp_controller")).unwrap();
    std::fs::write(root.join("content/kernel/panic/PANIC/metadata.yaml"), "").unwrap();
    std::fs::create_dir_all(root.join("playbooks/kernel/panic/PANIC/osp_controller")).unwrap();

    let output = run_taxocheck(&[
        "check",
        "--plugins",
        root.join("plugins").to_str().unwrap(),
        "--content",
        root.join("content").to_str().unwrap(),
        "--playbooks",
        root.join("playbooks").to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert_eq!(stdout.matches("Total: 0 error(s)").count(), 2);
}

#[test]
fn check_json_output_is_parseable() {
    let repos = common::drifted_repos();
    let wp = repos.path().to_str().unwrap();
    let output = run_taxocheck(&["check", "--working-path", wp, "--format", "json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["content"]["diagnostics"].as_array().unwrap().len(), 4);
}

#[test]
fn code_prefix_filters_output() {
    let repos = common::drifted_repos();
    let wp = repos.path().to_str().unwrap();
    let output = run_taxocheck(&["check", "--working-path", wp, "--code-prefix", "ERR2"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("ERR1"));
    assert!(stdout.contains("ERR22: "));
}

#[test]
fn missing_root_exits_with_two() {
    let tmp = tempfile::tempdir().unwrap();
    let output = run_taxocheck(&["check", "--working-path", tmp.path().to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("cannot scan plugins tree"));
}

#[test]
fn strict_domains_rejects_unknown_domain() {
    let repos = common::drifted_repos();
    let wp = repos.path().to_str().unwrap();
    let output =
        run_taxocheck(&["check", "--working-path", wp, "--domain", "nonsense", "--strict-domains"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("invalid domain filter(s): nonsense"));
}

#[test]
fn show_prints_plugin_across_repos() {
    let repos = common::drifted_repos();
    let wp = repos.path().to_str().unwrap();
    let output = run_taxocheck(&["show", "bond_mode", "--working-path", wp]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("error keys: {BOND_A, BOND_B}"));
    assert!(stdout.contains("domain: bonding"));
}

#[test]
fn domain_lists_plugins() {
    let repos = common::drifted_repos();
    let wp = repos.path().to_str().unwrap();
    let output = run_taxocheck(&["domain", "kernel", "--repo", "playbooks", "--working-path", wp]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Plugins under kernel (2):\n  panic\n  retired"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_taxocheck(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
