#![cfg(unix)]

//! File logging is refused, not fatal, when the log path sits under a symlink.

use assert_cmd::cargo;
use std::fs;
use std::os::unix::fs as unix_fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn symlinked_log_dir_is_refused_and_run_continues() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let real = base.join("real_logs");
    fs::create_dir_all(&real).unwrap();
    let link = base.join("linked_logs");
    unix_fs::symlink(&real, &link).unwrap();

    let cfg = base.join("config.xml");
    fs::write(&cfg, "").unwrap();
    let input = base.join("in.txt");
    let output = base.join("out.txt");
    fs::write(&input, "abc").unwrap();

    let me = cargo::cargo_bin!("blockchainincubator");
    let out = Command::new(me)
        .env("BLOCKCHAININCUBATOR_CONFIG", &cfg)
        .arg(format!("-input={}", input.display()))
        .arg(format!("-output={}", output.display()))
        .arg(format!("--log-file={}", link.join("run.log").display()))
        .output()
        .expect("spawn binary");

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Refusing to enable file logging"), "stderr: {stderr}");
    assert!(!real.join("run.log").exists());
    assert_eq!(fs::read_to_string(&output).unwrap(), "abc");
}
