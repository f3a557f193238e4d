use assert_cmd::cargo;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn xml_supplies_logging_and_cli_supplies_paths() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let input = base.join("in.txt");
    let output = base.join("out.txt");
    let log = base.join("run.log");
    fs::write(&input, "cli paths").unwrap();

    let cfg = base.join("config.xml");
    let xml = format!(
        r#"<config>
  <log_level>debug</log_level>
  <log_file>{}</log_file>
  <json>true</json>
</config>"#,
        log.display()
    );
    fs::write(&cfg, xml).unwrap();

    let me = cargo::cargo_bin!("blockchainincubator");
    let out = Command::new(me)
        .env("BLOCKCHAININCUBATOR_CONFIG", &cfg)
        .arg(format!("-input={}", input.display()))
        .arg(format!("-output={}", output.display()))
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(&output).unwrap(), "cli paths");
    let logged = fs::read_to_string(&log).unwrap();
    assert!(logged.contains("Transfer completed"), "log: {logged}");
    assert!(logged.lines().any(|l| l.trim_start().starts_with('{')), "log: {logged}");
}

#[test]
fn xml_paths_are_rejected() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let input = base.join("from_xml.in");
    fs::write(&input, "xml input").unwrap();

    let cfg = base.join("config.xml");
    fs::write(&cfg, format!("<config><input>{}</input></config>", input.display())).unwrap();

    let me = cargo::cargo_bin!("blockchainincubator");
    let out = Command::new(me)
        .env("BLOCKCHAININCUBATOR_CONFIG", &cfg)
        .arg(format!("-output={}", base.join("out.txt").display()))
        .output()
        .expect("spawn binary");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Invalid config"), "stderr: {stderr}");
    assert!(!base.join("out.txt").exists());
}

#[test]
fn malformed_xml_exits_one() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config><colour>red</colour></config>").unwrap();

    let me = cargo::cargo_bin!("blockchainincubator");
    let out = Command::new(me)
        .env("BLOCKCHAININCUBATOR_CONFIG", &cfg)
        .output()
        .expect("spawn binary");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Invalid config"), "stderr: {stderr}");
}
