use std::process::Command;
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_oxicmp").to_string()
}

#[test]
fn cli_equal_files_exit_zero() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    std::fs::write(&a, b"abcde12345abcde12345").unwrap();
    std::fs::write(&b, b"abcde12345abcde12345").unwrap();

    let out = Command::new(bin())
        .args(["--buffer-size", "3"])
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("is equal to file"), "{stdout}");
}

#[test]
fn cli_different_files_exit_one() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    std::fs::write(&a, b"abcde12345").unwrap();
    std::fs::write(&b, b"abcdeX2345").unwrap();

    let out = Command::new(bin()).arg("-v").arg(&a).arg(&b).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("is NOT equal to file"), "{stdout}");
    assert!(stdout.contains("first difference at byte 5"), "{stdout}");
}

#[test]
fn cli_missing_file_exit_two() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    std::fs::write(&a, b"x").unwrap();

    let out = Command::new(bin())
        .arg(&a)
        .arg(dir.path().join("nope.bin"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to open file"));
}

#[test]
fn cli_quiet_prints_nothing() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    std::fs::write(&a, b"short").unwrap();
    std::fs::write(&b, b"shorter").unwrap();

    let out = Command::new(bin()).arg("-q").arg(&a).arg(&b).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_json_report() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    std::fs::write(&a, b"short").unwrap();
    std::fs::write(&b, b"shorter").unwrap();

    let out = Command::new(bin())
        .arg("--json")
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["equal"], false);
    assert_eq!(v["mismatch"]["kind"], "length");
    assert_eq!(v["mismatch"]["shorter"], 1);
    assert_eq!(v["mismatch"]["len"], 5);
}

#[test]
fn cli_reads_stdin_for_dash() {
    use std::io::Write;
    use std::process::Stdio;

    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    std::fs::write(&a, b"piped payload").unwrap();

    let mut child = Command::new(bin())
        .arg(&a)
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"piped payload")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn cli_zero_buffer_size_rejected() {
    let out = Command::new(bin())
        .args(["-b", "0", "a", "b"])
        .output()
        .unwrap();
    assert!(!out.status.success());
}
