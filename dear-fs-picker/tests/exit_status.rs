use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use dear_fs_tree::PathKey;

fn run_picker(root: &Path, input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dear-fs-picker"))
        .arg(root)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn select_prints_only_the_path_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

    let out = run_picker(dir.path(), "pick a.txt\nselect\n");

    let expected = PathKey::from_path(dir.path()).unwrap().join("a.txt");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8(out.stdout).unwrap(), format!("{expected}\n"));
    // The frames went to stderr.
    assert!(String::from_utf8_lossy(&out.stderr).contains("a.txt"));
}

#[test]
fn eof_exits_one_with_empty_stdout() {
    let dir = tempfile::tempdir().unwrap();

    let out = run_picker(dir.path(), "");

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn cancel_and_select_without_pick_exit_one() {
    let dir = tempfile::tempdir().unwrap();

    let out = run_picker(dir.path(), "select\ncancel\n");

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nothing selected"));
}
