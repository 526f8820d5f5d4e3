use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn unbundlef() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_unbundlef")))
}

fn bundlef() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_bundlef")))
}

fn write_bundle(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("bundle.txt");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_argument_prints_usage() {
    unbundlef()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    unbundlef()
        .arg(dir.path().join("nope.txt"))
        .args(["-o", dir.path().join("out").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn bare_bundle_is_unpacked() {
    let dir = TempDir::new().unwrap();
    let bundle = write_bundle(
        &dir,
        "Project dump\nfarm/a/b.txt\nx\ny\nfarm/install.sh\n#!/bin/sh\necho ok\n",
    );
    let out = dir.path().join("out");

    unbundlef()
        .arg(&bundle)
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out.join("a/b.txt")).unwrap(), "x\ny");
    assert_eq!(
        fs::read_to_string(out.join("install.sh")).unwrap(),
        "#!/bin/sh\necho ok"
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(out.join("install.sh")).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn delimited_bundle_strips_fences() {
    let dir = TempDir::new().unwrap();
    let bundle = write_bundle(
        &dir,
        "--- FILE START: farm/a/b.py ---\n```python\ncode()\n```\n\
         --- FILE START: farm/my docs/README.md ---\n```sh\nrun\n```\n",
    );
    let out = dir.path().join("out");

    unbundlef()
        .arg(&bundle)
        .args(["-o", out.to_str().unwrap(), "-g", "delimited"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out.join("a/b.py")).unwrap(), "code()");
    assert_eq!(
        fs::read_to_string(out.join("my_docs/README.md")).unwrap(),
        "```sh\nrun\n```"
    );
}

#[test]
fn missing_script_is_only_a_warning() {
    let dir = TempDir::new().unwrap();
    let bundle = write_bundle(&dir, "proj/readme.txt\nhello\n");
    let out = dir.path().join("out");

    unbundlef()
        .arg(&bundle)
        .args(["-o", out.to_str().unwrap(), "-r", "proj"])
        .assert()
        .success()
        .stderr(predicate::str::contains("install.sh"));

    assert_eq!(fs::read_to_string(out.join("readme.txt")).unwrap(), "hello");
}

#[test]
fn unsafe_paths_are_skipped() {
    let dir = TempDir::new().unwrap();
    let bundle = write_bundle(&dir, "farm/../escape.txt\nbad\nfarm/good.txt\ngood\n");
    let out = dir.path().join("out");

    unbundlef()
        .arg(&bundle)
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(!dir.path().join("escape.txt").exists());
    assert_eq!(fs::read_to_string(out.join("good.txt")).unwrap(), "good");
}

#[test]
fn pack_then_unpack() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("lib")).unwrap();
    fs::write(src.join("lib/mod.rs"), "pub fn f() {}\n").unwrap();
    fs::write(src.join("notes.txt"), "a\n\nb").unwrap();
    let bundle = dir.path().join("bundle.txt");
    let out = dir.path().join("out");

    bundlef()
        .arg(&src)
        .args(["-o", bundle.to_str().unwrap(), "-g", "delimited"])
        .assert()
        .success();
    unbundlef()
        .arg(&bundle)
        .args(["-o", out.to_str().unwrap(), "-g", "delimited"])
        .assert()
        .success();

    for name in ["lib/mod.rs", "notes.txt"] {
        assert_eq!(
            fs::read_to_string(out.join(name)).unwrap(),
            fs::read_to_string(src.join(name)).unwrap()
        );
    }
}

#[test]
fn pack_writes_to_stdout() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();

    bundlef()
        .arg(dir.path())
        .assert()
        .success()
        .stdout("farm/a.txt\na\n");
}
