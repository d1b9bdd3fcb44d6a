use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn codesnap(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("codesnap").unwrap();
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_collects_matching_files_into_snapshot() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/a.ts"), b"x");
    write_file(&dir.path().join("src/b.py"), b"y");

    codesnap(dir.path())
        .args(["src", "--output", "out.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Code collected into"));

    let text = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(
        text,
        "========== FILE START ==========\n\
         File: a.ts\n\
         Size: 1 bytes\n\
         ========== CODE ==========\n\
         x\n\
         ========== FILE END ==========\n\n\n"
    );
}

#[test]
fn cli_uses_default_root_and_output() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("src/service/api/client.ts"), b"export {};\n");
    write_file(&dir.path().join("src/other/skip.ts"), b"nope");

    codesnap(dir.path()).assert().success();

    let text = fs::read_to_string(dir.path().join("all_code_with_metadata.txt")).unwrap();
    assert!(text.contains("File: api/client.ts\n"));
    assert!(!text.contains("skip.ts"));
}

#[test]
fn cli_skips_unreadable_file_with_warning() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("root/good.ts"), b"fine");
    write_file(&dir.path().join("root/bad.ts"), &[0xff, 0xfe, 0xfd]);

    codesnap(dir.path())
        .args(["root", "-o", "out.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not read").and(predicate::str::contains("bad.ts")));

    let text = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(text.contains("File: good.ts"));
    assert!(!text.contains("File: bad.ts"));
}

#[test]
fn cli_missing_root_writes_empty_snapshot() {
    let dir = TempDir::new().unwrap();

    codesnap(dir.path())
        .args(["does-not-exist", "-o", "out.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Code collected into"));

    let text = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(text.is_empty());
}

#[test]
fn cli_json_report_is_valid_json() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("root/sub/dir/c.jsx"), b"<App />\n");
    write_file(&dir.path().join("root/bad.ts"), &[0xc3, 0x28]);

    let output = codesnap(dir.path())
        .args(["root", "-o", "out.txt", "--output-format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["summary"]["records_written"], 1);
    assert_eq!(v["records"][0]["relative_path"], "sub/dir/c.jsx");
    assert_eq!(v["skipped"][0]["relative_path"], "bad.ts");
}

#[test]
fn cli_custom_extensions_and_excludes() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("proj/src/lib.rs"), b"pub fn a() {}\n");
    write_file(&dir.path().join("proj/target/gen.rs"), b"generated");
    write_file(&dir.path().join("proj/web/a.ts"), b"x");

    codesnap(dir.path())
        .args(["proj", "-o", "out.txt", "-e", ".rs", "-x", "target"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(text.contains("File: src/lib.rs"));
    assert!(!text.contains("gen.rs"));
    assert!(!text.contains("a.ts"));
}

#[test]
fn cli_reads_config_file() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("app/main.py"), b"print('hi')\n");
    write_file(&dir.path().join("app/a.ts"), b"x");
    write_file(
        &dir.path().join("snap.toml"),
        b"[filters]\nextensions = [\".py\"]\n\n[output]\nroot = \"app\"\npath = \"py.txt\"\n",
    );

    codesnap(dir.path())
        .args(["--config", "snap.toml"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("py.txt")).unwrap();
    assert!(text.contains("File: main.py"));
    assert!(!text.contains("a.ts"));
}

#[test]
fn cli_dry_run_lists_without_writing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("root/x/y.ts"), b"y");

    codesnap(dir.path())
        .args(["root", "-o", "out.txt", "--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x/y.ts"));

    assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn cli_fails_when_output_parent_is_missing() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("root/a.ts"), b"a");

    codesnap(dir.path())
        .args(["root", "-o", "missing/out.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parent directory does not exist"));
}

#[test]
fn cli_generates_sample_config() {
    let dir = TempDir::new().unwrap();

    codesnap(dir.path())
        .args(["--generate-config", "--config", "sample.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sample.toml"));

    let content = fs::read_to_string(dir.path().join("sample.toml")).unwrap();
    assert!(content.contains("[filters]"));
    assert!(content.contains("[output]"));
}

#[cfg(unix)]
#[test]
fn cli_warns_about_dangling_symlink() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("root/ok.ts"), b"x");
    std::os::unix::fs::symlink("gone.ts", dir.path().join("root/dangling.ts")).unwrap();

    codesnap(dir.path())
        .args(["root", "-o", "out.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not read").and(predicate::str::contains("dangling.ts")));

    let text = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(text.contains("File: ok.ts"));
    assert!(!text.contains("File: dangling.ts"));
}

#[test]
fn cli_file_root_writes_empty_snapshot() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("x.ts"), b"x");
    write_file(&dir.path().join("out.txt"), b"stale");

    codesnap(dir.path())
        .args(["x.ts", "-o", "out.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Code collected into"));

    let text = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(text.is_empty());
}

#[test]
fn cli_prints_one_completion_notice() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("root/a.ts"), b"a");

    for format in ["plain", "human"] {
        let output = codesnap(dir.path())
            .args(["root", "-o", "out.txt", "--output-format", format])
            .output()
            .unwrap();

        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let stderr = String::from_utf8(output.stderr).unwrap();
        let notices = stdout.matches("Code collected into").count()
            + stderr.matches("Code collected into").count();
        assert_eq!(notices, 1, "format {format}");
        assert!(stdout.contains("out.txt"));
        assert!(!stderr.contains('\x1b'));
    }
}
