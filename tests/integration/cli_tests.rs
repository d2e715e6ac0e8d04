use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

fn basedupe(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_basedupe"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("base").join("sub")).unwrap();
    fs::create_dir_all(dir.path().join("search")).unwrap();
    fs::write(dir.path().join("base").join("a.txt"), "hi").unwrap();
    fs::write(dir.path().join("base").join("sub").join("deep.txt"), "deep").unwrap();
    fs::write(dir.path().join("base").join("empty.txt"), "").unwrap();
    fs::write(dir.path().join("search").join("b.txt"), "hi").unwrap();
    fs::write(dir.path().join("search").join("c.txt"), "deep").unwrap();
    fs::write(dir.path().join("search").join("lonely.txt"), "nothing alike").unwrap();
    dir
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn test_wrong_argument_count_exits_1() {
    let dir = tempdir().unwrap();
    let out = basedupe(&["only", "two"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("/B[R/N] /S[R/N]"));
}

#[test]
fn test_help_exits_0() {
    let dir = tempdir().unwrap();
    let out = basedupe(&["--help"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("BASE_RECURSE"));
}

#[test]
fn test_missing_base_exits_2() {
    let dir = fixture();
    let out = basedupe(&["nope", "search", "/BR", "/SR"], dir.path());
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("[BD002]"));
}

#[test]
fn test_base_is_file_exits_2() {
    let dir = fixture();
    let out = basedupe(&["base/a.txt", "search", "/BR", "/SR"], dir.path());
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("exists, but is not a folder"));
}

#[test]
fn test_missing_search_exits_3() {
    let dir = fixture();
    let out = basedupe(&["base", "nope", "/BR", "/SR"], dir.path());
    assert_eq!(out.status.code(), Some(3));
    assert!(stdout(&out).contains("OK: Using main/base folder: base Recursive: true"));
}

#[test]
fn test_json_errors() {
    let dir = fixture();
    let out = basedupe(&["base", "nope", "/BR", "/SR", "--json-errors"], dir.path());
    assert_eq!(out.status.code(), Some(3));
    let err: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["code"], "BD003");
    assert_eq!(err["exit_code"], 3);
}

#[test]
#[cfg(unix)]
fn test_non_utf8_argument_exits_1() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = fixture();
    let out = Command::new(env!("CARGO_BIN_EXE_basedupe"))
        .args(["base", "search"])
        .arg(OsStr::from_bytes(b"/B\xff"))
        .args(["/SR", "--json-errors"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let err: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["code"], "BD001");
}

#[test]
fn test_same_folder_exits_0_without_report() {
    let dir = fixture();
    let report = dir.path().join("dups.log");
    let args = [
        "base",
        "./base/",
        "/BR",
        "/SR",
        "--report",
        report.to_str().unwrap(),
    ];
    let out = basedupe(&args, dir.path());

    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("Base/Search folder cannot be the same."));
    assert!(!report.exists());
}

#[test]
fn test_same_folder_with_json_keeps_stdout_empty() {
    let dir = fixture();
    let out = basedupe(&["base", "./base/", "/BR", "/SR", "--json"], dir.path());

    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Base/Search folder cannot be the same."));
}

#[test]
#[cfg(unix)]
fn test_symlink_loop_exits_4() {
    let dir = fixture();
    let base = dir.path().join("base");
    std::os::unix::fs::symlink(&base, base.join("sub").join("loop")).unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "follow_symlinks = true\n").unwrap();
    let report = dir.path().join("dups.log");

    let out = basedupe(
        &[
            "base",
            "search",
            "/BR",
            "/SR",
            "--config",
            config.to_str().unwrap(),
            "--report",
            report.to_str().unwrap(),
        ],
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&out.stderr).contains("[BD004]"));
    assert!(!report.exists());
}

#[test]
fn test_full_run_writes_log() {
    let dir = fixture();
    let report = dir.path().join("dups.log");
    let out = basedupe(
        &["base", "search", "/BR", "/SN", "--report", report.to_str().unwrap()],
        dir.path(),
    );

    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("Base Folder Processed"));
    assert!(text.contains("  -Base folder, Unique Files: 2"));
    assert!(text.contains("  -Empty files, Skipped: 1"));
    assert!(text.contains("Search Folder Processed"));
    assert!(text.contains("  -Duplicates: 2 [150.0%]"));
    assert!(text.contains("Finished. See"));

    let log = fs::read_to_string(&report).unwrap();
    let a = Path::new("base").join("a.txt");
    let b = Path::new("search").join("b.txt");
    assert!(log.starts_with(&format!("Base File:    \"{}\"\n", a.display())));
    assert!(log.contains(&format!("  - Duplicate:\"{}\"\n", b.display())));
    assert!(!log.contains("lonely"));
    assert_eq!(log.matches("Base File:").count(), 2);
}

#[test]
fn test_fixed_percentage() {
    let dir = fixture();
    let report = dir.path().join("dups.log");
    let out = basedupe(
        &[
            "base",
            "search",
            "/BR",
            "/SR",
            "--fixed-percentage",
            "--report",
            report.to_str().unwrap(),
        ],
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("  -Duplicates: 2 [66.7%]"));
}

#[test]
fn test_json_output() {
    let dir = fixture();
    let report = dir.path().join("dups.log");
    let out = basedupe(
        &["base", "search", "/BR", "/SR", "--json", "--report", report.to_str().unwrap()],
        dir.path(),
    );

    assert_eq!(out.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["groups"].as_array().unwrap().len(), 2);
    assert_eq!(value["base"]["counters"]["base_unique_count"], 2);
    assert_eq!(value["search"]["phase"], "search");
    assert!(report.exists());
}

#[test]
fn test_quiet_prints_nothing() {
    let dir = fixture();
    let report = dir.path().join("dups.log");
    let out = basedupe(
        &["-q", "base", "search", "/BR", "/SR", "--report", report.to_str().unwrap()],
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
    assert!(report.exists());
}

#[test]
fn test_invalid_config_exits_5() {
    let dir = fixture();
    let config = dir.path().join("config.toml");
    fs::write(&config, "progress_interval = 0\n").unwrap();
    let out = basedupe(
        &["base", "search", "/BR", "/SR", "--config", config.to_str().unwrap()],
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&out.stderr).contains("progress_interval"));
}
