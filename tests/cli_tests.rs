use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn filetally(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_filetally"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn collection() -> TempDir {
    let temp = tempfile::Builder::new()
        .prefix("collection")
        .tempdir()
        .unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("box1/folder2")).unwrap();
    fs::write(root.join("a.txt"), vec![b'a'; 10]).unwrap();
    fs::write(root.join("box1/b.TXT"), vec![b'b'; 20]).unwrap();
    fs::write(root.join("box1/folder2/c"), b"").unwrap();
    temp
}

#[test]
fn test_writes_default_report() {
    let input = collection();
    let work = TempDir::new().unwrap();

    let out = filetally(
        &["--input-dir", input.path().to_str().unwrap()],
        work.path(),
    );
    assert_eq!(out.status.code(), Some(0), "{out:?}");

    let text = fs::read_to_string(work.path().join("file-report.tsv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Extension\tSize\tCount\tSize In Bytes");
    assert!(lines[1].starts_with(".txt\t"));
    assert!(lines[1].ends_with("\t2\t30"));
    assert!(lines[2].starts_with("totals\t"));
    assert!(lines[2].ends_with("\t2\t30"));
}

#[test]
fn test_output_file_and_legacy_layout() {
    let input = collection();
    let work = TempDir::new().unwrap();
    let report = work.path().join("mss610.tsv");

    let out = filetally(
        &[
            "--dir",
            input.path().to_str().unwrap(),
            "--output-file",
            report.to_str().unwrap(),
            "--layout",
            "legacy",
        ],
        work.path(),
    );
    assert_eq!(out.status.code(), Some(0), "{out:?}");

    let text = fs::read_to_string(&report).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert_eq!(text.lines().next().unwrap().split('\t').count(), 2);
    assert!(!work.path().join("file-report.tsv").exists());
}

#[test]
fn test_missing_input_dir_exits_1_without_report() {
    let work = TempDir::new().unwrap();
    let missing = work.path().join("not-here");

    let out = filetally(
        &["--input-dir", missing.to_str().unwrap()],
        work.path(),
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(!work.path().join("file-report.tsv").exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not exist"));
}

#[test]
fn test_file_as_input_dir_exits_1() {
    let work = TempDir::new().unwrap();
    let file = work.path().join("manifest.txt");
    fs::write(&file, "x").unwrap();

    let out = filetally(&["--input-dir", file.to_str().unwrap()], work.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a directory"));
}

#[test]
fn test_missing_argument_exits_1() {
    let work = TempDir::new().unwrap();
    let out = filetally(&[], work.path());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_help_exits_0() {
    let work = TempDir::new().unwrap();
    let out = filetally(&["--help"], work.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--input-dir"));
}

#[test]
fn test_unwritable_output_exits_3() {
    let input = collection();
    let work = TempDir::new().unwrap();
    let report = work.path().join("no-such-dir").join("report.tsv");

    let out = filetally(
        &[
            "--input-dir",
            input.path().to_str().unwrap(),
            "--output-file",
            report.to_str().unwrap(),
        ],
        work.path(),
    );
    assert_eq!(out.status.code(), Some(3));
    assert!(!report.exists());
}

#[test]
fn test_exclude_pattern() {
    let input = collection();
    let work = TempDir::new().unwrap();

    let out = filetally(
        &[
            "--input-dir",
            input.path().to_str().unwrap(),
            "--exclude",
            "box1",
        ],
        work.path(),
    );
    assert_eq!(out.status.code(), Some(0), "{out:?}");

    let text = fs::read_to_string(work.path().join("file-report.tsv")).unwrap();
    assert!(text.lines().nth(1).unwrap().ends_with("\t1\t10"));
}

/// Lock `box1` for the duration of `f`. Returns `None` when permission bits
/// are not enforced for the current user.
#[cfg(unix)]
fn with_locked_box<T>(input: &Path, f: impl FnOnce() -> T) -> Option<T> {
    use std::os::unix::fs::PermissionsExt;

    let locked = input.join("box1");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return None;
    }
    let result = f();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    Some(result)
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdir_warns_and_writes_report() {
    let input = collection();
    let work = TempDir::new().unwrap();

    let Some(out) = with_locked_box(input.path(), || {
        filetally(&["--input-dir", input.path().to_str().unwrap()], work.path())
    }) else {
        return;
    };
    assert_eq!(out.status.code(), Some(0), "{out:?}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Warning:"), "{stderr}");
    assert!(stderr.contains("box1"), "{stderr}");

    let text = fs::read_to_string(work.path().join("file-report.tsv")).unwrap();
    assert!(text.lines().nth(1).unwrap().ends_with("\t1\t10"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdir_strict_exits_2_without_report() {
    let input = collection();
    let work = TempDir::new().unwrap();

    let Some(out) = with_locked_box(input.path(), || {
        filetally(
            &["--input-dir", input.path().to_str().unwrap(), "--strict"],
            work.path(),
        )
    }) else {
        return;
    };
    assert_eq!(out.status.code(), Some(2), "{out:?}");
    assert!(!work.path().join("file-report.tsv").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_input_dir_reports_target_contents() {
    let input = collection();
    let work = TempDir::new().unwrap();
    let link = work.path().join("mount");
    std::os::unix::fs::symlink(input.path(), &link).unwrap();

    let out = filetally(&["--input-dir", link.to_str().unwrap()], work.path());
    assert_eq!(out.status.code(), Some(0), "{out:?}");

    let text = fs::read_to_string(work.path().join("file-report.tsv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with(".txt\t"));
    assert!(lines[2].ends_with("\t2\t30"));
}
