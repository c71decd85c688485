//! End-to-end runs through the public API with a scripted console.

use dupsweep::console::ScriptedConsole;
use dupsweep::resolve::Mode;
use dupsweep::{run, RunOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

fn options(root: &Path, mode: Mode) -> RunOptions {
    RunOptions {
        root: root.to_path_buf(),
        mode,
        mutable_dirs: Vec::new(),
        tiny_threshold: 0,
        dry_run: false,
    }
}

#[test]
fn test_pick_first_keeps_first_directory_copy() {
    let dir = tempdir().unwrap();
    write(dir.path(), "dir1/dupFile.gif", b"123456");
    write(dir.path(), "dir2/dupFile.gif", b"123456");
    write(dir.path(), "dir2/original.gif", b"unique");

    let mut console = ScriptedConsole::default();
    let summary = run(&options(dir.path(), Mode::PickFirst), &mut console).unwrap();

    assert!(dir.path().join("dir1/dupFile.gif").exists());
    assert!(!dir.path().join("dir2/dupFile.gif").exists());
    assert!(dir.path().join("dir2/original.gif").exists());
    assert_eq!(summary.bytes, 6);
    assert_eq!(summary.files, 1);
    assert!(console
        .output()
        .ends_with("Total amount of bytes cleaned: 6 B"));
}

#[test]
fn test_debug_run_touches_nothing_and_matches_real_accounting() {
    let real = tempdir().unwrap();
    let dry = tempdir().unwrap();
    for root in [real.path(), dry.path()] {
        write(root, "keep/f.bin", b"0123456789");
        write(root, "toss/f.bin", b"abcdefghij");
    }

    let mut real_console = ScriptedConsole::default();
    let real_summary = run(&options(real.path(), Mode::PickFirst), &mut real_console).unwrap();

    let mut dry_options = options(dry.path(), Mode::PickFirst);
    dry_options.dry_run = true;
    let mut dry_console = ScriptedConsole::default();
    let dry_summary = run(&dry_options, &mut dry_console).unwrap();

    // Same accounting either way, including the emptied directory.
    assert_eq!(real_summary, dry_summary);
    assert_eq!(real_summary.files, 1);
    assert_eq!(real_summary.dirs, 1);

    assert!(!real.path().join("toss/f.bin").exists());
    assert!(!real.path().join("toss").exists());
    assert!(dry.path().join("toss/f.bin").exists());
    assert!(dry.path().join("toss").exists());

    let dry_output = dry_console.output();
    assert!(dry_output.contains(&format!(
        "\t\tFile would have been deleted: {} [10]",
        dry.path().join("toss/f.bin").display()
    )));
    assert!(dry_output.contains(&format!(
        "\t\tEmpty directory would have been deleted: {}",
        dry.path().join("toss").display()
    )));
    assert!(!real_console.output().contains("would have been"));
}

#[test]
fn test_deletions_confined_to_editable_dirs() {
    let dir = tempdir().unwrap();
    write(dir.path(), "archive/f.gif", b"12");
    write(dir.path(), "working/f.gif", b"34");
    write(dir.path(), "working/solo.txt", b"keep me");

    let mut opts = options(dir.path(), Mode::PickFirst);
    opts.mutable_dirs = vec![PathBuf::from("working")];
    let mut console = ScriptedConsole::default();
    run(&opts, &mut console).unwrap();

    // The archive copy sorts first and is the keeper anyway; only the
    // editable copy is eligible for deletion.
    assert!(dir.path().join("archive/f.gif").exists());
    assert!(!dir.path().join("working/f.gif").exists());
    assert!(dir.path().join("working/solo.txt").exists());
}

#[test]
fn test_read_only_groups_survive_with_report() {
    let dir = tempdir().unwrap();
    write(dir.path(), "editable/x.txt", b"unique!");
    write(dir.path(), "frozen/one/f.gif", b"12");
    write(dir.path(), "frozen/two/f.gif", b"34");

    let mut opts = options(dir.path(), Mode::PickFirst);
    opts.mutable_dirs = vec![PathBuf::from("editable")];
    let mut console = ScriptedConsole::default();
    let summary = run(&opts, &mut console).unwrap();

    assert!(dir.path().join("frozen/one/f.gif").exists());
    assert!(dir.path().join("frozen/two/f.gif").exists());
    assert_eq!(summary.files, 0);

    let output = console.output();
    assert!(output.contains("skipping read-only duplicates: f.gif.2"));
    assert!(output.ends_with("Total amount of bytes cleaned: 0 B"));
}

#[test]
fn test_junk_ignore_and_tiny_channels() {
    let dir = tempdir().unwrap();
    write(dir.path(), "pics/.DS_Store", b"ignored");
    write(dir.path(), "pics/Thumbs.db", b"0123456789abcdef");
    write(dir.path(), "pics/.secret", b"abc");
    write(dir.path(), "pics/readme.txt", b"tiny");
    write(dir.path(), "pics/photo.jpg", b"real image bytes");

    let mut opts = options(dir.path(), Mode::PickFirst);
    opts.tiny_threshold = 10;
    let mut console = ScriptedConsole::default();
    let summary = run(&opts, &mut console).unwrap();

    // Ignored marker survives, junk goes, hidden tiny goes, visible tiny
    // and real content stay.
    assert!(dir.path().join("pics/.DS_Store").exists());
    assert!(!dir.path().join("pics/Thumbs.db").exists());
    assert!(!dir.path().join("pics/.secret").exists());
    assert!(dir.path().join("pics/readme.txt").exists());
    assert!(dir.path().join("pics/photo.jpg").exists());

    let output = console.output();
    assert!(output.contains(&format!(
        "IGNORING ===> {}",
        dir.path().join("pics/.DS_Store").display()
    )));
    assert!(output.contains(&format!(
        "skipping tiny file {} [4]",
        dir.path().join("pics/readme.txt").display()
    )));
    assert_eq!(summary.bytes, 19);
    assert!(output.ends_with("Total amount of bytes cleaned: 19 B"));
}

#[test]
fn test_interactive_pick_file_round_trip() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/song.mp3", b"0123456789");
    write(dir.path(), "b/song.mp3", b"abcdefghij");

    let mut console = ScriptedConsole::new([1]);
    let summary = run(&options(dir.path(), Mode::InteractivePickFile), &mut console).unwrap();

    assert!(!dir.path().join("a/song.mp3").exists());
    assert!(dir.path().join("b/song.mp3").exists());
    assert_eq!(summary.files, 1);
    assert_eq!(summary.dirs, 1);
    assert!(console
        .output()
        .contains("Choose the version of the file to keep:"));
}

#[test]
fn test_interactive_pick_directory_merges_groups() {
    let dir = tempdir().unwrap();
    let payload = vec![b'x'; 750];
    write(dir.path(), "d1/a.gif", &payload);
    write(dir.path(), "d2/a.gif", &payload);
    write(dir.path(), "d1/b.gif", &payload);
    write(dir.path(), "d2/b.gif", &payload);

    let mut console = ScriptedConsole::new([0]);
    let summary = run(
        &options(dir.path(), Mode::InteractivePickDirectory),
        &mut console,
    )
    .unwrap();

    let output = console.output();
    assert_eq!(
        output
            .matches("Choose the directory where you want to keep")
            .count(),
        1,
        "both groups share one prompt:\n{output}"
    );
    assert!(output.contains("([a.gif.750, b.gif.750]):"));

    assert!(dir.path().join("d1/a.gif").exists());
    assert!(dir.path().join("d1/b.gif").exists());
    assert!(!dir.path().join("d2").exists());
    assert_eq!(summary.bytes, 1500);
    assert!(output.ends_with("Total amount of bytes cleaned: 1.5 kB"));
}

#[test]
fn test_dry_runs_are_deterministic() {
    let dir = tempdir().unwrap();
    write(dir.path(), "one/f.gif", b"1234");
    write(dir.path(), "two/f.gif", b"5678");
    write(dir.path(), "two/g.gif", b"5678");
    write(dir.path(), "three/g.gif", b"abcd");

    let mut opts = options(dir.path(), Mode::PickFirst);
    opts.dry_run = true;

    let mut first = ScriptedConsole::default();
    run(&opts, &mut first).unwrap();
    let mut second = ScriptedConsole::default();
    run(&opts, &mut second).unwrap();

    assert_eq!(first.output(), second.output());
}

#[test]
fn test_overlapping_groups_clean_shared_directory() {
    let dir = tempdir().unwrap();
    // Two groups share the same pair of directories.
    write(dir.path(), "spare/a.gif", b"12");
    write(dir.path(), "spare/b.gif", b"12");
    write(dir.path(), "main/a.gif", b"12");
    write(dir.path(), "main/b.gif", b"12");

    let mut console = ScriptedConsole::default();
    let summary = run(&options(dir.path(), Mode::PickFirst), &mut console).unwrap();

    // Group a.gif.2 keeps main/a.gif and deletes spare/a.gif; group b.gif.2
    // keeps main/b.gif and deletes spare/b.gif, which empties spare.
    assert!(dir.path().join("main/a.gif").exists());
    assert!(dir.path().join("main/b.gif").exists());
    assert!(!dir.path().join("spare").exists());
    assert_eq!(summary.files, 2);
    assert_eq!(summary.dirs, 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_stop_the_sweep() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    write(dir.path(), "a-dup/f.gif", b"12");
    write(dir.path(), "locked/secret.txt", b"no entry");
    write(dir.path(), "z-dup/f.gif", b"34");

    // The walk visits a-dup, fails on locked, and must still reach z-dup.
    let locked = dir.path().join("locked");
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(&locked, perms).unwrap();

    let mut console = ScriptedConsole::default();
    let summary = run(&options(dir.path(), Mode::PickFirst), &mut console).unwrap();

    // Restore permissions for cleanup
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&locked, perms).unwrap();

    assert!(dir.path().join("a-dup/f.gif").exists());
    assert!(!dir.path().join("z-dup/f.gif").exists());
    assert!(dir.path().join("locked/secret.txt").exists());
    assert_eq!(summary.files, 1);
    assert_eq!(summary.bytes, 2);
}
