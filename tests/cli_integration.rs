//! Integration tests for the `sb` CLI.
//!
//! Each test creates a temp workspace, runs `sb` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `sb` binary.
fn sb_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("sb");
    path
}

/// Run `sb` with the given args in the given directory, returning (stdout, stderr, success).
fn run_sb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(sb_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run sb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `sb` expecting success, return stdout.
fn run_sb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_sb(dir, args);
    if !success {
        panic!(
            "sb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `sb` expecting failure, return stderr.
fn run_sb_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_sb(dir, args);
    if success {
        panic!("sb {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

/// A fresh workspace with the demo skills
fn demo_workspace() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    run_sb_ok(tmp.path(), &["init", "--name", "Skills", "--demo"]);
    tmp
}

/// Current board as JSON
fn snapshot(dir: &Path) -> serde_json::Value {
    let out = run_sb_ok(dir, &["list", "--json"]);
    serde_json::from_str(&out).unwrap()
}

/// Item names in one list, in order
fn names(dir: &Path, list: &str) -> Vec<String> {
    snapshot(dir)[list]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect()
}

fn board_md(dir: &Path) -> String {
    fs::read_to_string(dir.join("board/board.md")).unwrap()
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_workspace() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_sb_ok(tmp.path(), &["init", "--name", "Rust Path"]);
    assert_eq!(out, "Initialized board: Rust Path\n");

    let toml = fs::read_to_string(tmp.path().join("board/board.toml")).unwrap();
    assert!(toml.contains("name = \"Rust Path\""));
    assert_eq!(
        board_md(tmp.path()),
        "# Rust Path\n\n## Todo\n\n## In Progress\n\n## Done\n"
    );
}

#[test]
fn test_init_demo_seeds_every_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_sb_ok(tmp.path(), &["init", "--name", "Skills", "--demo"]);
    assert!(out.contains("To Learn: 3 items"));
    assert!(out.contains("Learning: 2 items"));
    assert!(out.contains("Done: 3 items"));

    assert_eq!(names(tmp.path(), "todo"), ["TypeScript", "Docker", "GraphQL"]);
    assert_eq!(names(tmp.path(), "inProgress"), ["React", "Node.js"]);
    assert_eq!(names(tmp.path(), "done"), ["HTML", "CSS", "JavaScript"]);
}

#[test]
fn test_init_twice_needs_force() {
    let tmp = demo_workspace();
    let err = run_sb_err(tmp.path(), &["init", "--name", "Again"]);
    assert!(err.contains("already exists"));
    // Existing board untouched
    assert_eq!(snapshot(tmp.path())["todo"].as_array().unwrap().len(), 3);

    run_sb_ok(tmp.path(), &["init", "--name", "Again", "--force"]);
    assert!(board_md(tmp.path()).starts_with("# Again\n"));
    assert_eq!(snapshot(tmp.path())["todo"].as_array().unwrap().len(), 0);
}

#[test]
fn test_commands_outside_workspace_fail() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_sb(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.starts_with("error: not a skillboard workspace"));
}

#[test]
fn test_discovery_from_subdirectory_and_board_dir_flag() {
    let tmp = demo_workspace();
    let sub = tmp.path().join("notes/deep");
    fs::create_dir_all(&sub).unwrap();
    let out = run_sb_ok(&sub, &["list", "done"]);
    assert!(out.contains("SK-006 HTML"));

    let elsewhere = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();
    let out = run_sb_ok(elsewhere.path(), &["-C", dir, "show", "SK-004"]);
    assert!(out.starts_with("SK-004 React\n"));
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_human_output() {
    let tmp = demo_workspace();
    let out = run_sb_ok(tmp.path(), &["list", "inProgress"]);
    assert_eq!(
        out,
        "== Learning (inProgress) 2 ==\n  SK-004 React\n  SK-005 Node.js\n"
    );

    let out = run_sb_ok(tmp.path(), &["list"]);
    assert!(out.starts_with("== To Learn (todo) 3 ==\n  SK-001 TypeScript\n"));
    assert!(out.contains("\n\n== Done (done) 3 ==\n"));
}

#[test]
fn test_list_grep_filters_items() {
    let tmp = demo_workspace();
    let out = run_sb_ok(tmp.path(), &["list", "--grep", "script"]);
    assert!(out.contains("SK-001 TypeScript"));
    assert!(out.contains("SK-008 JavaScript"));
    assert!(!out.contains("Docker"));

    let out = run_sb_ok(tmp.path(), &["list", "done", "--json", "--grep", "completed CSS"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["list"], "done");
    assert_eq!(parsed["title"], "Done");
    let items = parsed["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "SK-007");
}

#[test]
fn test_show_json() {
    let tmp = demo_workspace();
    let out = run_sb_ok(tmp.path(), &["show", "SK-005", "--json"]);
    let item: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(item["name"], "Node.js");
    assert_eq!(item["description"], "Currently learning Node.js");
    assert_eq!(item["list"], "inProgress");
    assert_eq!(item["index"], 1);
}

#[test]
fn test_show_unknown_id() {
    let tmp = demo_workspace();
    let err = run_sb_err(tmp.path(), &["show", "SK-999"]);
    assert_eq!(err, "error: item not found: SK-999\n");
}

#[test]
fn test_unknown_list_is_rejected() {
    let tmp = demo_workspace();
    let err = run_sb_err(tmp.path(), &["list", "someday"]);
    assert!(err.contains("unknown list \"someday\""));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_add_prints_new_id_and_persists() {
    let tmp = demo_workspace();
    let out = run_sb_ok(tmp.path(), &["add", "todo", "Rust", "-d", "The book"]);
    assert_eq!(out, "SK-009\n");

    let md = board_md(tmp.path());
    assert!(md.contains("- `SK-009` Rust\n"));
    assert!(md.contains("  - description: The book\n"));
    assert_eq!(names(tmp.path(), "todo").last().unwrap(), "Rust");
}

#[test]
fn test_add_at_position_json() {
    let tmp = demo_workspace();
    let out = run_sb_ok(tmp.path(), &["add", "done", "Git", "--at", "0", "--json"]);
    let item: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(item["id"], "SK-009");
    assert_eq!(item["list"], "done");
    assert_eq!(item["index"], 0);
    assert!(item["added"].is_string());
    assert_eq!(names(tmp.path(), "done")[0], "Git");
}

#[test]
fn test_add_empty_name_fails_without_writing() {
    let tmp = demo_workspace();
    let before = board_md(tmp.path());
    let err = run_sb_err(tmp.path(), &["add", "todo", "   "]);
    assert!(err.contains("item name cannot be empty"));
    assert_eq!(board_md(tmp.path()), before);
}

#[test]
fn test_rm_reports_missing_ids() {
    let tmp = demo_workspace();
    let (_, stderr, success) = run_sb(tmp.path(), &["rm", "SK-002", "SK-404"]);
    assert!(success);
    assert_eq!(stderr, "warning: item not found: SK-404\n");
    assert_eq!(names(tmp.path(), "todo"), ["TypeScript", "GraphQL"]);

    let out = run_sb_ok(tmp.path(), &["rm", "SK-001", "SK-002", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["deleted"], serde_json::json!(["SK-001"]));
    assert_eq!(parsed["missing"], serde_json::json!(["SK-002"]));
}

#[test]
fn test_mv_between_lists() {
    let tmp = demo_workspace();
    run_sb_ok(tmp.path(), &["mv", "SK-002", "done", "1"]);
    assert_eq!(names(tmp.path(), "done"), ["HTML", "Docker", "CSS", "JavaScript"]);
    assert_eq!(names(tmp.path(), "todo"), ["TypeScript", "GraphQL"]);

    // Default and past-the-end positions append
    run_sb_ok(tmp.path(), &["mv", "SK-006", "todo"]);
    run_sb_ok(tmp.path(), &["mv", "SK-007", "todo", "50"]);
    assert_eq!(
        names(tmp.path(), "todo"),
        ["TypeScript", "GraphQL", "HTML", "CSS"]
    );
}

#[test]
fn test_mv_within_list() {
    let tmp = demo_workspace();
    let out = run_sb_ok(tmp.path(), &["mv", "SK-001", "todo", "2", "--json"]);
    let item: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(item["index"], 2);
    assert_eq!(names(tmp.path(), "todo"), ["Docker", "GraphQL", "TypeScript"]);
}

#[test]
fn test_mv_unknown_item() {
    let tmp = demo_workspace();
    let before = board_md(tmp.path());
    let err = run_sb_err(tmp.path(), &["mv", "SK-404", "done"]);
    assert!(err.contains("item not found: SK-404"));
    assert_eq!(board_md(tmp.path()), before);
}

#[test]
fn test_reorder() {
    let tmp = demo_workspace();
    run_sb_ok(tmp.path(), &["reorder", "done", "2", "0"]);
    assert_eq!(names(tmp.path(), "done"), ["JavaScript", "HTML", "CSS"]);

    let err = run_sb_err(tmp.path(), &["reorder", "done", "3", "0"]);
    assert!(err.contains("index 3 out of range for done (3 items)"));
}

#[test]
fn test_edit_name_and_description() {
    let tmp = demo_workspace();
    run_sb_ok(tmp.path(), &["edit", "SK-003", "--name", "GraphQL APIs"]);
    run_sb_ok(tmp.path(), &["edit", "SK-003", "-d", ""]);
    let out = run_sb_ok(tmp.path(), &["show", "SK-003", "--json"]);
    let item: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(item["name"], "GraphQL APIs");
    assert_eq!(item["description"], "");

    let err = run_sb_err(tmp.path(), &["edit", "SK-003"]);
    assert!(err.contains("nothing to change"));
}

#[test]
fn test_next_and_back() {
    let tmp = demo_workspace();
    let out = run_sb_ok(tmp.path(), &["next", "SK-001"]);
    assert_eq!(out, "SK-001 -> Learning\n");
    assert_eq!(names(tmp.path(), "inProgress"), ["React", "Node.js", "TypeScript"]);

    let out = run_sb_ok(tmp.path(), &["next", "SK-001"]);
    assert_eq!(out, "SK-001 -> Done\n");

    let out = run_sb_ok(tmp.path(), &["back", "SK-006"]);
    assert_eq!(out, "SK-006 -> Learning\n");
}

#[test]
fn test_step_past_the_edges_fails() {
    let tmp = demo_workspace();
    let before = board_md(tmp.path());

    let err = run_sb_err(tmp.path(), &["next", "SK-006"]);
    assert!(err.contains("already in the last list"));
    let err = run_sb_err(tmp.path(), &["back", "SK-001"]);
    assert!(err.contains("already in the first list"));

    assert_eq!(board_md(tmp.path()), before);
}

#[test]
fn test_import_snapshot() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_sb_ok(tmp.path(), &["init", "--name", "Skills"]);
    let json = r#"{
        "todo": [{"id": "RS-1", "name": "Traits"}],
        "inProgress": [{"id": "RS-2", "name": "Lifetimes", "description": "Variance"}],
        "done": []
    }"#;
    fs::write(tmp.path().join("seed.json"), json).unwrap();

    let out = run_sb_ok(tmp.path(), &["import", "seed.json"]);
    assert_eq!(out, "imported 2 items\n");
    assert_eq!(names(tmp.path(), "inProgress"), ["Lifetimes"]);

    // Non-empty boards need --replace
    let err = run_sb_err(tmp.path(), &["import", "seed.json"]);
    assert!(err.contains("board already has 2 items"));
    run_sb_ok(tmp.path(), &["import", "seed.json", "--replace"]);
    assert_eq!(snapshot(tmp.path())["todo"].as_array().unwrap().len(), 1);
}

#[test]
fn test_import_rejects_duplicate_ids() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_sb_ok(tmp.path(), &["init", "--name", "Skills"]);
    let json = r#"{"todo": [{"id": "A-1", "name": "One"}], "done": [{"id": "A-1", "name": "Two"}]}"#;
    fs::write(tmp.path().join("dup.json"), json).unwrap();

    let err = run_sb_err(tmp.path(), &["import", "dup.json"]);
    assert!(err.contains("duplicate item id A-1"));
    assert!(snapshot(tmp.path())["todo"].as_array().unwrap().is_empty());
}

#[test]
fn test_import_checks_added_dates() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_sb_ok(tmp.path(), &["init", "--name", "Skills"]);
    let json = r#"{"todo": [{"id": "A-1", "name": "One", "added": "2025-05-14\n## Done"}]}"#;
    fs::write(tmp.path().join("bad.json"), json).unwrap();

    let err = run_sb_err(tmp.path(), &["import", "bad.json"]);
    assert!(err.contains("invalid added date"));
    assert_eq!(board_md(tmp.path()), "# Skills\n\n## Todo\n\n## In Progress\n\n## Done\n");

    let json = r#"{"todo": [{"id": "A-1", "name": "One", "added": "2025-05-14"}]}"#;
    fs::write(tmp.path().join("good.json"), json).unwrap();
    run_sb_ok(tmp.path(), &["import", "good.json"]);
    assert!(board_md(tmp.path()).contains("  - added: 2025-05-14\n"));
    assert_eq!(snapshot(tmp.path())["todo"][0]["added"], "2025-05-14");
}

#[test]
fn test_add_rejects_unusable_id_prefix() {
    let tmp = demo_workspace();
    let config_path = tmp.path().join("board/board.toml");
    let toml = fs::read_to_string(&config_path).unwrap();
    fs::write(&config_path, toml.replace("prefix = \"SK\"", "prefix = \"S K\"")).unwrap();
    let before = board_md(tmp.path());

    let err = run_sb_err(tmp.path(), &["add", "todo", "Zig"]);
    assert!(err.contains("invalid id prefix"));
    assert_eq!(board_md(tmp.path()), before);
    run_sb_ok(tmp.path(), &["list"]);
}

#[test]
fn test_title_updates_config_and_output() {
    let tmp = demo_workspace();
    run_sb_ok(tmp.path(), &["title", "inProgress", "Studying"]);

    let toml = fs::read_to_string(tmp.path().join("board/board.toml")).unwrap();
    assert!(toml.contains("in_progress = \"Studying\""));
    let out = run_sb_ok(tmp.path(), &["next", "SK-002"]);
    assert_eq!(out, "SK-002 -> Studying\n");

    let err = run_sb_err(tmp.path(), &["title", "done", "  "]);
    assert!(err.contains("list title cannot be empty"));
}

#[test]
fn test_hand_edited_board_is_picked_up() {
    let tmp = demo_workspace();
    let md = board_md(tmp.path()).replace("`SK-004` React", "`SK-004` React Native");
    fs::write(tmp.path().join("board/board.md"), md).unwrap();

    let out = run_sb_ok(tmp.path(), &["show", "SK-004"]);
    assert!(out.starts_with("SK-004 React Native\n"));
    assert!(out.contains("list: Learning (inProgress), position 0"));
}

#[test]
fn test_invalid_board_file_is_an_error() {
    let tmp = demo_workspace();
    let md = board_md(tmp.path()).replace("`SK-002`", "`SK-001`");
    fs::write(tmp.path().join("board/board.md"), &md).unwrap();

    let err = run_sb_err(tmp.path(), &["add", "todo", "Rust"]);
    assert!(err.starts_with("error: invalid board.md"));
    // The bad file is left for the user to fix
    assert_eq!(board_md(tmp.path()), md);
}
