//! Integration tests for the cyoa CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FOREST: &str = r#"{
  "start": {"text": "Hi", "choices": [{"text": "Go", "nextScene": "forest"}]},
  "forest": {"text": "Trees", "choices": []}
}"#;

const LAIR: &str = r#"{
  "start": {"text": "Home", "choices": [{"text": "Fight", "nextScene": "lair"}]},
  "lair": {
    "text": "A rat!",
    "choices": [],
    "battle": {"enabled": true, "enemyName": "Rat", "enemyHealth": 1, "victoryScene": "treasure"}
  },
  "treasure": {"text": "Gold everywhere.", "choices": []}
}"#;

const BROKEN: &str = r#"{
  "start": {"text": "Hi", "choices": [{"text": "Go", "nextScene": "nowhere"}]},
  "go_home": {"text": "Unreachable", "choices": []}
}"#;

fn adventure(json: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("adventure.json");
    fs::write(&path, json).unwrap();
    (dir, path)
}

fn cyoa() -> Command {
    Command::cargo_bin("cyoa").unwrap()
}

// ---------------------------------------------------------------------------
// new
// ---------------------------------------------------------------------------

#[test]
fn new_writes_starter_adventure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.json");
    cyoa()
        .args(["new", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("Welcome to your adventure!"));
    assert!(json.contains("\"nextScene\": \"forest\""));
}

#[test]
fn new_refuses_to_overwrite() {
    let (_dir, path) = adventure(FOREST);
    cyoa()
        .args(["new", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), FOREST);
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_clean_adventure() {
    let (_dir, path) = adventure(FOREST);
    cyoa()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn check_fails_on_reserved_scene_id() {
    let (_dir, path) = adventure(BROKEN);
    cyoa()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("nowhere")
                .and(predicate::str::contains("go_home"))
                .and(predicate::str::contains("1 error")),
        )
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn check_reports_malformed_json() {
    let (_dir, path) = adventure("{ nope");
    cyoa()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not decode adventure"));
}

// ---------------------------------------------------------------------------
// link
// ---------------------------------------------------------------------------

#[test]
fn link_encodes_query_string() {
    let (_dir, path) = adventure(FOREST);
    cyoa()
        .args([
            "link",
            path.to_str().unwrap(),
            "--base",
            "https://example.com/play",
            "--title",
            "Deep Woods",
            "--spiders",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("https://example.com/play?data=")
                .and(predicate::str::contains("&color=%2361dafb"))
                .and(predicate::str::contains("&title=Deep%20Woods"))
                .and(predicate::str::contains("&spiders=1")),
        );
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_follows_a_choice() {
    let (_dir, path) = adventure(FOREST);
    cyoa()
        .args(["play", path.to_str().unwrap(), "--script"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hi").and(predicate::str::contains("Trees")));
}

#[test]
fn play_wins_a_battle() {
    let (_dir, path) = adventure(LAIR);
    cyoa()
        .args(["play", path.to_str().unwrap(), "--script", "--seed", "7"])
        .write_stdin("1\na\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("A Rat appears!")
                .and(predicate::str::contains("You defeated the Rat!"))
                .and(predicate::str::contains("Gold everywhere.")),
        );
}

#[test]
fn play_shows_missing_scene_and_recovers() {
    let (_dir, path) = adventure(BROKEN);
    cyoa()
        .args(["play", path.to_str().unwrap(), "--script"])
        .write_stdin("1\nr\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Scene \"nowhere\" not found!")
                .and(predicate::str::contains("Return to Start")),
        );
}

#[test]
fn play_leaves_through_control_token() {
    let (_dir, path) = adventure(
        r#"{"start": {"text": "Hi", "choices": [{"text": "Home", "nextScene": "go_home"}]}}"#,
    );
    cyoa()
        .args(["play", path.to_str().unwrap(), "--script"])
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Leaving for Go home (/)"));
}

#[test]
fn play_deep_link_scene() {
    let (_dir, path) = adventure(FOREST);
    cyoa()
        .args(["play", path.to_str().unwrap(), "--script", "--scene", "forest"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trees").and(predicate::str::contains("Hi").not()));
}

#[test]
fn play_from_link() {
    let (_dir, path) = adventure(FOREST);
    let output = cyoa()
        .args(["link", path.to_str().unwrap()])
        .output()
        .unwrap();
    let link = String::from_utf8(output.stdout).unwrap();

    cyoa()
        .args(["play", "--link", link.trim(), "--script"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trees"));
}

#[test]
fn play_from_storage() {
    let (dir, path) = adventure(FOREST);
    let store = dir.path().join("store");
    cyoa()
        .args([
            "store",
            path.to_str().unwrap(),
            "--dir",
            store.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("adventureData"));

    cyoa()
        .args(["play", "--storage", store.to_str().unwrap(), "--script"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trees"));
}

#[test]
fn play_empty_adventure_shows_welcome() {
    let (_dir, path) = adventure("{}");
    cyoa()
        .args(["play", path.to_str().unwrap(), "--script"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("no scenes yet")
                .and(predicate::str::contains("Leaving for Make your own (/code)")),
        );
}

#[test]
fn play_bad_link_shows_error_screen() {
    cyoa()
        .args(["play", "--link", "?title=Nothing", "--script"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not load adventure"));
}

#[test]
fn play_without_source_fails() {
    cyoa()
        .args(["play", "--script"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no adventure given"));
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_html_uses_derived_filename() {
    let (dir, path) = adventure(FOREST);
    cyoa()
        .args(["export", path.to_str().unwrap(), "--title", "Deep Woods!"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("deep_woods__adventure.html"));

    let html = fs::read_to_string(dir.path().join("deep_woods__adventure.html")).unwrap();
    assert!(html.contains("<title>Deep Woods!</title>"));
    assert!(html.contains("const SCENE_DATA = "));
    assert!(html.contains("const SPIDERS_ENABLED = false;"));
}

#[test]
fn export_json_to_output_path() {
    let (dir, path) = adventure(FOREST);
    let out = dir.path().join("out.json");
    cyoa()
        .args([
            "export",
            path.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let json = fs::read_to_string(&out).unwrap();
    assert!(json.contains("\"Trees\""));
}

#[test]
fn export_rejects_unknown_format() {
    let (_dir, path) = adventure(FOREST);
    cyoa()
        .args(["export", path.to_str().unwrap(), "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format"));
}
