//! Integration tests for the ra-cli binary commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use ra_engine::{PlayerIdentity, ScoreRecord};
use tempfile::TempDir;

const TINY_STORY: &str = r#"{
    "title": "Tiny",
    "scenes": [
        {
            "id": "hall",
            "name": "Hall",
            "description": "A bare hall. A coin glints on the floor.",
            "exits": { "north": "exit" },
            "items": {
                "coin": {
                    "name": "Coin",
                    "scene_fragment": " A coin glints on the floor.",
                    "is_takeable": true,
                    "taken_point_value": 10,
                    "taken_message": "You pocket the coin."
                }
            }
        },
        {
            "id": "exit",
            "name": "Outside",
            "description": "Fresh air at last."
        }
    ]
}"#;

fn ra() -> Command {
    let mut cmd = Command::cargo_bin("ra").unwrap();
    cmd.env_remove("RA_PLAYER").env_remove("RA_SCORES");
    cmd
}

fn story_file(json: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("story.json"), json).unwrap();
    dir
}

// ---------------------------------------------------------------------------
// stories
// ---------------------------------------------------------------------------

#[test]
fn stories_lists_bundled() {
    ra().arg("stories")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("Corgi Quest"))
        .stdout(predicate::str::contains("2 stories"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_valid_story() {
    let dir = story_file(TINY_STORY);
    ra().args(["check"])
        .arg(dir.path().join("story.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed for 'Tiny'"))
        .stdout(predicate::str::contains("2 scenes, 1 endings, 1 items"));
}

#[test]
fn check_reports_dangling_exit() {
    let dir = story_file(&TINY_STORY.replace(r#""north": "exit""#, r#""north": "void""#));
    ra().args(["check"])
        .arg(dir.path().join("story.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("void"));
}

#[test]
fn check_missing_file() {
    ra().args(["check", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_demo_to_the_green_portal() {
    ra().args(["play", "--story", "demo"])
        .write_stdin("take gun\ngo east\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stranger in a Strange Land"))
        .stdout(predicate::str::contains("You take the gun."))
        .stdout(predicate::str::contains("Green Means Go"))
        .stdout(predicate::str::contains("Score: 25"))
        .stdout(predicate::str::contains("Game Over"));
}

#[test]
fn play_reports_invalid_commands_with_a_hint() {
    ra().args(["play"])
        .write_stdin("tkae gun\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid command"))
        .stdout(predicate::str::contains("take"));
}

#[test]
fn play_unknown_story_fails() {
    ra().args(["play", "--story", "nope"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn play_story_file_and_record_score() {
    let dir = story_file(TINY_STORY);
    let scores = dir.path().join("scores.jsonl");

    ra().args(["play", "--player", "ada", "--file"])
        .arg(dir.path().join("story.json"))
        .arg("--scores")
        .arg(&scores)
        .write_stdin("take coin\ngo north\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You pocket the coin."))
        .stdout(predicate::str::contains("Score: 10"));

    let content = fs::read_to_string(&scores).unwrap();
    let record: ScoreRecord = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(record.score, 10);
    assert_eq!(record.story_title, "Tiny");
    assert_eq!(record.display_name, "ada");
}

#[test]
fn same_player_name_keeps_its_id_across_runs() {
    let dir = TempDir::new().unwrap();
    let scores = dir.path().join("scores.jsonl");

    for input in ["take gun\ngo east\n", "go west\n"] {
        ra().args(["play", "--player", "ada", "--scores"])
            .arg(&scores)
            .write_stdin(input)
            .assert()
            .success();
    }

    let content = fs::read_to_string(&scores).unwrap();
    let records: Vec<ScoreRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].player_id, records[1].player_id);
    assert_eq!(records[0].player_id, PlayerIdentity::named("ada").id);
}

#[test]
fn anonymous_play_records_nothing() {
    let dir = TempDir::new().unwrap();
    let scores = dir.path().join("scores.jsonl");

    ra().args(["play", "--scores"])
        .arg(&scores)
        .write_stdin("go west\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Red Means Dead"));

    assert!(!scores.exists());
}

#[test]
fn restart_after_game_over() {
    ra().args(["play"])
        .write_stdin("go west\nlook\nrestart\ntake gun\nscore\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The game is over"))
        .stdout(predicate::str::contains("Score: 25"));
}

// ---------------------------------------------------------------------------
// scores
// ---------------------------------------------------------------------------

#[test]
fn scores_best_first_and_filtered() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.jsonl");
    let ada = PlayerIdentity::new("ada");
    let bo = PlayerIdentity::new("bo");
    let lines = [
        ScoreRecord::new("Demo", 5, &ada),
        ScoreRecord::new("Demo", 30, &bo),
        ScoreRecord::new("Corgi Quest", 140, &ada),
    ]
    .iter()
    .map(|r| serde_json::to_string(r).unwrap())
    .collect::<Vec<_>>()
    .join("\n");
    fs::write(&path, lines).unwrap();

    ra().args(["scores", "--story", "demo", "--scores"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("bo"))
        .stdout(predicate::str::contains("2 scores"))
        .stdout(predicate::str::contains("Corgi Quest").not());
}

#[test]
fn scores_without_file_is_empty() {
    let dir = TempDir::new().unwrap();
    ra().args(["scores", "--scores"])
        .arg(dir.path().join("missing.jsonl"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No scores recorded."));
}
