use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn watermark(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("watermark").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("WATERMARK_API_URL")
        .env_remove("WATERMARK_ENV")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn unknown_route_shows_home() {
    let home = tempfile::tempdir().unwrap();

    watermark(home.path())
        .args(["route", "/nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Watermark"))
        .stdout(predicate::str::contains("/home"));
}

#[test]
fn validation_route_as_json() {
    let home = tempfile::tempdir().unwrap();

    watermark(home.path())
        .args(["--format", "json", "route", "/error-422"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"path\": \"/error-422\""))
        .stdout(predicate::str::contains(
            "Make sure the base image is bigger than the watermark image.",
        ));
}

#[test]
fn two_photos_are_rejected() {
    let home = tempfile::tempdir().unwrap();
    for name in ["a.png", "b.png", "logo.png"] {
        std::fs::write(home.path().join(name), b"not really a png").unwrap();
    }

    watermark(home.path())
        .args(["run", "--photo", "a.png", "b.png", "--watermark", "logo.png"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Only one file can be dropped at a time!"));

    assert!(!home.path().join("watermarked.png").exists());
}

#[test]
fn missing_file_is_an_io_error() {
    let home = tempfile::tempdir().unwrap();

    watermark(home.path())
        .args(["inspect", "missing.jpg"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn preview_prints_data_url() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("note.txt"), b"hi!").unwrap();

    watermark(home.path())
        .args(["preview", "note.txt"])
        .assert()
        .success()
        .stdout(predicate::str::diff("data:text/plain;base64,aGkh\n"));
}

#[test]
fn explicit_missing_config_fails() {
    let home = tempfile::tempdir().unwrap();

    watermark(home.path())
        .args(["--config", "nope.toml", "route", "/home"])
        .assert()
        .code(3);
}

#[test]
fn run_help_mentions_heif_build() {
    let home = tempfile::tempdir().unwrap();

    watermark(home.path())
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("`heif`"));
}

#[test]
fn verbose_logs_dispatched_command() {
    let home = tempfile::tempdir().unwrap();

    watermark(home.path())
        .args(["-v", "route", "/home"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Dispatching command"));
}
