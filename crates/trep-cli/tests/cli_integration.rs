//! CLI binary integration tests.
//!
//! Run the actual `opentrep-dbmgr` binary with assert_cmd against a small
//! generated POR fixture file, grounded on the teacher's own
//! `uls-cli/tests/cli_integration.rs` (fixture-backed binary invocation).

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const NCE_LINE: &str = "NCE^LFMN^^Y^6299418^0^Nice Cote d'Azur^Nice Cote d'Azur^43.66272^7.20787^S^AIRP^50^^^^FR^^France^Europe^B8^Provence-Alpes-Cote d'Azur^Provence-Alpes-Cote d'Azur^06^Alpes-Maritimes^Alpes-Maritimes^^^0^2^2^Europe/Paris^1^2^1^2013-05-01^NCE^Nice^NCE|6299418|Nice|Nice|FR|B8^^B8^A^^en|Nice Airport|^^^EUR^^^43.66272^7.20787";
const SFO_LINE: &str = "SFO^KSFO^^Y^5391959^0^San Francisco^San Francisco^37.6213^-122.3790^S^AIRP^80^^^^US^^United States^North America^CA^California^California^^^0^4^4^America/Los_Angeles^-8^-7^-8^2013-05-01^SFO^San Francisco^SFO|5391959|San Francisco|San Francisco|US|CA^^CA^A^^^^^USD^^^37.6213^-122.3790";

fn write_fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample_por.csv");
    let contents = format!("iata_code^...\n{NCE_LINE}\n{SFO_LINE}\n");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("opentrep-dbmgr")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("lookup"));
}

#[test]
fn test_search_requires_filled_index_to_find_anything() {
    let (_dir, porfile) = write_fixture();
    // Without a prior `db fill`, the fuzzy index is empty for this process.
    Command::cargo_bin("opentrep-dbmgr")
        .unwrap()
        .args(["--porfile"])
        .arg(&porfile)
        .args(["search", "nice"])
        .assert()
        .failure();
}

#[test]
fn test_lookup_without_db_reports_error() {
    Command::cargo_bin("opentrep-dbmgr")
        .unwrap()
        .args(["lookup", "iata", "NCE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no SQL database configured"));
}

#[test]
fn test_db_fill_and_lookup_round_trip() {
    let (dir, porfile) = write_fixture();
    let db_path = dir.path().join("catalog.db");

    Command::cargo_bin("opentrep-dbmgr")
        .unwrap()
        .arg("--porfile")
        .arg(&porfile)
        .arg("--sqldbtype")
        .arg("sqlite")
        .arg("--sqldbconx")
        .arg(db_path.to_str().unwrap())
        .args(["db", "fill"])
        .assert()
        .success()
        .stdout(predicate::str::contains("read 2 records"));

    Command::cargo_bin("opentrep-dbmgr")
        .unwrap()
        .arg("--sqldbtype")
        .arg("sqlite")
        .arg("--sqldbconx")
        .arg(db_path.to_str().unwrap())
        .args(["lookup", "iata", "NCE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NCE"));
}

#[test]
fn test_mysql_backend_is_rejected() {
    Command::cargo_bin("opentrep-dbmgr")
        .unwrap()
        .arg("--sqldbtype")
        .arg("mysql")
        .args(["db", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not implemented"));
}
