use assert_cmd::prelude::*;
use mockito::Matcher;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &Path, api_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = format!("api_url: {api_url}\npreferences:\n  page_size: 25\n");
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn vpsview() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vpsview"));
    // Never pick up a developer's real ~/.vpsview/config.yaml.
    cmd.env("VPSVIEW_CONFIG", "/nonexistent/vpsview-tests/config.yaml")
        .env_remove("VPSVIEW_API_URL")
        .env_remove("VPSVIEW_FORMAT")
        .env_remove("VPSVIEW_NO_CACHE");
    cmd
}

#[test]
fn help_lists_page_commands() {
    vpsview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("circuits"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn missing_config_points_at_init() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    vpsview()
        .arg("metrics")
        .arg("--config")
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("vpsview init"));

    Ok(())
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://localhost:5000/api");

    let assert = vpsview()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("http://localhost:5000/api"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("Default page size: 25"));

    Ok(())
}

#[test]
fn unknown_column_fails_before_any_request() {
    // Nothing listens on this port; a request would fail with a network error instead.
    vpsview()
        .args(["races", "query", "--columns", "raceId,bogus"])
        .args(["--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column 'bogus'"));
}

#[test]
fn completion_script_is_generated() {
    vpsview()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vpsview"));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn metrics_json_from_api() {
    let mut server = mockito::Server::new();
    let _metrics = server
        .mock("GET", "/database/metrics")
        .with_status(200)
        .with_body(r#"{ "circuits": 77, "lap_times": 589081 }"#)
        .create();

    vpsview()
        .args(["metrics", "--format", "json", "--api-url", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lap_times\": 589081"));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn races_query_keeps_requested_columns() {
    let mut server = mockito::Server::new();
    let races = server
        .mock("GET", "/races")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("pageSize".into(), "10".into()),
            Matcher::UrlEncoded("filter".into(), "year=2023".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{
                "records": [
                    { "raceId": 1110, "year": 2023, "round": 10, "name": "British Grand Prix", "date": "2023-07-09" }
                ],
                "_metadata": { "totalCount": 1, "page": 1, "pageSize": 10 }
            }"#,
        )
        .create();

    let assert = vpsview()
        .args(["races", "query", "--filter", "year=2023", "--columns", "raceId,name"])
        .args(["--format", "json", "--api-url", &server.url()])
        .assert()
        .success();

    races.assert();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("\"raceId\": 1110"));
    assert!(stdout.contains("British Grand Prix"));
    assert!(!stdout.contains("\"round\""));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn http_error_body_is_shown() {
    let mut server = mockito::Server::new();
    let _circuits = server
        .mock("GET", "/circuits")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("not found")
        .create();

    vpsview()
        .args(["circuits", "--api-url", &server.url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 404"))
        .stderr(predicate::str::contains("not found"));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn laps_without_results_reports_no_data() {
    let mut server = mockito::Server::new();
    let _circuits = server
        .mock("GET", "/circuits")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{ "records": [ { "circuitId": 9, "name": "Silverstone Circuit" } ] }"#)
        .create();
    let _laps = server
        .mock("GET", "/races/lapTimes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{ "records": [] }"#)
        .create();

    vpsview()
        .args(["laps", "--driver", "1", "--circuit", "Silverstone Circuit", "--year", "1951"])
        .args(["--format", "json", "--api-url", &server.url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data available for the selected filters."));
}
