use assert_cmd::Command;
use assert_cmd::prelude::OutputAssertExt;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn poetrydb(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("poetrydb").expect("binary should build");
    cmd.env_remove("POETRYDB_URL")
        .env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(config_dir.path());
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    poetrydb(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("authors"))
        .stdout(predicate::str::contains("random"));
}

#[test]
fn search_without_parameters_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    poetrydb(&dir)
        .args(["--base-url", "http://127.0.0.1:9", "search"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "You must include at least one search parameter.",
        ));
}

#[test]
fn poemcount_alone_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    poetrydb(&dir)
        .args(["--base-url", "http://127.0.0.1:9", "search", "--poemcount", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poemcount"));
}

#[test]
fn config_set_then_show() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    poetrydb(&dir)
        .args(["config", "set", "--base-url", "http://localhost:3000", "--timeout", "7"])
        .assert()
        .success();

    poetrydb(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base URL: http://localhost:3000"))
        .stdout(predicate::str::contains("Timeout: 7 seconds"));
}

#[tokio::test(flavor = "multi_thread")]
async fn search_against_server_prints_json_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/author,title/poe;raven"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "title": "The Raven",
            "author": "Edgar Allan Poe",
            "lines": ["Once upon a midnight dreary"],
            "linecount": "108"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        poetrydb(&dir)
            .args(["--base-url", base_url.as_str(), "--format", "json"])
            .args(["search", "--author", "poe", "--title", "raven"])
            .output()
            .expect("run poetrydb")
    })
    .await
    .expect("command task panicked");

    output
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"heading\": \"Search Author for poe & Title for raven\"",
        ))
        .stdout(predicate::str::contains("\"count\": \"Showing 1 Poem\""))
        .stdout(predicate::str::contains("\"type\": \"cards\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_search_prints_no_poems_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/title/zzzz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": 404, "reason": "Not found" })),
        )
        .mount(&server)
        .await;

    let base_url = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        poetrydb(&dir)
            .args(["--base-url", base_url.as_str(), "search", "--title", "zzzz"])
            .output()
            .expect("run poetrydb")
    })
    .await
    .expect("command task panicked");

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("No Poems found"));
}
