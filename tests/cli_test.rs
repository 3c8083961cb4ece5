//! End-to-end tests of the `actions` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary isolated from the caller's environment: working directory and
/// config home both point into `dir`.
fn actions(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("actions").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("ACTIONS_URL")
        .env_remove("ACTIONS_TOKEN_FILE")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path());
    cmd
}

async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    actions(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("all"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn completions_print_a_script() {
    let dir = TempDir::new().unwrap();
    actions(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("actions"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn missing_token_file_reports_unauthorized() {
    let dir = TempDir::new().unwrap();
    actions(&dir)
        .args(["--url", "http://127.0.0.1:9/", "all"])
        .assert()
        .code(77)
        .stderr(predicate::str::contains("Unauthorized, you have to log in first!"));
}

#[test]
fn empty_token_file_reports_unauthorized() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "").unwrap();
    actions(&dir)
        .args(["--url", "http://127.0.0.1:9/", "new", "-d", "walk", "-r", "done"])
        .assert()
        .code(77)
        .stderr(predicate::str::contains("Unauthorized"));
}

#[test]
fn malformed_date_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok").unwrap();
    actions(&dir)
        .args(["--url", "http://127.0.0.1:9/", "by", "date", "01/03/2024"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("expected yyyy-MM-dd"));
}

#[tokio::test]
async fn by_desc_prints_records_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .and(query_param("description", "run"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "description": "run", "result": "5km", "timestamp": "2024-03-01T07:00:00.000"},
            {"id": "2", "description": "run", "result": "10km", "timestamp": "2024-03-02T07:00:00.000"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok\n").unwrap();
    let uri = server.uri();

    let output = blocking(move || {
        let out = actions(&dir).args(["--url", uri.as_str(), "by", "d", "run"]).output().unwrap();
        drop(dir);
        out
    })
    .await;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.find("Id : 1").unwrap();
    let second = stdout.find("Id : 2").unwrap();
    assert!(first < second);
    assert!(stdout.contains("Description : run"));
    assert!(stdout.contains("Result : 10km"));
    assert!(stdout.contains("Timestamp : 2024-03-01T07:00:00.000"));
}

#[tokio::test]
async fn login_with_flags_saves_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Token": "jwt-xyz"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let token_path = dir.path().join("token");
    let uri = server.uri();

    let output = blocking(move || {
        let out = actions(&dir)
            .args(["--url", uri.as_str(), "login", "-u", "ann", "-p", "pw"])
            .output()
            .unwrap();
        let saved = std::fs::read_to_string(&token_path).unwrap();
        (out, saved)
    })
    .await;

    assert!(output.0.status.success());
    assert!(String::from_utf8_lossy(&output.0.stdout).contains("Successfully logged in."));
    assert_eq!(output.1, "jwt-xyz");
}

#[tokio::test]
async fn update_of_unknown_id_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .and(query_param("id", "missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok").unwrap();
    let uri = server.uri();

    let output = blocking(move || {
        actions(&dir)
            .args(["--url", uri.as_str(), "update", "--id", "missing", "-r", "skipped"])
            .output()
            .unwrap()
    })
    .await;

    assert_eq!(output.status.code(), Some(66));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Action has not been found by id missing"));
    let posts = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.to_string() == "POST")
        .count();
    assert_eq!(posts, 0);
}

#[tokio::test]
async fn by_res_and_by_date_send_their_parameter_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .and(query_param("result", "done"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "description": "walk", "result": "done", "timestamp": "2024-03-01T07:00:00.000"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .and(query_param("date", "2024-03-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "2", "description": "read", "result": "half", "timestamp": "2024-03-02T21:00:00.000"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok").unwrap();
    let uri = server.uri();

    let (by_res, by_date) = blocking(move || {
        let res = actions(&dir).args(["--url", uri.as_str(), "by", "res", "done"]).output().unwrap();
        let date = actions(&dir).args(["--url", uri.as_str(), "by", "date", "2024-03-02"]).output().unwrap();
        (res, date)
    })
    .await;

    assert!(by_res.status.success());
    assert!(String::from_utf8_lossy(&by_res.stdout).contains("Id : 1"));
    assert!(by_date.status.success());
    assert!(String::from_utf8_lossy(&by_date.stdout).contains("Id : 2"));

    for request in server.received_requests().await.unwrap() {
        assert_eq!(request.url.query_pairs().count(), 1);
    }
}

#[tokio::test]
async fn update_with_one_field_patches_the_stored_action() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .and(query_param("id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": "7", "description": "walk", "result": "pending", "timestamp": "2024-03-01T07:00:00.000"}
        )))
        .expect(1)
        .mount(&server)
        .await;
    let patched = json!({"id": "7", "description": "walk", "result": "done late", "timestamp": "2024-03-01T07:00:00.000"});
    Mock::given(method("POST"))
        .and(path("/api/item"))
        .and(body_json(&patched))
        .respond_with(ResponseTemplate::new(200).set_body_json(patched.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok").unwrap();
    let uri = server.uri();

    let output = blocking(move || {
        actions(&dir)
            .args(["--url", uri.as_str(), "update", "--id", "7", "-r", "done late"])
            .output()
            .unwrap()
    })
    .await;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Id : 7\n"), "update output has no leading delimiter: {}", stdout);
    assert!(stdout.contains("Result : done late"));
}

#[tokio::test]
async fn update_with_both_fields_replaces_without_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": "7", "description": "swim", "result": "1km", "timestamp": "2024-03-05T08:00:00.000"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok").unwrap();
    let uri = server.uri();

    let output = blocking(move || {
        actions(&dir)
            .args(["--url", uri.as_str(), "update", "--id", "7", "-d", "swim", "-r", "1km"])
            .output()
            .unwrap()
    })
    .await;

    assert!(output.status.success());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "full replace must not fetch first");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["id"], "7");
    assert_eq!(body["description"], "swim");
    assert_eq!(body["result"], "1km");
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn rejected_login_keeps_existing_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let token_path = dir.path().join("token");
    std::fs::write(&token_path, "old-token").unwrap();
    let uri = server.uri();

    let (output, saved) = blocking(move || {
        let out = actions(&dir)
            .args(["--url", uri.as_str(), "login", "-u", "ann", "-p", "wrong"])
            .output()
            .unwrap();
        let saved = std::fs::read_to_string(&token_path).unwrap();
        (out, saved)
    })
    .await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Incorrect username or/and password."));
    assert_eq!(saved, "old-token");
}
