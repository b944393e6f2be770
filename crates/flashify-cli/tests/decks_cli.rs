//! Integration tests for the deck commands.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// A temp home pre-seeded with a stored token.
fn logged_in_home() -> TempDir {
    let home = TempDir::new().expect("create temp flashify home");
    std::fs::write(
        home.path().join("credentials.json"),
        r#"{"access_token": "tok-abc"}"#,
    )
    .unwrap();
    home
}

#[tokio::test]
async fn test_decks_list_renders_table() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/decks/"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Spanish"},
            {"id": 2, "name": "Capitals"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("flashify")
        .env("FLASHIFY_HOME", home.path())
        .env("FLASHIFY_API_URL", server.uri())
        .args(["decks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanish"))
        .stdout(predicate::str::contains("Capitals"));
}

#[tokio::test]
async fn test_decks_create_posts_name() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/decks/"))
        .and(body_json(serde_json::json!({"name": "Spanish"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!([{"id": 3, "name": "Spanish"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("flashify")
        .env("FLASHIFY_HOME", home.path())
        .env("FLASHIFY_API_URL", server.uri())
        .args(["decks", "create", "Spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created deck \"Spanish\"."));
}

#[tokio::test]
async fn test_expired_token_error_is_verbatim() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/decks/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "Invalid token"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("flashify")
        .env("FLASHIFY_HOME", home.path())
        .env("FLASHIFY_API_URL", server.uri())
        .args(["decks", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid token"));
}

#[test]
fn test_decks_list_requires_login() {
    let home = TempDir::new().unwrap();
    cargo_bin_cmd!("flashify")
        .env("FLASHIFY_HOME", home.path())
        .args(["decks", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}
