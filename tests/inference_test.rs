//! End-to-end tests of `ask` and `chat` against a mock assistant backend.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAILURE_TEXT: &str = "Unable to process your request. Please try again.";

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn verion(dir: &TempDir, api_url: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("verion");
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE")
        .env("VERION_API_URL", api_url);
    cmd
}

#[tokio::test]
async fn test_ask_prints_formatted_reply() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/invoke"))
        .and(body_json(json!({ "text": "Explain indemnity" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "## Indemnity\n1. One party **covers** losses\n"
        })))
        .expect(1)
        .mount(&server)
        .await;

    verion(&temp_dir, &server.uri())
        .args(["ask", "Explain indemnity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Explain indemnity"))
        .stdout(predicate::str::contains("Indemnity\n  1. One party covers losses"))
        .stdout(predicate::str::contains("Verion is analyzing...").not())
        .stderr(predicate::str::contains("Verion is analyzing..."));
}

#[tokio::test]
async fn test_ask_with_file_sends_multipart() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("lease.txt");
    fs::write(&document, "Tenant pays rent monthly.").unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/invoke"))
        .and(body_string_contains("Please analyze this document"))
        .and(body_string_contains("Tenant pays rent monthly."))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "output": "A monthly lease." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    verion(&temp_dir, &server.uri())
        .args(["ask", "--file", document.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Uploaded 1 file(s)"))
        .stdout(predicate::str::contains("[file] lease.txt"))
        .stdout(predicate::str::contains("A monthly lease."));
}

#[tokio::test]
async fn test_ask_backend_error_shows_warning() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "down" })))
        .expect(1)
        .mount(&server)
        .await;

    verion(&temp_dir, &server.uri())
        .args(["ask", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains(FAILURE_TEXT));
}

#[test]
fn test_ask_without_prompt_or_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    verion(&temp_dir, "http://127.0.0.1:9")
        .arg("ask")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to send"));
}

#[tokio::test]
async fn test_chat_session_is_saved_to_history() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/invoke"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": "**Short answer**" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    verion(&temp_dir, &server.uri())
        .arg("chat")
        .write_stdin("What is a tort?\n/bogus\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("your AI legal assistant"))
        .stdout(predicate::str::contains("Short answer"))
        .stdout(predicate::str::contains("Chat saved to:"))
        .stderr(predicate::str::contains("Unknown command: /bogus"));

    verion(&temp_dir, &server.uri())
        .args(["history", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("What is a tort?"))
        .stdout(predicate::str::contains("Short answer"));
}

#[tokio::test]
async fn test_chat_sends_queued_file_on_blank_line() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lease.txt"), "Rent is due monthly.").unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/invoke"))
        .and(body_string_contains("Please analyze this document"))
        .and(body_string_contains("Rent is due monthly."))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": "A monthly lease." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    verion(&temp_dir, &server.uri())
        .arg("chat")
        .write_stdin("/attach lease.txt\n\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Attached lease.txt"))
        .stdout(predicate::str::contains("Uploaded 1 file(s)"))
        .stdout(predicate::str::contains("[file] lease.txt"))
        .stdout(predicate::str::contains("A monthly lease."));
}

#[test]
fn test_chat_reports_unsent_files_on_quit() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("nda.txt"), "Confidential.").unwrap();

    verion(&temp_dir, "http://127.0.0.1:9")
        .arg("chat")
        .write_stdin("/attach nda.txt\n/quit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Discarded 1 queued file(s)"))
        .stdout(predicate::str::contains("Chat saved to:").not());
}
