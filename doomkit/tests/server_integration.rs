//! Integration tests for the HTTP boundary.
//!
//! Starts a real `AssetServer` on an ephemeral port and drives it with
//! reqwest, checking status codes and JSON shapes of all three routes.
//!
//! Run with: `cargo test --test server_integration`

mod common;

use std::fs;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doomkit::{AssetServer, AssetService};

use common::{shareware_zip, test_config};

// ============================================================================
// Helper Functions
// ============================================================================

async fn start(temp: &TempDir, sources: &[String]) -> AssetServer {
    let service = AssetService::from_config(test_config(temp, sources)).unwrap();
    AssetServer::start("127.0.0.1:0".parse().unwrap(), Arc::new(service))
        .await
        .unwrap()
}

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    let body = response.text().await.unwrap();
    (status, serde_json::from_str(&body).unwrap())
}

async fn post_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::Client::new().post(url).send().await.unwrap();
    let status = response.status();
    let body = response.text().await.unwrap();
    (status, serde_json::from_str(&body).unwrap())
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_status_before_download() {
    let temp = TempDir::new().unwrap();
    let server = start(&temp, &[]).await;

    let (status, json) = get_json(&format!("{}/doom/status", server.url())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hasExe"], false);
    assert_eq!(json["hasWad"], false);
    assert_eq!(json["hasSetup"], false);
    assert!(json["doomDir"].as_str().unwrap().ends_with("doom"));
    assert_eq!(json["files"]["DOOM.EXE"], false);

    server.stop().await;
}

#[tokio::test]
async fn test_status_sees_manually_placed_files() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("doom");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("DOOM1.WAD"), b"wad").unwrap();
    let server = start(&temp, &[]).await;

    let (_, json) = get_json(&format!("{}/doom/status", server.url())).await;

    assert_eq!(json["hasWad"], true);
    assert_eq!(json["hasExe"], false);

    server.stop().await;
}

// ============================================================================
// Download
// ============================================================================

#[tokio::test]
async fn test_download_success_then_serve() {
    let mirror = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doom.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(shareware_zip()))
        .mount(&mirror)
        .await;

    let temp = TempDir::new().unwrap();
    let server = start(&temp, &[format!("{}/doom.zip", mirror.uri())]).await;

    let (status, json) = post_json(&format!("{}/doom/download", server.url())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        json["files"],
        serde_json::json!(["DOOM.EXE", "DOOM1.WAD", "SETUP.EXE"])
    );
    assert!(json["message"].as_str().unwrap().contains("DOOM1.WAD"));

    let (_, json) = get_json(&format!("{}/doom/status", server.url())).await;
    assert_eq!(json["hasExe"], true);
    assert_eq!(json["hasWad"], true);
    assert_eq!(json["hasSetup"], true);

    let response = reqwest::get(format!("{}/doom/files/DOOM1.WAD", server.url()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.content_length(), Some(9));
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"wad-bytes");

    server.stop().await;
}

#[tokio::test]
async fn test_download_failure_returns_500() {
    let temp = TempDir::new().unwrap();
    let server = start(&temp, &["http://127.0.0.1:9/doom.zip".to_string()]).await;

    let (status, json) = post_json(&format!("{}/doom/download", server.url())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(
        json["error"],
        "All download sources failed. Please use manual download."
    );

    server.stop().await;
}

// ============================================================================
// File serving
// ============================================================================

#[tokio::test]
async fn test_file_rejections() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("doom");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("DOOM.TXT"), b"text").unwrap();
    fs::write(temp.path().join("secret.wad"), b"secret").unwrap();
    let server = start(&temp, &[]).await;
    let base = server.url();

    for name in ["DOOM.TXT", "..%2Fsecret.wad", "..%2F..%2Fetc%2Fpasswd"] {
        let response = reqwest::get(format!("{base}/doom/files/{name}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{name}");
        assert_eq!(
            response.text().await.unwrap(),
            "Only DOOM game files are allowed"
        );
    }

    let response = reqwest::get(format!("{base}/doom/files/DOOM.EXE")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "File not found");

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_releases_port() {
    let temp = TempDir::new().unwrap();
    let server = start(&temp, &[]).await;
    let addr = server.addr();
    assert_ne!(server.port(), 0);

    server.stop().await;

    let rebound = tokio::net::TcpListener::bind(addr).await;
    assert!(rebound.is_ok());
}
