mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use devmarket_api::auth::issue_token;
use devmarket_api::config::SecurityConfig;

// The spawned server runs with development defaults; tokens minted with the
// same secret are accepted, everything else must be rejected.
fn dev_security() -> SecurityConfig {
    SecurityConfig {
        jwt_secret: "devmarket-dev-secret".to_string(),
        jwt_expiry_hours: 100,
    }
}

#[tokio::test]
async fn gated_endpoint_rejects_missing_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["msg"], "No token, authorization denied");
    Ok(())
}

#[tokio::test]
async fn gated_endpoint_rejects_garbage_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/profile/me", server.base_url))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["msg"], "Token is not valid");
    Ok(())
}

#[tokio::test]
async fn gated_endpoint_rejects_token_signed_elsewhere() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let foreign = SecurityConfig {
        jwt_secret: "some-other-secret".to_string(),
        jwt_expiry_hours: 100,
    };
    let token = issue_token(Uuid::new_v4(), &foreign).unwrap();

    let res = client
        .get(format!("{}/api/users", server.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn registration_collects_all_field_errors() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/users", server.base_url))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    let errors = body["errors"].as_array().expect("errors array");
    let params: Vec<&str> = errors
        .iter()
        .filter_map(|e| e["param"].as_str())
        .collect();
    assert_eq!(params, vec!["name", "email", "password"]);
    Ok(())
}

#[tokio::test]
async fn experience_requires_title() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // A validly-signed token gets past the guard; validation runs before any
    // store access, so this works without a database.
    let token = issue_token(Uuid::new_v4(), &dev_security()).unwrap();

    let res = client
        .put(format!("{}/api/profile/exp", server.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "company": "Acme", "from": "2020-01-01" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    let errors = body["errors"].as_array().expect("errors array");
    assert!(
        errors
            .iter()
            .any(|e| e["param"] == "title" && e["msg"] == "Title is required"),
        "no title error in {:?}",
        errors
    );
    Ok(())
}
