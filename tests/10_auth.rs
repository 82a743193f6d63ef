mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_login_me_round_trip() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let username = common::unique("user");
    let email = format!("{}@example.com", username);

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "username": username, "email": email, "password": "integration-pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = res.json().await?;
    let token = body["token"].as_str().expect("token");
    assert_eq!(body["user"]["username"], json!(username));
    assert!(
        body["user"].get("password").is_none(),
        "password must never be serialized: {}",
        body
    );

    // Login with the email key as well
    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "integration-pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let me: serde_json::Value = res.json().await?;
    assert_eq!(me["username"], json!(username));
    assert!(me.get("password").is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_username_conflicts_without_partial_state() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let username = common::unique("dup");
    let payload = json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": "integration-pw"
    });

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The original account still works
    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "username": username, "password": "integration-pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn bad_credentials_and_missing_token_are_rejected() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_, user) = common::register_user(&server.base_url).await?;
    let username = user["username"].as_str().expect("username");

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "username": username, "password": "wrong-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .bearer_auth("not-a-real-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn invalid_registration_reports_field_errors() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "username": "x", "email": "nope", "password": "short" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await?;
    assert!(body["field_errors"]["username"].is_string(), "{}", body);
    assert!(body["field_errors"]["email"].is_string(), "{}", body);
    assert!(body["field_errors"]["password"].is_string(), "{}", body);

    Ok(())
}
