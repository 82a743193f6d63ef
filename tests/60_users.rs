mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn user_management_is_admin_gated() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, _) = common::register_user(&server.base_url).await?;

    // Listing users is admin-only
    let res = client
        .get(format!("{}/api/users", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin_token = common::ensure_admin_token(&server.base_url).await?;
    let res = client
        .get(format!("{}/api/users", server.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    for user in body["data"].as_array().expect("data") {
        assert!(
            user.get("password").is_none(),
            "password leaked in listing: {}",
            user
        );
    }

    Ok(())
}

#[tokio::test]
async fn users_see_only_their_own_account() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, user) = common::register_user(&server.base_url).await?;
    let user_id = user["id"].as_i64().expect("id");
    let (other_token, _) = common::register_user(&server.base_url).await?;

    let res = client
        .get(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert!(body.get("password").is_none());

    let res = client
        .get(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Self-promotion to admin is refused
    let res = client
        .put(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .json(&json!({ "is_admin": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Changing one's own email is fine
    let new_email = format!("{}@example.com", common::unique("changed"));
    let res = client
        .put(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .json(&json!({ "email": new_email }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["email"], json!(new_email));

    Ok(())
}

#[tokio::test]
async fn admin_creates_and_removes_accounts() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let admin_token = common::ensure_admin_token(&server.base_url).await?;

    let username = common::unique("staff");
    let res = client
        .post(format!("{}/api/users", server.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "integration-pw",
            "is_admin": false
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await?;
    let user_id = created["id"].as_i64().expect("id");

    let res = client
        .delete(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/users/{}", server.base_url, user_id))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
