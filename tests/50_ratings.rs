mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn rating_upsert_replaces_score() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let admin_token = common::ensure_admin_token(&server.base_url).await?;

    let res = client
        .post(format!("{}/api/videos", server.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({
            "title": common::unique("Rateable"),
            "youtube_id": common::unique_video_id()
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let video: serde_json::Value = res.json().await?;
    let video_id = video["id"].as_i64().expect("id");

    let (token, _) = common::register_user(&server.base_url).await?;

    let res = client
        .post(format!("{}/api/ratings", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "video_id": video_id, "score": 4 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["user_rating"], json!(4));
    assert_eq!(body["rating_count"], json!(1));
    assert_eq!(body["average_rating"].as_f64(), Some(4.0));

    // Second submission replaces, never duplicates
    let res = client
        .post(format!("{}/api/ratings", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "video_id": video_id, "score": 2 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["user_rating"], json!(2));
    assert_eq!(body["rating_count"], json!(1), "upsert must not add a row");
    assert_eq!(body["average_rating"].as_f64(), Some(2.0));

    // A second voter moves the average
    let (other_token, _) = common::register_user(&server.base_url).await?;
    let res = client
        .post(format!("{}/api/ratings", server.base_url))
        .bearer_auth(&other_token)
        .json(&json!({ "video_id": video_id, "score": 5 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["rating_count"], json!(2));
    assert_eq!(body["average_rating"].as_f64(), Some(3.5));

    // Read endpoint shows the caller's own score
    let res = client
        .get(format!(
            "{}/api/ratings?video_id={}",
            server.base_url, video_id
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["user_rating"], json!(2));

    Ok(())
}

#[tokio::test]
async fn rating_validation_and_auth() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/ratings?video_id=1", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let (token, _) = common::register_user(&server.base_url).await?;

    let res = client
        .post(format!("{}/api/ratings", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "video_id": 1, "score": 9 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert!(body["field_errors"]["score"].is_string(), "{}", body);

    let res = client
        .get(format!("{}/api/ratings", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "video_id is required");

    Ok(())
}
