mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn category_crud_and_dependency_guard() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let admin_token = common::ensure_admin_token(&server.base_url).await?;

    let name = common::unique("Films");
    let res = client
        .post(format!("{}/api/categories", server.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let category: serde_json::Value = res.json().await?;
    let category_id = category["id"].as_i64().expect("id");
    assert_eq!(category["name"], json!(name));
    // Slug derived from the name, underscores collapsed to hyphens
    assert!(category["slug"].as_str().expect("slug").starts_with("films-"));

    // Create-then-fetch returns the same payload
    let res = client
        .get(format!("{}/api/categories/{}", server.base_url, category_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await?;
    assert_eq!(fetched["name"], category["name"]);
    assert_eq!(fetched["slug"], category["slug"]);

    // Hang a subcategory off it
    let sub_name = common::unique("Shorts");
    let res = client
        .post(format!("{}/api/subcategories", server.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({ "name": sub_name, "category_id": category_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let subcategory: serde_json::Value = res.json().await?;
    let subcategory_id = subcategory["id"].as_i64().expect("id");

    // Deleting the parent is refused while the subcategory exists
    let res = client
        .delete(format!("{}/api/categories/{}", server.base_url, category_id))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .get(format!("{}/api/categories/{}", server.base_url, category_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK, "row must survive a refused delete");

    // Remove the subcategory, then the category deletes cleanly
    let res = client
        .delete(format!(
            "{}/api/subcategories/{}",
            server.base_url, subcategory_id
        ))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .delete(format!("{}/api/categories/{}", server.base_url, category_id))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/categories/{}", server.base_url, category_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn category_mutation_requires_admin() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Anonymous
    let res = client
        .post(format!("{}/api/categories", server.base_url))
        .json(&json!({ "name": "Nope" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Authenticated but not admin
    let (token, _) = common::register_user(&server.base_url).await?;
    let res = client
        .post(format!("{}/api/categories", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Nope" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn duplicate_slug_conflicts() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let admin_token = common::ensure_admin_token(&server.base_url).await?;

    let slug = common::unique("slug").replace('_', "-");
    let payload = json!({ "name": "Twice", "slug": slug });

    let res = client
        .post(format!("{}/api/categories", server.base_url))
        .bearer_auth(&admin_token)
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/api/categories", server.base_url))
        .bearer_auth(&admin_token)
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn subcategories_filter_by_category() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let admin_token = common::ensure_admin_token(&server.base_url).await?;

    let res = client
        .post(format!("{}/api/categories", server.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({ "name": common::unique("Parent") }))
        .send()
        .await?;
    let category: serde_json::Value = res.json().await?;
    let category_id = category["id"].as_i64().expect("id");

    for suffix in ["a", "b"] {
        let res = client
            .post(format!("{}/api/subcategories", server.base_url))
            .bearer_auth(&admin_token)
            .json(&json!({
                "name": common::unique(suffix),
                "category_id": category_id
            }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!(
            "{}/api/subcategories?category_id={}",
            server.base_url, category_id
        ))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["data"].as_array().expect("data").len(), 2);

    Ok(())
}
