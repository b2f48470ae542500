mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn trip_checklist_end_to_end() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.register("traveller@example.com").await?;

    let res = app
        .post("/login", None, json!({ "email": "traveller@example.com", "password": "password123" }))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let token = res.body["data"]["token"].as_str().unwrap_or_default().to_string();

    let res = app.post("/checklist", Some(&token), json!({ "name": "Trip" })).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["data"]["id"], 1);
    assert_eq!(res.body["data"]["name"], "Trip");

    let res = app
        .post("/checklist/1/item", Some(&token), json!({ "item_name": "Passport" }))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["data"]["is_completed"], false);
    assert_eq!(res.body["data"]["checklist_id"], 1);

    let res = app
        .put("/checklist/1/item/1", Some(&token), json!({ "is_completed": true }))
        .await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["data"]["is_completed"], true);

    let res = app.delete("/checklist/1", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["name"], "Trip");

    let res = app.get("/checklist/1/item/1", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn items_can_be_renamed_listed_and_removed() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.register("owner@example.com").await?;

    app.post("/checklist", Some(&token), json!({ "name": "Beach" })).await?;
    app.post("/checklist/1/item", Some(&token), json!({ "item_name": "Towel" })).await?;
    app.post("/checklist/1/item", Some(&token), json!({ "item_name": "Sunscreen" })).await?;

    let res = app
        .put("/checklist/1/item/rename/1", Some(&token), json!({ "item_name": "Beach towel" }))
        .await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["data"]["item_name"], "Beach towel");
    assert_eq!(res.body["data"]["is_completed"], false);

    let res = app.get("/checklist/1/item", Some(&token)).await?;
    let names: Vec<&str> = res.body["data"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["item_name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["Beach towel", "Sunscreen"]);

    let res = app.get("/checklist/1/item/2", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["item_name"], "Sunscreen");

    let res = app.delete("/checklist/1/item/2", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.get("/checklist/1/item/2", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Checklist item not found");
    Ok(())
}

#[tokio::test]
async fn items_under_foreign_checklists_are_refused() -> Result<()> {
    let app = TestApp::spawn().await?;
    let alice = app.register("alice@example.com").await?;
    let mallory = app.register("mallory@example.com").await?;

    app.post("/checklist", Some(&alice), json!({ "name": "Private" })).await?;
    app.post("/checklist/1/item", Some(&alice), json!({ "item_name": "Keys" })).await?;

    let res = app
        .post("/checklist/1/item", Some(&mallory), json!({ "item_name": "Injected" }))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Checklist not found");

    let res = app
        .put("/checklist/1/item/1", Some(&mallory), json!({ "is_completed": true }))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.get("/checklist/1", Some(&mallory)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.get("/checklist/1/item", Some(&alice)).await?;
    let items = res.body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_name"], "Keys");
    assert_eq!(items[0]["is_completed"], false);
    Ok(())
}

#[tokio::test]
async fn item_status_must_be_boolean() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.register("owner@example.com").await?;
    app.post("/checklist", Some(&token), json!({ "name": "Trip" })).await?;
    app.post("/checklist/1/item", Some(&token), json!({ "item_name": "Passport" })).await?;

    let res = app
        .put("/checklist/1/item/1", Some(&token), json!({ "is_completed": "maybe" }))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["errors"]["is_completed"][0], "The is completed field must be true or false.");

    let res = app.put("/checklist/1/item/1", Some(&token), json!({})).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn checklist_rename_and_validation() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.register("owner@example.com").await?;
    app.post("/checklist", Some(&token), json!({ "name": "Trip" })).await?;

    let res = app.put("/checklist/1", Some(&token), json!({ "name": "Long trip" })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["name"], "Long trip");

    let res = app.post("/checklist", Some(&token), json!({ "name": "x".repeat(256) })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body["errors"]["name"][0],
        "The name field must not be greater than 255 characters."
    );
    Ok(())
}
