mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn booking_takes_the_flight_price() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.register("guest@example.com").await?;
    let flight_id = app.create_flight(&token, "2025-03-01 07:00:00", "DPS").await?;

    let res = app.post("/booking", Some(&token), json!({ "flight_id": flight_id })).await?;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    let booking = res.body["data"].clone();
    assert_eq!(booking["flight_id"], flight_id);
    assert_eq!(booking["total_price"], 1250000.5);
    assert_eq!(booking["payment_status"], "pending");
    assert!(booking["reference_code"].as_str().is_some_and(|r| r.starts_with("BK-")));
    assert!(booking["cancellation_date"].is_null());

    let res = app.get(&format!("/booking/{}", booking["id"]), Some(&token)).await?;
    assert_eq!(res.body["data"], booking);

    let res = app.get("/booking", Some(&token)).await?;
    assert_eq!(res.body["data"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn booking_an_unknown_flight_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.register("guest@example.com").await?;

    let res = app.post("/booking", Some(&token), json!({ "flight_id": 77 })).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Flight not found");

    let res = app.post("/booking", Some(&token), json!({ "flight_id": "seven" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["errors"]["flight_id"][0], "The flight id field must be an integer.");

    let res = app.get("/booking", Some(&token)).await?;
    assert_eq!(res.body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn payment_status_updates_and_validation() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.register("guest@example.com").await?;
    let flight_id = app.create_flight(&token, "2025-03-01 07:00:00", "DPS").await?;
    let res = app.post("/booking", Some(&token), json!({ "flight_id": flight_id })).await?;
    let uri = format!("/booking/{}", res.body["data"]["id"]);

    let res = app.put(&uri, Some(&token), json!({ "payment_status": "completed" })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["payment_status"], "completed");

    let res = app.put(&uri, Some(&token), json!({ "payment_status": "refunded" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["errors"]["payment_status"][0], "The selected payment status is invalid.");

    let res = app.delete(&uri, Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.get(&uri, Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn passengers_belong_to_the_booking_owner() -> Result<()> {
    let app = TestApp::spawn().await?;
    let alice = app.register("alice@example.com").await?;
    let mallory = app.register("mallory@example.com").await?;
    let flight_id = app.create_flight(&alice, "2025-03-01 07:00:00", "DPS").await?;
    let res = app.post("/booking", Some(&alice), json!({ "flight_id": flight_id })).await?;
    let booking_id = res.body["data"]["id"].as_i64().unwrap_or_default();
    let base = format!("/booking/{}/passenger", booking_id);

    let res = app
        .post(
            &base,
            Some(&alice),
            json!({
                "name": "Alice",
                "gender": "female",
                "seat_number": "12A",
                "date_of_birth": "1990-04-02",
                "passport_number": null,
            }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["data"]["booking_id"], booking_id);
    assert_eq!(res.body["data"]["date_of_birth"], "1990-04-02");
    assert!(res.body["data"]["passport_number"].is_null());
    let passenger_uri = format!("{}/{}", base, res.body["data"]["id"]);

    let res = app
        .post(&base, Some(&mallory), json!({ "name": "M", "gender": "male", "seat_number": "1A" }))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Booking not found");

    let res = app.get(&passenger_uri, Some(&mallory)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app
        .put(
            &passenger_uri,
            Some(&alice),
            json!({ "name": "Alice B", "gender": "female", "seat_number": "14C", "passport_number": "X1234567" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["data"]["seat_number"], "14C");
    assert_eq!(res.body["data"]["passport_number"], "X1234567");
    assert_eq!(res.body["data"]["date_of_birth"], "1990-04-02");

    let res = app.get(&base, Some(&alice)).await?;
    assert_eq!(res.body["data"].as_array().map(Vec::len), Some(1));

    let res = app.delete(&passenger_uri, Some(&alice)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.get(&passenger_uri, Some(&alice)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Passenger not found");
    Ok(())
}

#[tokio::test]
async fn passenger_fields_are_validated() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.register("guest@example.com").await?;
    let flight_id = app.create_flight(&token, "2025-03-01 07:00:00", "DPS").await?;
    app.post("/booking", Some(&token), json!({ "flight_id": flight_id })).await?;

    let res = app
        .post(
            "/booking/1/passenger",
            Some(&token),
            json!({ "name": "Kid", "gender": "other", "seat_number": "12345678901", "date_of_birth": "soon" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let errors = res.body["errors"].as_object().cloned().unwrap_or_default();
    let mut fields: Vec<&str> = errors.keys().map(String::as_str).collect();
    fields.sort();
    assert_eq!(fields, vec!["date_of_birth", "gender", "seat_number"]);
    Ok(())
}

#[tokio::test]
async fn blank_payment_status_defaults_to_pending() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.register("guest@example.com").await?;
    let flight_id = app.create_flight(&token, "2025-03-01 07:00:00", "DPS").await?;

    let res = app
        .post("/booking", Some(&token), json!({ "flight_id": flight_id, "payment_status": "" }))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["data"]["payment_status"], "pending");
    Ok(())
}
