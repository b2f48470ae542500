#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use travel_api::database::DatabaseManager;
use travel_api::{app, AppState};

/// Router over a private in-memory database, driven with `oneshot`
pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let pool = DatabaseManager::connect_in_memory()
            .await
            .context("failed to open in-memory database")?;
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to migrate in-memory database")?;

        Ok(Self {
            router: app(AppState::new(pool)),
        })
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.raw(request).await
    }

    pub async fn raw(&self, request: Request<Body>) -> Result<TestResponse> {
        let uri = request.uri().to_string();
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body for {}", uri))?
        };

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Register `email` with a fixed password and return the issued token
    pub async fn register(&self, email: &str) -> Result<String> {
        let res = self
            .post(
                "/register",
                None,
                json!({
                    "name": "Test User",
                    "email": email,
                    "password": "password123",
                    "password_confirmation": "password123",
                }),
            )
            .await?;

        anyhow::ensure!(res.status == StatusCode::CREATED, "register failed: {}", res.body);
        res.body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("register response has no token")
    }

    /// Create a flight through the API and return its id
    pub async fn create_flight(&self, token: &str, departure_time: &str, destination: &str) -> Result<i64> {
        let res = self.post("/flight", Some(token), flight_payload(departure_time, destination)).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "flight create failed: {}", res.body);
        res.body["data"]["id"].as_i64().context("flight response has no id")
    }
}

pub fn flight_payload(departure_time: &str, destination: &str) -> Value {
    json!({
        "flight_number": "GA-404",
        "airline": "Garuda",
        "origin": "CGK",
        "destination": destination,
        "departure_time": departure_time,
        "arrival_time": "2025-12-31 23:00:00",
        "price": 1250000.5,
        "seats_available": 120,
    })
}
