//! Integration tests against a running server.
//!
//! Start the server with a fresh database, then run:
//!   cargo test -- --ignored

mod api_tests;
mod reservation_tests;

use reqwest::Client;
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Log in and return a bearer token
pub async fn login(client: &Client, login: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "login": login, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success(), "login failed for {}", login);
    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to get an admin token (requires the seeded admin account)
pub async fn admin_token(client: &Client) -> String {
    login(client, "admin", "admin").await
}

/// Create a student account with a unique login and return (id, token)
pub async fn create_student(client: &Client, admin_token: &str) -> (i64, String) {
    let suffix = chrono::Utc::now().timestamp_micros();
    let student_login = format!("student{}", suffix);

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "login": student_login,
            "password": "password123",
            "account_type": "student"
        }))
        .send()
        .await
        .expect("Failed to create student");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse user response");
    let id = body["id"].as_i64().expect("No user id");

    let token = login(client, &student_login, "password123").await;
    (id, token)
}

/// Create an independent seat with a unique number and return its id
pub async fn create_independent_seat(client: &Client, admin_token: &str) -> i64 {
    let suffix = chrono::Utc::now().timestamp_micros();

    let response = client
        .post(format!("{}/seats", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "seat_number": format!("T{}", suffix % 1_000_000_000),
            "kind": "independent",
            "location": "test wing"
        }))
        .send()
        .await
        .expect("Failed to create seat");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse seat response");
    body["id"].as_i64().expect("No seat id")
}
