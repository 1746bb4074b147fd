//! Seat reservation lifecycle tests.
//!
//! These walk the reserve / remind / respond / auto-release cycle
//! against a running server, so they need the shortened intervals from
//! config/test.toml. Start the server with RUN_MODE=test, then run:
//!   cargo test -- --ignored

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use crate::{admin_token, create_independent_seat, create_student, BASE_URL};

// Must exceed hold_seconds + poll_seconds from config/test.toml, but
// leave room to respond before the response window expires
const REMINDER_WAIT: Duration = Duration::from_secs(4);
// Must exceed response_window_seconds + poll_seconds
const RELEASE_WAIT: Duration = Duration::from_secs(6);

async fn fetch_seat(client: &Client, token: &str, seat_id: i64) -> Value {
    let response = client
        .get(format!("{}/seats/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch seat");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse seat")
}

async fn pending_for(client: &Client, token: &str, seat_id: i64) -> Vec<Value> {
    let response = client
        .get(format!("{}/notifications/pending", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch pending notifications");
    assert!(response.status().is_success());

    let body: Vec<Value> = response.json().await.expect("Failed to parse notifications");
    body.into_iter()
        .filter(|n| n["seat_id"].as_i64() == Some(seat_id))
        .collect()
}

async fn reserve(client: &Client, token: &str, seat_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/reserve", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "seat_id": seat_id }))
        .send()
        .await
        .expect("Failed to send reserve request")
}

async fn respond(
    client: &Client,
    token: &str,
    notification_id: i64,
    response: &str,
) -> reqwest::Response {
    client
        .post(format!(
            "{}/notifications/{}/respond",
            BASE_URL, notification_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "response": response }))
        .send()
        .await
        .expect("Failed to send respond request")
}

#[tokio::test]
#[ignore]
async fn test_reserve_marks_seat_occupied() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (student_id, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    let response = reserve(&client, &student, seat_id).await;
    assert!(response.status().is_success());

    let seat = fetch_seat(&client, &student, seat_id).await;
    assert_eq!(seat["is_available"], false);
    assert_eq!(seat["reserved_by"].as_i64(), Some(student_id));
}

#[tokio::test]
#[ignore]
async fn test_reserve_occupied_seat_conflicts() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, first) = create_student(&client, &admin).await;
    let (_, second) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    assert!(reserve(&client, &first, seat_id).await.status().is_success());

    let response = reserve(&client, &second, seat_id).await;
    assert_eq!(response.status(), 409);

    // The body names the seat-unavailable condition, not a generic duplicate
    let body: Value = response.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "SeatUnavailable");
}

#[tokio::test]
#[ignore]
async fn test_reserved_seat_cannot_be_deleted() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    assert!(reserve(&client, &student, seat_id).await.status().is_success());

    let response = client
        .delete(format!("{}/seats/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 409);

    // Still there, still occupied
    let seat = fetch_seat(&client, &admin, seat_id).await;
    assert_eq!(seat["is_available"], false);
}

#[tokio::test]
#[ignore]
async fn test_free_seat_with_past_episodes_can_be_deleted() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    // Run a full episode so the seat has a notification trail
    assert!(reserve(&client, &student, seat_id).await.status().is_success());
    tokio::time::sleep(REMINDER_WAIT).await;
    let pending = pending_for(&client, &student, seat_id).await;
    let notification_id = pending[0]["id"].as_i64().expect("No notification id");
    assert!(respond(&client, &student, notification_id, "release")
        .await
        .status()
        .is_success());

    let response = client
        .delete(format!("{}/seats/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/seats/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to fetch seat");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_staff_cannot_reserve() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    assert_eq!(reserve(&client, &admin, seat_id).await.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_reminder_then_extend_starts_new_cycle() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    assert!(reserve(&client, &student, seat_id).await.status().is_success());
    assert!(pending_for(&client, &student, seat_id).await.is_empty());

    // Hold interval elapses; the worker posts the reminder
    tokio::time::sleep(REMINDER_WAIT).await;

    let pending = pending_for(&client, &student, seat_id).await;
    assert_eq!(pending.len(), 1);
    let notification_id = pending[0]["id"].as_i64().expect("No notification id");

    // Extend keeps the seat and closes the decision window
    let response = respond(&client, &student, notification_id, "extend").await;
    assert!(response.status().is_success());

    assert!(pending_for(&client, &student, seat_id).await.is_empty());
    let seat = fetch_seat(&client, &student, seat_id).await;
    assert_eq!(seat["is_available"], false);

    // A second cycle produces a fresh reminder after the extension hold
    tokio::time::sleep(RELEASE_WAIT).await;

    let pending = pending_for(&client, &student, seat_id).await;
    assert_eq!(pending.len(), 1);
    assert_ne!(pending[0]["id"].as_i64(), Some(notification_id));
}

#[tokio::test]
#[ignore]
async fn test_release_response_frees_seat() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    assert!(reserve(&client, &student, seat_id).await.status().is_success());
    tokio::time::sleep(REMINDER_WAIT).await;

    let pending = pending_for(&client, &student, seat_id).await;
    let notification_id = pending[0]["id"].as_i64().expect("No notification id");

    let response = respond(&client, &student, notification_id, "release").await;
    assert!(response.status().is_success());

    let seat = fetch_seat(&client, &student, seat_id).await;
    assert_eq!(seat["is_available"], true);
    assert!(seat["reserved_by"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_responding_twice_conflicts() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    assert!(reserve(&client, &student, seat_id).await.status().is_success());
    tokio::time::sleep(REMINDER_WAIT).await;

    let pending = pending_for(&client, &student, seat_id).await;
    let notification_id = pending[0]["id"].as_i64().expect("No notification id");

    assert!(respond(&client, &student, notification_id, "release")
        .await
        .status()
        .is_success());

    let second = respond(&client, &student, notification_id, "extend").await;
    assert_eq!(second.status(), 409);

    let body: Value = second.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "AlreadyActedUpon");
}

#[tokio::test]
#[ignore]
async fn test_unanswered_reminder_auto_releases() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    assert!(reserve(&client, &student, seat_id).await.status().is_success());

    // Reminder fires, then the response window expires unanswered
    tokio::time::sleep(REMINDER_WAIT).await;
    assert_eq!(pending_for(&client, &student, seat_id).await.len(), 1);
    tokio::time::sleep(RELEASE_WAIT).await;

    let seat = fetch_seat(&client, &student, seat_id).await;
    assert_eq!(seat["is_available"], true);

    // The decision window is closed and a release notice was posted
    assert!(pending_for(&client, &student, seat_id).await.is_empty());

    let response = client
        .get(format!("{}/notifications", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to fetch overview");
    let overview: Value = response.json().await.expect("Failed to parse overview");
    let releases = overview["recent_releases"]
        .as_array()
        .expect("No recent_releases");
    assert!(releases
        .iter()
        .any(|n| n["seat_id"].as_i64() == Some(seat_id)));
}

#[tokio::test]
#[ignore]
async fn test_respond_to_unknown_notification_is_404() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;

    assert_eq!(respond(&client, &student, 999_999_999, "extend").await.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_staff_release_frees_seat_immediately() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    assert!(reserve(&client, &student, seat_id).await.status().is_success());

    let response = client
        .put(format!("{}/releasebystaff/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send staff release");
    assert!(response.status().is_success());

    let seat: Value = response.json().await.expect("Failed to parse seat");
    assert_eq!(seat["is_available"], true);

    // Releasing an already-free seat is a conflict
    let response = client
        .put(format!("{}/releasebystaff/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send staff release");
    assert_eq!(response.status(), 409);

    // No stale reminder shows up after the cancelled cycle
    tokio::time::sleep(REMINDER_WAIT).await;
    assert!(pending_for(&client, &student, seat_id).await.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_students_cannot_release_by_staff() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let seat_id = create_independent_seat(&client, &admin).await;

    let response = client
        .put(format!("{}/releasebystaff/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to send staff release");
    assert_eq!(response.status(), 403);
}
