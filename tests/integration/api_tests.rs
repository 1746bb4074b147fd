//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

use crate::{admin_token, create_student, BASE_URL};

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reaches_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["login"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = admin_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["login"], "admin");
    assert_eq!(body["account_type"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_request_rejected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/users", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_student_cannot_manage_users() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;

    let response = client
        .get(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_create_user_rejects_short_password() {
    let client = Client::new();
    let admin = admin_token(&client).await;

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "login": "shortpw",
            "password": "short",
            "account_type": "student"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_seat_crud() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let suffix = chrono::Utc::now().timestamp_micros() % 1_000_000_000;

    // Create
    let response = client
        .post(format!("{}/seats", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "seat_number": format!("C{}", suffix),
            "kind": "independent",
            "location": "second floor"
        }))
        .send()
        .await
        .expect("Failed to create seat");
    assert_eq!(response.status(), 201);

    let seat: Value = response.json().await.expect("Failed to parse seat");
    let seat_id = seat["id"].as_i64().expect("No seat id");
    assert_eq!(seat["is_available"], true);

    // Update
    let response = client
        .put(format!("{}/seats/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "location": "third floor" }))
        .send()
        .await
        .expect("Failed to update seat");
    assert!(response.status().is_success());

    let seat: Value = response.json().await.expect("Failed to parse seat");
    assert_eq!(seat["location"], "third floor");

    // Delete
    let response = client
        .delete(format!("{}/seats/{}", BASE_URL, seat_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to delete seat");
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
async fn test_borrow_request_lifecycle() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;
    let suffix = chrono::Utc::now().timestamp_micros();

    // Register a book with a single copy
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "title": format!("Test Book {}", suffix),
            "author": "Nobody",
            "total_copies": 1
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let book: Value = response.json().await.expect("Failed to parse book");
    let book_id = book["id"].as_i64().expect("No book id");
    assert_eq!(book["available_copies"], 1);

    // Student requests it
    let response = client
        .post(format!("{}/books/{}/request", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to request book");
    assert_eq!(response.status(), 201);

    let request: Value = response.json().await.expect("Failed to parse request");
    let request_id = request["id"].as_i64().expect("No request id");
    assert_eq!(request["status"], "pending");

    // A duplicate open request is rejected
    let response = client
        .post(format!("{}/books/{}/request", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to send duplicate request");
    assert_eq!(response.status(), 409);

    // Staff approves; the available copy is consumed
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .expect("Failed to approve request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to fetch book");
    let book: Value = response.json().await.expect("Failed to parse book");
    assert_eq!(book["available_copies"], 0);

    // Return; the copy comes back
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "status": "returned" }))
        .send()
        .await
        .expect("Failed to return book");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to fetch book");
    let book: Value = response.json().await.expect("Failed to parse book");
    assert_eq!(book["available_copies"], 1);
}

#[tokio::test]
#[ignore]
async fn test_question_and_answer_flow() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, student) = create_student(&client, &admin).await;

    let response = client
        .post(format!("{}/questions", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .json(&json!({
            "title": "Are group rooms bookable on weekends?",
            "body": "The schedule page only shows weekdays."
        }))
        .send()
        .await
        .expect("Failed to create question");
    assert_eq!(response.status(), 201);

    let question: Value = response.json().await.expect("Failed to parse question");
    let question_id = question["id"].as_i64().expect("No question id");

    let response = client
        .post(format!("{}/questions/{}/answers", BASE_URL, question_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "body": "Yes, 10am to 6pm." }))
        .send()
        .await
        .expect("Failed to post answer");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/questions/{}", BASE_URL, question_id))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to fetch question");
    let detail: Value = response.json().await.expect("Failed to parse detail");
    assert_eq!(detail["answers"].as_array().map(Vec::len), Some(1));
}
