// tests/quiz_flow_tests.rs

use quiz_backend::{
    config::Config,
    models::{
        group::GroupRegistry,
        question::{Catalog, Question},
    },
    routes,
    state::AppState,
};
use std::collections::BTreeMap;
use std::sync::Arc;

fn test_catalog() -> Catalog {
    Catalog::new(vec![
        Question {
            id: 1,
            question: "Pick the letter B".to_string(),
            choices: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            answer_index: 1,
            explanation: Some("B is the second letter".to_string()),
        },
        Question {
            id: 2,
            question: "Pick the word Yes".to_string(),
            choices: vec!["Yes".to_string(), "No".to_string()],
            answer_index: 0,
            explanation: None,
        },
    ])
    .expect("test catalog must be valid")
}

fn test_groups() -> GroupRegistry {
    let mut groups = BTreeMap::new();
    groups.insert("solo".to_string(), vec![1]);
    groups.insert("pair".to_string(), vec![1, 2]);
    GroupRegistry::new(groups)
}

/// Helper function to spawn the app on a random port for testing.
/// Runs without a database: persistence degrades to no-ops and the
/// stats endpoints answer with a storage error, so no external services
/// are needed. Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let config = Config {
        secret_key: "integration-test-secret-key-0123456789".to_string(),
        database_url: None,
        rust_log: "error".to_string(),
        port: 0,
        questions_path: "questions.json".to_string(),
        qr_base_url: "http://localhost:3000".to_string(),
        qr_output_dir: "static/qr".to_string(),
    };

    let state = AppState {
        catalog: Arc::new(test_catalog()),
        groups: Arc::new(test_groups()),
        pool: None,
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Client with a cookie store so the session survives redirects.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
async fn home_shows_total_question_count() {
    let address = spawn_app().await;

    let response = client()
        .get(&address)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("2 questions"));
}

#[tokio::test]
async fn unregistered_group_landing_is_404() {
    let address = spawn_app().await;

    let response = client()
        .get(&format!("{}/g/flutes", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid group"));
}

#[tokio::test]
async fn qr_png_for_unregistered_group_is_404() {
    let address = spawn_app().await;

    let response = client()
        .get(&format!("{}/qr/flutes.png", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn qr_png_for_registered_group_is_a_png() {
    let address = spawn_app().await;

    let response = client()
        .get(&format!("{}/qr/solo.png", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
    let bytes = response.bytes().await.unwrap();
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn qr_page_shows_the_encoded_link() {
    let address = spawn_app().await;

    let response = client()
        .get(&format!("{}/qr/solo", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("/qr/solo.png"));
    assert!(body.contains("/g/solo"));
}

#[tokio::test]
async fn stats_api_validates_group_then_storage() {
    let address = spawn_app().await;
    let client = client();

    // Unknown group wins over missing storage.
    let response = client
        .get(&format!("{}/api/stats/flutes", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);

    // Known group without a configured store fails loudly.
    let response = client
        .get(&format!("{}/api/stats/solo", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Storage not configured");
}

#[tokio::test]
async fn stats_page_fails_loudly_without_storage() {
    let address = spawn_app().await;

    let response = client()
        .get(&format!("{}/stats/solo", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn quiz_without_session_redirects_home() {
    let address = spawn_app().await;

    let response = client()
        .get(&format!("{}/quiz", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.url().path(), "/");
}

#[tokio::test]
async fn correct_answer_flow_scores_one() {
    let address = spawn_app().await;
    let client = client();

    // Start the single-question group; redirects land on the quiz page.
    let response = client
        .post(&format!("{}/g/solo/start", address))
        .send()
        .await
        .expect("Failed to start");
    assert_eq!(response.url().path(), "/quiz");
    let body = response.text().await.unwrap();
    assert!(body.contains("Question 1 of 1"));
    assert!(body.contains("Pick the letter B"));

    // Correct answer: feedback shown, score becomes 1.
    let response = client
        .post(&format!("{}/answer", address))
        .form(&[("choice", "1")])
        .send()
        .await
        .expect("Failed to answer");
    let body = response.text().await.unwrap();
    assert!(body.contains("Correct!"));

    // Advance past the last question; quiz page forwards to the result.
    let response = client
        .post(&format!("{}/next", address))
        .send()
        .await
        .expect("Failed to advance");
    assert_eq!(response.url().path(), "/result");
    let body = response.text().await.unwrap();
    assert!(body.contains("Score: 1 of 1"));
    assert!(body.contains("No missed questions"));
}

#[tokio::test]
async fn wrong_answer_flow_reports_the_miss() {
    let address = spawn_app().await;
    let client = client();

    client
        .post(&format!("{}/g/solo/start", address))
        .send()
        .await
        .expect("Failed to start");

    let response = client
        .post(&format!("{}/answer", address))
        .form(&[("choice", "0")])
        .send()
        .await
        .expect("Failed to answer");
    let body = response.text().await.unwrap();
    assert!(body.contains("Wrong. Correct answer: B"));
    assert!(body.contains("B is the second letter"));

    let response = client
        .post(&format!("{}/next", address))
        .send()
        .await
        .expect("Failed to advance");
    let body = response.text().await.unwrap();
    assert!(body.contains("Score: 0 of 1"));
    assert!(body.contains("Missed questions"));
    assert!(body.contains("Pick the letter B"));
}

#[tokio::test]
async fn missing_choice_keeps_the_question_in_place() {
    let address = spawn_app().await;
    let client = client();

    client
        .post(&format!("{}/g/solo/start", address))
        .send()
        .await
        .expect("Failed to start");

    // No choice field at all, as an unchecked radio group submits.
    let response = client
        .post(&format!("{}/answer", address))
        .form(&Vec::<(&str, &str)>::new())
        .send()
        .await
        .expect("Failed to answer");
    let body = response.text().await.unwrap();
    assert!(body.contains("Select an answer"));
    assert!(body.contains("Question 1 of 1"));

    // The message is one-shot; the question itself has not moved.
    let response = client
        .get(&format!("{}/quiz", address))
        .send()
        .await
        .expect("Failed to reload");
    let body = response.text().await.unwrap();
    assert!(!body.contains("Select an answer"));
    assert!(body.contains("Question 1 of 1"));
}

#[tokio::test]
async fn full_catalog_start_covers_every_question() {
    let address = spawn_app().await;
    let client = client();

    let response = client
        .post(&format!("{}/start", address))
        .send()
        .await
        .expect("Failed to start");
    assert_eq!(response.url().path(), "/quiz");
    let body = response.text().await.unwrap();
    assert!(body.contains("Question 1 of 2"));
}

#[tokio::test]
async fn reset_clears_the_session() {
    let address = spawn_app().await;
    let client = client();

    client
        .post(&format!("{}/g/pair/start", address))
        .send()
        .await
        .expect("Failed to start");

    let response = client
        .post(&format!("{}/reset", address))
        .send()
        .await
        .expect("Failed to reset");
    assert_eq!(response.url().path(), "/");

    let response = client
        .get(&format!("{}/quiz", address))
        .send()
        .await
        .expect("Failed to reload");
    assert_eq!(response.url().path(), "/");
}

#[tokio::test]
async fn group_start_validates_the_code() {
    let address = spawn_app().await;

    let response = client()
        .post(&format!("{}/g/flutes/start", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}
