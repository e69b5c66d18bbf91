//! Black-box tests of the HTTP surface over an in-memory store.

use registration_app::MemoryStore;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_health_returns_ok() {
    let server = common::start_server(MemoryStore::new()).await;

    let res = common::client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"), "{}", content_type);
    assert_eq!(res.text().await.unwrap(), r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_health_ok_when_database_down() {
    let server = common::start_server(MemoryStore::offline()).await;

    let res = common::client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_form_before_submission() {
    let server = common::start_server(MemoryStore::new()).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "{}", content_type);

    let body = res.text().await.unwrap();
    assert!(body.contains("<form method=\"post\""));
    assert!(!body.contains("Thank you"));
    assert!(server.store.rows().await.is_empty());
}

#[tokio::test]
async fn test_submission_is_stored_and_confirmed() {
    let server = common::start_server(MemoryStore::new()).await;

    let res = common::client()
        .post(server.url("/"))
        .form(&[("full_name", "Alice"), ("email", "alice@example.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("Alice"));
    assert!(body.contains("Your registration has been received"));

    let rows = server.store.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].full_name, "Alice");
    assert_eq!(rows[0].email, "alice@example.com");
}

#[tokio::test]
async fn test_each_submission_adds_one_row() {
    let server = common::start_server(MemoryStore::new()).await;
    let client = common::client();

    for (name, email) in [
        ("Alice", "alice@example.com"),
        ("Bob", "bob@example.com"),
        ("Carol", "carol@example.com"),
    ] {
        let before = server.store.rows().await;

        let res = client
            .post(server.url("/"))
            .form(&[("full_name", name), ("email", email)])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let after = server.store.rows().await;
        assert_eq!(after.len(), before.len() + 1);
        let added = after.last().unwrap();
        assert_eq!(added.full_name, name);
        assert_eq!(added.email, email);
        assert!(before.iter().all(|row| row.id < added.id));
    }
}

#[tokio::test]
async fn test_missing_email_is_accepted() {
    let server = common::start_server(MemoryStore::new()).await;

    let res = common::client()
        .post(server.url("/"))
        .form(&[("full_name", "Dave")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let rows = server.store.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].full_name, "Dave");
    assert_eq!(rows[0].email, "");
}

#[tokio::test]
async fn test_submission_escapes_name() {
    let server = common::start_server(MemoryStore::new()).await;

    let res = common::client()
        .post(server.url("/"))
        .form(&[("full_name", "<b>Eve</b>"), ("email", "eve@example.com")])
        .send()
        .await
        .unwrap();

    let body = res.text().await.unwrap();
    assert!(!body.contains("<b>"));
    assert!(body.contains("&lt;b&gt;Eve&lt;&#x2f;b&gt;"));
    assert_eq!(server.store.rows().await[0].full_name, "<b>Eve</b>");
}

#[tokio::test]
async fn test_repeated_field_keeps_first_value() {
    let server = common::start_server(MemoryStore::new()).await;

    let res = common::client()
        .post(server.url("/"))
        .form(&[
            ("full_name", "Frank"),
            ("full_name", "Grace"),
            ("email", "frank@example.com"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("Thank you, Frank!"));
    let rows = server.store.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].full_name, "Frank");
    assert_eq!(rows[0].email, "frank@example.com");
}

#[tokio::test]
async fn test_submission_fails_when_database_down() {
    let server = common::start_server(MemoryStore::offline()).await;

    let res = common::client()
        .post(server.url("/"))
        .form(&[("full_name", "Alice"), ("email", "alice@example.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_id_on_every_response() {
    let server = common::start_server(MemoryStore::new()).await;
    let client = common::client();

    let generated = client.get(server.url("/")).send().await.unwrap();
    let id = generated.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok(), "{}", id);

    let supplied = client
        .get(server.url("/health"))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(supplied.headers()["x-request-id"], "req-42");
}
