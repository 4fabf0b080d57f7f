//! Request/response normalization of the API client.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Method;
use serde_json::{Value, json};

use sportadm_client::{ApiClient, MemoryTokenStore, RequestBody, TokenStore};

async fn spawn(app: Router) -> String {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_against(base_url: &str, token: Option<&str>) -> ApiClient {
    let store = Arc::new(MemoryTokenStore::new());
    if let Some(t) = token {
        store.set(t);
    }
    ApiClient::new(base_url, store).unwrap()
}

async fn raw_get(client: &ApiClient, path: &str) -> sportadm_client::Result<Option<Value>> {
    let url = client.endpoint(&[path], &[]);
    client
        .request(Method::GET, url, RequestBody::None, HeaderMap::new())
        .await
}

#[tokio::test]
async fn attaches_bearer_when_store_holds_token() {
    let app = Router::new().route(
        "/echo",
        get(|headers: HeaderMap| async move {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            Json(json!({"authorization": auth}))
        }),
    );
    let base = spawn(app).await;

    let client = client_against(&base, Some("tok123"));
    let body = raw_get(&client, "echo").await.unwrap().unwrap();
    assert_eq!(body["authorization"], "Bearer tok123");

    let client = client_against(&base, None);
    let body = raw_get(&client, "echo").await.unwrap().unwrap();
    assert_eq!(body["authorization"], "");
}

#[tokio::test]
async fn caller_supplied_authorization_wins() {
    let app = Router::new().route(
        "/echo",
        get(|headers: HeaderMap| async move {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            Json(json!({"authorization": auth}))
        }),
    );
    let base = spawn(app).await;
    let client = client_against(&base, Some("stored"));

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
    let url = client.endpoint(&["echo"], &[]);
    let body = client
        .request(Method::GET, url, RequestBody::None, headers)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(body["authorization"], "Basic abc");
}

#[tokio::test]
async fn json_bodies_get_json_content_type_and_accept_is_always_set() {
    let app = Router::new().route(
        "/echo",
        post(|headers: HeaderMap, body: String| async move {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let accept = headers
                .get(header::ACCEPT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            Json(json!({"contentType": content_type, "accept": accept, "body": body}))
        }),
    );
    let base = spawn(app).await;
    let client = client_against(&base, None);

    let url = client.endpoint(&["echo"], &[]);
    let body = client
        .request(
            Method::POST,
            url,
            RequestBody::Json(json!({"a": 1})),
            HeaderMap::new(),
        )
        .await
        .unwrap()
        .unwrap();
    assert!(body["contentType"].as_str().unwrap().starts_with("application/json"));
    assert_eq!(body["accept"], "application/json");
    assert_eq!(body["body"], r#"{"a":1}"#);
}

#[tokio::test]
async fn multipart_forms_keep_their_own_content_type() {
    let app = Router::new().route(
        "/upload",
        post(|headers: HeaderMap| async move {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            Json(json!({"contentType": content_type, "authorization": auth}))
        }),
    );
    let base = spawn(app).await;
    let client = client_against(&base, Some("tok123"));

    let form = reqwest::multipart::Form::new().text("note", "hello");
    let url = client.endpoint(&["upload"], &[]);
    let body = client
        .request(Method::POST, url, RequestBody::Form(form), HeaderMap::new())
        .await
        .unwrap()
        .unwrap();
    let content_type = body["contentType"].as_str().unwrap();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "form bodies must not be forced to JSON, got {content_type}"
    );
    assert_eq!(body["authorization"], "Bearer tok123");
}

#[tokio::test]
async fn no_content_and_empty_bodies_normalize_to_none() {
    let app = Router::new()
        .route("/empty204", get(|| async { StatusCode::NO_CONTENT }))
        .route("/empty200", get(|| async { "" }));
    let base = spawn(app).await;
    let client = client_against(&base, None);

    assert_eq!(raw_get(&client, "empty204").await.unwrap(), None);
    assert_eq!(raw_get(&client, "empty200").await.unwrap(), None);
}

#[tokio::test]
async fn non_json_bodies_come_back_as_text() {
    let app = Router::new().route("/plain", get(|| async { "just text" }));
    let base = spawn(app).await;
    let client = client_against(&base, None);

    let value = raw_get(&client, "plain").await.unwrap().unwrap();
    assert_eq!(value, Value::String("just text".to_string()));
}

#[tokio::test]
async fn error_message_extraction_prefers_message_then_error_then_text() {
    let app = Router::new()
        .route(
            "/msg",
            get(|| async { (StatusCode::BAD_REQUEST, Json(json!({"message": "bad input"}))) }),
        )
        .route(
            "/err",
            get(|| async { (StatusCode::CONFLICT, Json(json!({"error": "duplicate"}))) }),
        )
        .route(
            "/text",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/bare",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE.into_response() }),
        );
    let base = spawn(app).await;
    let client = client_against(&base, None);

    let err = raw_get(&client, "msg").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("bad input"));

    let err = raw_get(&client, "err").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(err.to_string().contains("duplicate"));

    let err = raw_get(&client, "text").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("boom"));

    let err = raw_get(&client, "bare").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn unauthorized_clears_the_token_store() {
    let app = Router::new().route(
        "/private",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "expired"}))) }),
    );
    let base = spawn(app).await;
    let client = client_against(&base, Some("stale"));

    let err = raw_get(&client, "private").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("expired"));
    assert_eq!(client.token_store().get(), None);
}

#[tokio::test]
async fn other_errors_leave_the_token_store_alone() {
    let app = Router::new().route(
        "/forbidden",
        get(|| async { (StatusCode::FORBIDDEN, Json(json!({"message": "no"}))) }),
    );
    let base = spawn(app).await;
    let client = client_against(&base, Some("keepme"));

    let err = raw_get(&client, "forbidden").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(client.token_store().get(), Some("keepme".to_string()));
}

#[tokio::test]
async fn typed_accessors_hit_expected_paths() {
    let app = Router::new()
        .route(
            "/events",
            get(|| async {
                Json(json!([{
                    "id": 7,
                    "name": "City Marathon",
                    "startAt": "2026-09-01T09:00:00",
                    "location": "Riverside Park",
                    "capacity": 500,
                    "description": null,
                    "coverUrl": null,
                    "category": "SPORTS",
                    "tags": ["running"],
                }]))
            }),
        )
        .route(
            "/events/7/posts",
            get(
                |axum::extract::Query(q): axum::extract::Query<
                    std::collections::HashMap<String, String>,
                >| async move {
                    assert_eq!(q.get("status").map(String::as_str), Some("SCHEDULED"));
                    assert_eq!(q.get("channel").map(String::as_str), Some("TELEGRAM"));
                    assert_eq!(q.get("short").map(String::as_str), Some("true"));
                    Json(json!([{
                        "id": 1,
                        "eventId": 7,
                        "title": "Reminder",
                        "body": "Starts soon",
                        "publishAt": "2026-08-31T10:00:00",
                        "status": "SCHEDULED",
                        "audience": "SUBSCRIBERS",
                        "channel": "TELEGRAM",
                        "externalId": null,
                        "error": null,
                        "generated": false,
                        "createdAt": null,
                        "updatedAt": null,
                    }]))
                },
            ),
        )
        .route(
            "/registrations/my/7",
            post(|| async { StatusCode::NO_CONTENT }),
        );
    let base = spawn(app).await;
    let client = client_against(&base, Some("tok"));

    let events = client.events().list().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "City Marathon");
    assert_eq!(events[0].capacity, Some(500));

    let filter = sportadm_client::PostFilter {
        status: Some(sportadm_client::PostStatus::Scheduled),
        audience: None,
        channel: Some(sportadm_client::Channel::Telegram),
        short: true,
    };
    let posts = client.posts().list(7, &filter).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].status, sportadm_client::PostStatus::Scheduled);

    client.registrations().register_for(7).await.unwrap();
}

#[tokio::test]
async fn path_segments_are_percent_encoded() {
    let app = Router::new().route(
        "/events/by-name/{name}",
        get(
            |axum::extract::Path(name): axum::extract::Path<String>| async move {
                assert_eq!(name, "weird name/slash");
                Json(json!([]))
            },
        ),
    );
    let base = spawn(app).await;
    let client = client_against(&base, None);

    let events = client.events().by_name("weird name/slash").await.unwrap();
    assert!(events.is_empty());
}
