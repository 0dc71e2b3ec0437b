use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use folio::{
    app::build_app,
    auth::services::provision_administrator,
    blog::{repo::BlogRepo, repo_types::NewBlogItem},
    config::{AppConfig, CorsConfig},
    memory::MemoryStore,
    portfolio::{repo::PortfolioRepo, repo_types::NewPortfolioItem},
    state::AppState,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const ADMIN: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "s3cret-admin-pass";

fn setup() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::from_store(AppConfig::local(ADMIN), store.clone());
    (build_app(state), store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn seed_portfolio(store: &MemoryStore, title: &str, category: &str) -> Uuid {
    PortfolioRepo::create(
        store,
        NewPortfolioItem {
            title: title.into(),
            category: category.into(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_blog(store: &MemoryStore, title: &str) -> Uuid {
    BlogRepo::create(
        store,
        NewBlogItem {
            title: title.into(),
            content: Some("first draft".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn portfolio_walkthrough() {
    let (app, store) = setup();
    let id = seed_portfolio(&store, "Site Redesign", "web").await;

    let (status, list) = send(&app, get("/portfolio/get")).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.to_string());
    assert_eq!(list[0]["title"], "Site Redesign");
    assert!(list[0]["projectURL"].is_null());
    assert!(list[0]["description"].is_null());

    let (status, updated) = send(
        &app,
        json_request("PUT", &format!("/portfolio/update/{id}"), json!({"category": "branding"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Site Redesign");
    assert_eq!(updated["category"], "branding");

    let (status, message) = send(&app, delete(&format!("/portfolio/delete/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(message.as_str().unwrap().contains("Site Redesign"));

    let (status, body) = send(&app, get(&format!("/portfolio/get/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn portfolio_get_by_id_returns_projection() {
    let (app, store) = setup();
    let id = seed_portfolio(&store, "CLI Tool", "tools").await;

    let (status, body) = send(&app, get(&format!("/portfolio/get/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "tools");
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 8);
}

#[tokio::test]
async fn list_reflects_creates_minus_deletes() {
    let (app, store) = setup();
    let mut ids = Vec::new();
    for n in 0..4 {
        ids.push(seed_portfolio(&store, &format!("Project {n}"), "web").await);
    }
    for id in &ids[1..3] {
        let (status, _) = send(&app, delete(&format!("/portfolio/delete/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = send(&app, get("/portfolio/get")).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_with_nulls_and_omissions_keeps_fields() {
    let (app, store) = setup();
    let id = PortfolioRepo::create(
        store.as_ref(),
        NewPortfolioItem {
            title: "Game".into(),
            category: "fun".into(),
            repo_url: Some("https://git.example/game".into()),
            description: Some("a game".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id;

    let body = json!({"repoURL": null, "date": "2021-07", "imgURL": "https://img.example/g.png"});
    let uri = format!("/portfolio/update/{id}");
    let (status, first) = send(&app, json_request("PUT", &uri, body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["repoURL"], "https://git.example/game");
    assert_eq!(first["description"], "a game");
    assert_eq!(first["date"], "2021-07");

    let (_, second) = send(&app, json_request("PUT", &uri, body)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn update_requires_json_content_type() {
    let (app, store) = setup();
    let id = seed_portfolio(&store, "Original", "web").await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/portfolio/update/{id}"))
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"title": "Changed"}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body, json!("Error: Data must be sent as JSON"));

    let stored = PortfolioRepo::get(store.as_ref(), id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Original");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, store) = setup();
    let id = seed_portfolio(&store, "Original", "web").await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/portfolio/update/{id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request("PUT", &format!("/portfolio/update/{id}"), json!({"title": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (app, _store) = setup();
    let id = Uuid::new_v4();

    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/portfolio/update/{id}"), json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.as_str().unwrap().contains(&id.to_string()));

    let (status, _) = send(&app, delete(&format!("/portfolio/delete/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request("PUT", &format!("/blog/update/{id}"), json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete(&format!("/blog/delete/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_uuid_id_is_rejected_with_json_message() {
    let (app, _store) = setup();
    let requests = [
        get("/portfolio/get/42"),
        get("/blog/get/not-a-uuid"),
        json_request("PUT", "/portfolio/update/7", json!({"title": "x"})),
        json_request("PUT", "/blog/update/7", json!({"title": "x"})),
        delete("/portfolio/delete/1"),
        delete("/blog/delete/1"),
    ];
    for request in requests {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("application/json"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body.as_str().unwrap().contains("UUID"));
    }
}

#[tokio::test]
async fn duplicate_title_update_conflicts() {
    let (app, store) = setup();
    seed_portfolio(&store, "Taken", "web").await;
    let id = seed_portfolio(&store, "Free", "web").await;

    let (status, _) = send(
        &app,
        json_request("PUT", &format!("/portfolio/update/{id}"), json!({"title": "Taken"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn blog_walkthrough() {
    let (app, store) = setup();
    let id = seed_blog(&store, "Hello World").await;
    seed_blog(&store, "Second Post").await;

    let (status, list) = send(&app, get("/blog/get")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, post) = send(&app, get(&format!("/blog/get/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["title"], "Hello World");
    assert_eq!(post["content"], "first draft");
    assert!(post["flavorImgURL"].is_null());

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/blog/update/{id}"),
            json!({"flavorImgURL": "https://img.example/h.png", "content": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["flavorImgURL"], "https://img.example/h.png");
    assert_eq!(updated["content"], "first draft");

    let (status, message) = send(&app, delete(&format!("/blog/delete/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message, json!("Hello World has been deleted!"));

    let (_, body) = send(&app, get(&format!("/blog/get/{id}"))).await;
    assert_eq!(body, json!({}));
    let (_, list) = send(&app, get("/blog/get")).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn blog_update_requires_json_content_type() {
    let (app, store) = setup();
    let id = seed_blog(&store, "Post").await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/blog/update/{id}"))
        .body(Body::from(r#"{"title": "Changed"}"#))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let stored = BlogRepo::get(store.as_ref(), id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Post");
}

async fn provisioned_app() -> (Router, Arc<MemoryStore>) {
    let (app, store) = setup();
    provision_administrator(store.as_ref(), ADMIN, ADMIN_PASSWORD, false)
        .await
        .unwrap();
    (app, store)
}

#[tokio::test]
async fn auth_accepts_administrator() {
    let (app, _store) = provisioned_app().await;
    let (status, body) = send(
        &app,
        json_request("POST", "/auth", json!({"email": ADMIN, "password": ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Welcome Administrator"));
}

#[tokio::test]
async fn auth_failures_are_indistinguishable() {
    let (app, store) = provisioned_app().await;
    provision_administrator(store.as_ref(), "editor@example.com", ADMIN_PASSWORD, false)
        .await
        .unwrap();

    let attempts = [
        json!({"email": ADMIN, "password": "not-the-password"}),
        json!({"email": "nobody@example.com", "password": ADMIN_PASSWORD}),
        json!({"email": "editor@example.com", "password": ADMIN_PASSWORD}),
    ];
    for attempt in attempts {
        let (status, body) = send(&app, json_request("POST", "/auth", attempt)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!("User could not be Verified"));
    }
}

#[tokio::test]
async fn auth_requires_json_content_type() {
    let (app, _store) = provisioned_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/auth")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("email={ADMIN}&password={ADMIN_PASSWORD}")))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn auth_requires_both_fields() {
    let (app, _store) = provisioned_app().await;
    let (status, _) = send(&app, json_request("POST", "/auth", json!({"email": ADMIN}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _store) = setup();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let store = Arc::new(MemoryStore::new());
    let mut config = AppConfig::local(ADMIN);
    config.cors = CorsConfig::parse(Some("https://frontend.example"));
    let app = build_app(AppState::from_store(config, store));

    let allowed = Request::builder()
        .uri("/portfolio/get")
        .header(header::ORIGIN, "https://frontend.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://frontend.example"
    );

    let other = Request::builder()
        .uri("/portfolio/get")
        .header(header::ORIGIN, "https://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(other).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
