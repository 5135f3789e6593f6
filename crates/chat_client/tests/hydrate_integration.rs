//! Integration tests for startup hydration from `config.json`.

mod common;

use axum::http::StatusCode;
use chat_client::{hydrate, ChatClient, MemoryView, Page};
use common::{dead_url, TestServer};

async fn hydrated_page(server: &TestServer) -> Page {
    let url = server.spawn().await;
    let view = MemoryView::new();
    hydrate(&ChatClient::new(&url), &view).await;
    view.page()
}

#[tokio::test]
async fn full_config_overwrites_all_bindings() {
    let server = TestServer::answering("").with_config(
        StatusCode::OK,
        r#"{"title":"Handbook","heading":"Ask the handbook","placeholder":"e.g. vacation policy"}"#,
    );
    let page = hydrated_page(&server).await;

    assert_eq!(page.title, "Handbook");
    assert_eq!(page.heading, "Ask the handbook");
    assert_eq!(page.placeholder, "e.g. vacation policy");
}

#[tokio::test]
async fn heading_only_config_leaves_the_rest() {
    let server = TestServer::answering("").with_config(StatusCode::OK, r#"{"heading":"Docs"}"#);
    let page = hydrated_page(&server).await;

    let defaults = Page::default();
    assert_eq!(page.heading, "Docs");
    assert_eq!(page.title, defaults.title);
    assert_eq!(page.placeholder, defaults.placeholder);
}

#[tokio::test]
async fn mistyped_field_is_skipped_and_siblings_apply() {
    let server = TestServer::answering("")
        .with_config(StatusCode::OK, r#"{"title":5,"heading":"Docs","placeholder":["x"]}"#);
    let page = hydrated_page(&server).await;

    let defaults = Page::default();
    assert_eq!(page.heading, "Docs");
    assert_eq!(page.title, defaults.title);
    assert_eq!(page.placeholder, defaults.placeholder);
}

#[tokio::test]
async fn config_without_known_fields_keeps_defaults() {
    let server = TestServer::answering("").with_config(StatusCode::OK, r#"{"theme":"dark"}"#);
    assert_eq!(hydrated_page(&server).await, Page::default());
}

#[tokio::test]
async fn missing_config_keeps_defaults() {
    let server = TestServer::answering("");
    assert_eq!(hydrated_page(&server).await, Page::default());
}

#[tokio::test]
async fn error_status_keeps_defaults() {
    let server = TestServer::answering("")
        .with_config(StatusCode::INTERNAL_SERVER_ERROR, r#"{"title":"ignored"}"#);
    assert_eq!(hydrated_page(&server).await, Page::default());
}

#[tokio::test]
async fn malformed_config_keeps_defaults() {
    let server = TestServer::answering("").with_config(StatusCode::OK, "<html>not json</html>");
    assert_eq!(hydrated_page(&server).await, Page::default());
}

#[tokio::test]
async fn unreachable_server_keeps_defaults() {
    let view = MemoryView::new();
    hydrate(&ChatClient::new(&dead_url()), &view).await;
    assert_eq!(view.page(), Page::default());
}
