use std::sync::Arc;

use serde_json::{Value, json};

use inkpost_infra::InMemoryStore;

use super::{AppSchema, build_schema};
use crate::config::GraphqlConfig;

fn schema() -> AppSchema {
    let store = InMemoryStore::new();
    build_schema(
        Arc::new(store.users()),
        Arc::new(store.posts()),
        &GraphqlConfig::default(),
    )
}

async fn run(schema: &AppSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

async fn run_err(schema: &AppSchema, query: &str) -> async_graphql::ServerError {
    let mut response = schema.execute(query).await;
    assert!(!response.errors.is_empty(), "expected an error for {query}");
    response.errors.remove(0)
}

async fn register(schema: &AppSchema, email: &str) -> i64 {
    let data = run(
        schema,
        &format!(r#"mutation {{ registerUser(registerUser: {{ name: "Alice", email: "{email}" }}) {{ id }} }}"#),
    )
    .await;
    data["registerUser"]["id"].as_i64().unwrap()
}

async fn draft(schema: &AppSchema, title: &str, content: &str, email: &str) -> i64 {
    let data = run(
        schema,
        &format!(
            r#"mutation {{ createDraft(data: {{ title: "{title}", content: "{content}" }}, authorEmail: "{email}") {{ id published viewCount }} }}"#
        ),
    )
    .await;
    assert_eq!(data["createDraft"]["published"], false);
    assert_eq!(data["createDraft"]["viewCount"], 0);
    data["createDraft"]["id"].as_i64().unwrap()
}

async fn publish(schema: &AppSchema, id: i64) {
    let data = run(
        schema,
        &format!("mutation {{ togglePublishPost(id: {id}) {{ published }} }}"),
    )
    .await;
    assert_eq!(data["togglePublishPost"]["published"], true);
}

#[tokio::test]
async fn test_user_crud() {
    let schema = schema();
    let id = register(&schema, "alice@inkpost.dev").await;

    let data = run(&schema, "{ users { id name email } }").await;
    assert_eq!(
        data["users"],
        json!([{ "id": id, "name": "Alice", "email": "alice@inkpost.dev" }])
    );

    let data = run(
        &schema,
        &format!(r#"mutation {{ updateUser(id: {id}, updateUserInput: {{ email: "al@inkpost.dev" }}) {{ name email }} }}"#),
    )
    .await;
    assert_eq!(
        data["updateUser"],
        json!({ "name": "Alice", "email": "al@inkpost.dev" })
    );

    let data = run(&schema, &format!("mutation {{ removeUser(id: {id}) {{ email }} }}")).await;
    assert_eq!(data["removeUser"]["email"], "al@inkpost.dev");

    let data = run(&schema, &format!("{{ user(id: {id}) {{ id }} }}")).await;
    assert_eq!(data["user"], Value::Null);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let schema = schema();
    register(&schema, "alice@inkpost.dev").await;

    let err = run_err(
        &schema,
        r#"mutation { registerUser(registerUser: { email: "alice@inkpost.dev" }) { id } }"#,
    )
    .await;
    let code = err.extensions.as_ref().and_then(|e| e.get("code")).cloned();
    assert_eq!(code, Some(async_graphql::Value::from("CONFLICT")));
}

#[tokio::test]
async fn test_create_draft_with_unknown_author_fails() {
    let schema = schema();

    let err = run_err(
        &schema,
        r#"mutation { createDraft(data: { title: "t" }, authorEmail: "ghost@inkpost.dev") { id } }"#,
    )
    .await;
    assert!(err.message.contains("User not found"));
}

#[tokio::test]
async fn test_author_resolves_to_connected_user() {
    let schema = schema();
    let user_id = register(&schema, "alice@inkpost.dev").await;
    let post_id = draft(&schema, "Hello", "World", "alice@inkpost.dev").await;

    let data = run(
        &schema,
        &format!("{{ postById(id: {post_id}) {{ title author {{ id email }} }} }}"),
    )
    .await;
    assert_eq!(data["postById"]["author"]["id"], user_id);
    assert_eq!(data["postById"]["author"]["email"], "alice@inkpost.dev");

    let data = run(
        &schema,
        &format!("{{ user(id: {user_id}) {{ posts {{ id }} }} }}"),
    )
    .await;
    assert_eq!(data["user"]["posts"], json!([{ "id": post_id }]));
}

#[tokio::test]
async fn test_feed_filters_and_paginates() {
    let schema = schema();
    register(&schema, "alice@inkpost.dev").await;

    let rust = draft(&schema, "Learning rust", "ownership", "alice@inkpost.dev").await;
    let async_post = draft(&schema, "Async", "tokio on rust", "alice@inkpost.dev").await;
    let garden = draft(&schema, "Gardening", "tomatoes", "alice@inkpost.dev").await;
    draft(&schema, "Unpublished rust", "draft", "alice@inkpost.dev").await;
    for id in [rust, async_post, garden] {
        publish(&schema, id).await;
    }

    let data = run(&schema, r#"{ feed(searchString: "rust") { id } }"#).await;
    assert_eq!(data["feed"], json!([{ "id": rust }, { "id": async_post }]));

    let data = run(&schema, r#"{ feed(searchString: "") { id } }"#).await;
    assert_eq!(data["feed"].as_array().unwrap().len(), 3);

    let data = run(&schema, "{ feed(skip: 1, take: 1) { id } }").await;
    assert_eq!(data["feed"], json!([{ "id": async_post }]));

    // take: 0 means no limit
    let data = run(&schema, "{ feed(skip: 0, take: 0) { id } }").await;
    assert_eq!(data["feed"].as_array().unwrap().len(), 3);

    let data = run(&schema, "{ feed(orderBy: { updatedAt: desc }, take: 1) { id } }").await;
    assert_eq!(data["feed"], json!([{ "id": garden }]));
}

#[tokio::test]
async fn test_feed_rejects_negative_take() {
    let schema = schema();
    run_err(&schema, "{ feed(take: -1) { id } }").await;
}

#[tokio::test]
async fn test_toggle_and_increment() {
    let schema = schema();
    register(&schema, "alice@inkpost.dev").await;
    let id = draft(&schema, "Hello", "World", "alice@inkpost.dev").await;

    publish(&schema, id).await;
    let data = run(
        &schema,
        &format!("mutation {{ togglePublishPost(id: {id}) {{ published }} }}"),
    )
    .await;
    assert_eq!(data["togglePublishPost"]["published"], false);

    for _ in 0..2 {
        run(
            &schema,
            &format!("mutation {{ incrementPostViewCount(id: {id}) {{ viewCount }} }}"),
        )
        .await;
    }
    let data = run(&schema, &format!("{{ postById(id: {id}) {{ viewCount }} }}")).await;
    assert_eq!(data["postById"]["viewCount"], 2);
}

#[tokio::test]
async fn test_delete_post() {
    let schema = schema();
    register(&schema, "alice@inkpost.dev").await;
    let id = draft(&schema, "Hello", "World", "alice@inkpost.dev").await;

    let data = run(&schema, &format!("mutation {{ deletePost(id: {id}) {{ id }} }}")).await;
    assert_eq!(data["deletePost"]["id"], id);

    let err = run_err(&schema, &format!("mutation {{ deletePost(id: {id}) {{ id }} }}")).await;
    assert!(err.message.contains("Post not found"));
}

#[tokio::test]
async fn test_depth_limit_is_enforced() {
    let store = InMemoryStore::new();
    let schema = build_schema(
        Arc::new(store.users()),
        Arc::new(store.posts()),
        &GraphqlConfig {
            depth_limit: 2,
            ..GraphqlConfig::default()
        },
    );

    run_err(&schema, "{ users { posts { author { id } } } }").await;
}
