//! Integration tests for the JSON resources and rendered pages.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use team_roster::{
    AppState,
    config::AppConfig,
    directory::{Directory, Team, User},
    server::build_router,
    ui::MemberListResponse,
};

// =============================================================================
// Test Utilities
// =============================================================================

fn test_config() -> AppConfig {
    AppConfig::load_from_args(["team-roster", "--config", "tests/fixtures/roster.yaml"])
        .expect("Failed to load fixture config")
}

fn setup() -> (TestServer, Directory) {
    let config = test_config();
    let directory = Directory::new(config.directory.seed_members.clone());
    let state = AppState {
        directory: directory.clone(),
        config: Arc::new(config),
    };
    let server = TestServer::new(build_router(state)).expect("Failed to start test server");
    (server, directory)
}

// =============================================================================
// Members & Login
// =============================================================================

#[tokio::test]
async fn test_members_lists_seed_and_registered_users() {
    let (server, directory) = setup();
    directory.register("Alice", "alice@example.com").unwrap();

    let response = server.get("/members").await;
    response.assert_status_ok();
    let body: MemberListResponse = response.json();
    assert_eq!(
        body.members,
        Some(vec!["Member1".to_string(), "Member2".to_string(), "Alice".to_string()])
    );
}

#[tokio::test]
async fn test_login_describes_form() {
    let (server, _) = setup();

    let response = server.get("/login").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "Login");
    assert_eq!(body["fields"][0]["name"], "email");
    assert_eq!(body["fields"][0]["required"], true);
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_registration_flow() {
    let (server, _) = setup();

    let response = server
        .post("/registration")
        .json(&json!({ "name": "Bob", "email": "bob@example.com" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let raw: Value = response.json();
    assert_eq!(raw["id"], 1);
    let user: User = response.json();
    assert_eq!(user.name, "Bob");

    let members: MemberListResponse = server.get("/members").await.json();
    assert_eq!(members.members.unwrap().last().map(String::as_str), Some("Bob"));

    let duplicate = server
        .post("/registration")
        .json(&json!({ "name": "Bobby", "email": "BOB@example.com" }))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        duplicate.text(),
        "That email is taken. Please choose a different one."
    );
}

#[tokio::test]
async fn test_registration_validates_input() {
    let (server, directory) = setup();

    server
        .post("/registration")
        .json(&json!({ "name": "B", "email": "b@example.com" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    server
        .post("/registration")
        .json(&json!({ "name": "Bob", "email": "" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(directory.members(), vec!["Member1", "Member2"]);
}

// =============================================================================
// Teams
// =============================================================================

#[tokio::test]
async fn test_team_crud() {
    let (server, _) = setup();

    let created = server
        .post("/teams")
        .json(&json!({ "name": "Rescue", "bio": "Finds homes" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let team: Team = created.json();
    assert_eq!(team.id, 1);
    assert_eq!(team.certification, "");

    let listed: Vec<Team> = server.get("/teams").await.json();
    assert_eq!(listed, vec![team.clone()]);

    let updated: Team = server
        .put(&format!("/teams/{}", team.id))
        .json(&json!({ "name": "Rescue Squad", "bio": "Finds homes", "certification": "CPR" }))
        .await
        .json();
    assert_eq!(updated.name, "Rescue Squad");
    assert_eq!(updated.certification, "CPR");

    let fetched: Team = server.get(&format!("/teams/{}", team.id)).await.json();
    assert_eq!(fetched, updated);

    server
        .delete(&format!("/teams/{}", team.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/teams/{}", team.id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_team_errors() {
    let (server, _) = setup();

    server
        .post("/teams")
        .json(&json!({ "name": "   " }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    server
        .put("/teams/999")
        .json(&json!({ "name": "X" }))
        .await
        .assert_status_not_found();
    let missing = server.delete("/teams/999").await;
    missing.assert_status_not_found();
    assert_eq!(missing.text(), "Team '999' not found");

    // Ids are integers.
    server
        .get("/teams/missing")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// Rendered pages
// =============================================================================

#[tokio::test]
async fn test_index_renders_members() {
    let (server, directory) = setup();
    directory.register("Eve <3", "eve@example.com").unwrap();

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"<div class="App">"#));
    assert!(html.contains(r#"type="search""#));
    assert!(html.contains("<p>Member1</p><p>Member2</p><p>Eve &lt;3</p>"));
    assert!(!html.contains("Loading..."));
}

#[tokio::test]
async fn test_signin_renders_empty_container() {
    let (server, _) = setup();

    let response = server.get("/signin").await;
    response.assert_status_ok();
    assert!(
        response
            .text()
            .contains(r#"<main id="app"><div class="login"><div></div></div></main>"#)
    );
}
