use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::client::{Fetch, RouterFetcher};
use crate::config::AppConfig;
use crate::directory::{Directory, DirectoryError, Team, TeamDraft, User};
use crate::ui::MemberListResponse;
use crate::ui::page::{Page, render_page};

/// Requests running longer than this are answered with 408.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let directory = Directory::new(config.directory.seed_members.clone());
    info!(
        name: "directory.seeded",
        seed_members = config.directory.seed_members.len(),
        "Directory initialized"
    );

    let state = AppState {
        directory,
        config: Arc::clone(&config),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the complete application: JSON resources plus rendered pages.
pub fn build_router(state: AppState) -> Router {
    let api = api_router().with_state(state.clone());
    let fetcher: Arc<dyn Fetch> = Arc::new(RouterFetcher::new(api.clone()));
    let pages = PageState {
        fetcher,
        render_timeout: Duration::from_millis(state.config.client.render_timeout_ms),
    };

    Router::new()
        .route("/", get(index_page))
        .route("/signin", get(signin_page))
        .with_state(pages)
        .merge(api)
        .layer(axum::middleware::from_fn(
            |req: Request, next: Next| async move {
                match tokio::time::timeout(REQUEST_TIMEOUT, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
}

/// JSON resources, without pages or middleware.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/members", get(api_members))
        .route("/login", get(api_login))
        .route("/registration", axum::routing::post(api_register))
        .route("/teams", get(api_list_teams).post(api_create_team))
        .route(
            "/teams/{id}",
            get(api_get_team)
                .put(api_update_team)
                .delete(api_delete_team),
        )
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

fn directory_error(err: DirectoryError) -> (StatusCode, String) {
    let status = match err {
        DirectoryError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DirectoryError::EmailTaken => StatusCode::CONFLICT,
        DirectoryError::NotFound { .. } => StatusCode::NOT_FOUND,
    };
    (status, err.to_string())
}

/// GET /members - Names shown by the app shell.
async fn api_members(State(state): State<AppState>) -> Json<MemberListResponse> {
    Json(MemberListResponse {
        members: Some(state.directory.members()),
    })
}

/// Field shown on the login form.
#[derive(Debug, Serialize)]
struct LoginField {
    name: &'static str,
    kind: &'static str,
    required: bool,
}

/// Response from the login resource.
#[derive(Debug, Serialize)]
struct LoginForm {
    title: &'static str,
    fields: Vec<LoginField>,
    submit: &'static str,
}

/// GET /login - Describe the login form.
async fn api_login() -> Json<LoginForm> {
    Json(LoginForm {
        title: "Login",
        fields: vec![LoginField {
            name: "email",
            kind: "email",
            required: true,
        }],
        submit: "Login",
    })
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
struct RegistrationRequest {
    name: String,
    email: String,
}

/// POST /registration - Add a user to the directory.
async fn api_register(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<User>), (StatusCode, String)> {
    let user = state
        .directory
        .register(req.name, req.email)
        .map_err(directory_error)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /teams - List all teams.
async fn api_list_teams(State(state): State<AppState>) -> Json<Vec<Team>> {
    Json(state.directory.list_teams())
}

/// POST /teams - Create a team.
async fn api_create_team(
    State(state): State<AppState>,
    Json(draft): Json<TeamDraft>,
) -> Result<(StatusCode, Json<Team>), (StatusCode, String)> {
    let team = state
        .directory
        .create_team(draft)
        .map_err(directory_error)?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /teams/{id} - Get a team by ID.
async fn api_get_team(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Team>, (StatusCode, String)> {
    state
        .directory
        .get_team(id)
        .map(Json)
        .map_err(directory_error)
}

/// PUT /teams/{id} - Replace a team's fields.
async fn api_update_team(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<TeamDraft>,
) -> Result<Json<Team>, (StatusCode, String)> {
    state
        .directory
        .update_team(id, draft)
        .map(Json)
        .map_err(directory_error)
}

/// DELETE /teams/{id} - Delete a team.
async fn api_delete_team(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .directory
        .delete_team(id)
        .map_err(directory_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// State for server-rendered pages.
#[derive(Clone, Debug)]
struct PageState {
    /// Dispatches component fetches back through the API router.
    fetcher: Arc<dyn Fetch>,
    render_timeout: Duration,
}

impl PageState {
    async fn render(&self, page: Page) -> Html<String> {
        let body = render_page(page, Arc::clone(&self.fetcher), self.render_timeout).await;
        Html(html_shell(page.title(), &body))
    }
}

/// GET / - Render the app shell once its members fetch settles.
async fn index_page(State(pages): State<PageState>) -> Html<String> {
    pages.render(Page::Members).await
}

/// GET /signin - Render the login view.
async fn signin_page(State(pages): State<PageState>) -> Html<String> {
    pages.render(Page::Login).await
}

/// Generate the HTML shell for a rendered component.
fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - Team Roster</title>
</head>
<body>
    <main id="app">{content}</main>
</body>
</html>"#
    )
}
