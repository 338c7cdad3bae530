//! In-process stand-in for the workspace API.
//!
//! Every route the client issues has a handler here that returns a canned
//! fixture from [`fixtures`]. The server keeps no state: fixtures are
//! initialised once and only ever read, so handlers can run concurrently and
//! a fresh router behaves exactly like a long-lived one.

use std::future::Future;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod fixtures;
pub mod handlers;

use handlers::*;

pub fn app() -> Router {
    Router::new()
        .route("/api/v2/buildinfo", get(build_info))
        // organizations
        .route("/api/v2/organizations/{organization_id}", get(organization))
        .route(
            "/api/v2/organizations/{organization_id}/templates",
            get(templates).post(template),
        )
        .route(
            "/api/v2/organizations/{organization_id}/templates/{template_name}",
            get(template),
        )
        .route(
            "/api/v2/organizations/{organization_id}/workspaces",
            post(workspace),
        )
        .route(
            "/api/v2/organizations/{organization_id}/workspaces/{owner}/{workspace_name}",
            get(workspace_by_owner_and_name),
        )
        // templates
        .route("/api/v2/templates/{template_id}", get(template))
        .route(
            "/api/v2/templateversions/{template_version_id}",
            get(template_version),
        )
        .route(
            "/api/v2/templateversions/{template_version_id}/schema",
            get(template_version_schema),
        )
        .route(
            "/api/v2/templateversions/{template_version_id}/resources",
            get(workspace_resources),
        )
        // users
        .route("/api/v2/users", get(users).post(user))
        .route("/api/v2/users/login", post(login))
        .route("/api/v2/users/logout", post(logout))
        .route("/api/v2/users/authmethods", get(auth_methods))
        .route("/api/v2/users/roles", get(site_roles))
        .route("/api/v2/users/{user_id}", get(user))
        .route("/api/v2/users/{user_id}/keys", get(api_key).post(api_key))
        .route("/api/v2/users/{user_id}/organizations", get(organizations))
        .route(
            "/api/v2/users/{user_id}/organizations/{organization_id}",
            get(organization),
        )
        .route(
            "/api/v2/users/{user_id}/authorization",
            post(check_permissions),
        )
        .route(
            "/api/v2/users/{user_id}/gitsshkey",
            get(git_ssh_key).put(git_ssh_key),
        )
        .route("/api/v2/users/{user_id}/profile", put(user))
        .route("/api/v2/users/{user_id}/status/suspend", put(user))
        .route("/api/v2/users/{user_id}/password", put(update_password))
        .route("/api/v2/users/{user_id}/roles", put(user))
        // workspaces
        .route("/api/v2/workspaces", get(workspaces))
        .route("/api/v2/workspaces/{workspace_id}", get(workspace))
        .route(
            "/api/v2/workspaces/{workspace_id}/autostart",
            put(update_workspace_schedule),
        )
        .route(
            "/api/v2/workspaces/{workspace_id}/ttl",
            put(update_workspace_schedule),
        )
        .route(
            "/api/v2/workspaces/{workspace_id}/builds",
            get(workspace_builds).post(create_workspace_build),
        )
        // workspace builds
        .route(
            "/api/v2/workspacebuilds/{workspace_build_id}",
            get(workspace_build),
        )
        .route(
            "/api/v2/workspacebuilds/{workspace_build_id}/resources",
            get(workspace_resources),
        )
        .route(
            "/api/v2/workspacebuilds/{workspace_build_id}/logs",
            get(workspace_build_logs),
        )
        .route(
            "/api/v2/workspacebuilds/{workspace_build_id}/cancel",
            patch(cancel_workspace_build),
        )
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Like [`run`], but stops accepting connections once `shutdown` resolves
/// and waits for in-flight requests to finish.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown)
        .await
}
