//! Route handlers. Each answers with a fixed status and fixture, except the
//! workspace lookup by name and build creation, which branch on one request
//! field.

use axum::{extract::Path, http::StatusCode, Json};
use workspace_types::{
    permissions_to_check, AuthMethods, BuildInfoResponse, CreateWorkspaceBuildRequest,
    GenerateApiKeyResponse, GitSshKey, LoginWithPasswordResponse, Message, Organization,
    ParameterSchema, ProvisionerJobLog, Role, Template, TemplateVersion, User,
    UserAuthorizationResponse, Workspace, WorkspaceBuild, WorkspaceResource, WorkspaceTransition,
};

use crate::fixtures::*;

pub async fn build_info() -> Json<&'static BuildInfoResponse> {
    Json(&*MOCK_BUILD_INFO)
}

// --- organizations and templates ---

pub async fn organization() -> Json<&'static Organization> {
    Json(&*MOCK_ORGANIZATION)
}

pub async fn organizations() -> Json<[&'static Organization; 1]> {
    Json([&*MOCK_ORGANIZATION])
}

pub async fn template() -> Json<&'static Template> {
    Json(&*MOCK_TEMPLATE)
}

pub async fn templates() -> Json<[&'static Template; 1]> {
    Json([&*MOCK_TEMPLATE])
}

pub async fn template_version() -> Json<&'static TemplateVersion> {
    Json(&*MOCK_TEMPLATE_VERSION)
}

pub async fn template_version_schema() -> Json<Vec<ParameterSchema>> {
    Json(Vec::new())
}

pub async fn workspace_resources() -> Json<[&'static WorkspaceResource; 2]> {
    Json([&*MOCK_WORKSPACE_RESOURCE, &*MOCK_WORKSPACE_RESOURCE2])
}

// --- users ---

pub async fn users() -> Json<[&'static User; 2]> {
    Json([&*MOCK_USER, &*MOCK_USER2])
}

pub async fn user() -> Json<&'static User> {
    Json(&*MOCK_USER)
}

pub async fn login() -> Json<&'static LoginWithPasswordResponse> {
    Json(&*MOCK_SESSION_TOKEN)
}

pub async fn logout() -> StatusCode {
    StatusCode::OK
}

pub async fn api_key() -> Json<&'static GenerateApiKeyResponse> {
    Json(&*MOCK_API_KEY)
}

pub async fn auth_methods() -> Json<&'static AuthMethods> {
    Json(&*MOCK_AUTH_METHODS)
}

pub async fn site_roles() -> Json<&'static Vec<Role>> {
    Json(&*MOCK_SITE_ROLES)
}

/// Grants every permission in the fixed check set, whatever was asked.
pub async fn check_permissions() -> Json<UserAuthorizationResponse> {
    let granted: UserAuthorizationResponse = permissions_to_check()
        .into_keys()
        .map(|permission| (permission, true))
        .collect();
    Json(granted)
}

pub async fn git_ssh_key() -> Json<&'static GitSshKey> {
    Json(&*MOCK_GIT_SSH_KEY)
}

pub async fn update_password() -> StatusCode {
    StatusCode::NO_CONTENT
}

// --- workspaces ---

pub async fn workspaces() -> Json<[&'static Workspace; 1]> {
    Json([&*MOCK_WORKSPACE])
}

pub async fn workspace() -> Json<&'static Workspace> {
    Json(&*MOCK_WORKSPACE)
}

/// 404 unless the requested name is the fixture workspace's name.
pub async fn workspace_by_owner_and_name(
    Path((_organization_id, _owner, workspace_name)): Path<(String, String, String)>,
) -> Result<Json<&'static Workspace>, (StatusCode, Json<Message>)> {
    if workspace_name != MOCK_WORKSPACE.name {
        return Err((
            StatusCode::NOT_FOUND,
            Json(Message {
                message: WORKSPACE_NOT_FOUND.to_string(),
                detail: None,
            }),
        ));
    }
    Ok(Json(&*MOCK_WORKSPACE))
}

pub async fn update_workspace_schedule() -> StatusCode {
    StatusCode::OK
}

// --- workspace builds ---

/// Picks the start, stop or delete fixture by the requested transition.
pub async fn create_workspace_build(
    Json(input): Json<CreateWorkspaceBuildRequest>,
) -> Json<&'static WorkspaceBuild> {
    let build: &'static WorkspaceBuild = match input.transition {
        WorkspaceTransition::Start => &*MOCK_WORKSPACE_BUILD,
        WorkspaceTransition::Stop => &*MOCK_WORKSPACE_BUILD_STOP,
        WorkspaceTransition::Delete => &*MOCK_WORKSPACE_BUILD_DELETE,
    };
    Json(build)
}

pub async fn workspace_builds() -> Json<&'static Vec<WorkspaceBuild>> {
    Json(&*MOCK_BUILDS)
}

pub async fn workspace_build() -> Json<&'static WorkspaceBuild> {
    Json(&*MOCK_WORKSPACE_BUILD)
}

pub async fn workspace_build_logs() -> Json<&'static Vec<ProvisionerJobLog>> {
    Json(&*MOCK_WORKSPACE_BUILD_LOGS)
}

pub async fn cancel_workspace_build() -> Json<&'static Message> {
    Json(&*MOCK_CANCELLATION_MESSAGE)
}
