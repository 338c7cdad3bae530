//! Stateless HTTP request builder and response parser for the workspace API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Every operation has a `build_*` method that produces an
//! `HttpRequest`; responses are decoded by the generic `parse_json` /
//! `parse_empty`. The caller executes the actual HTTP round trip, keeping the
//! route table deterministic and free of I/O.
//!
//! Path parameters are interpolated as given. Request bodies are always
//! serialized up front and sent with an explicit JSON content type.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;
use workspace_types::{
    CreateTemplateRequest, CreateUserRequest, CreateWorkspaceBuildRequest, CreateWorkspaceRequest,
    LoginWithPasswordRequest, Message, UpdateRoles, UpdateUserPasswordRequest,
    UpdateUserProfileRequest, UpdateWorkspaceAutostartRequest, UpdateWorkspaceTtlRequest,
    UserAuthorizationRequest, WorkspaceFilter, WorkspaceTransition,
};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// User identifier the server resolves to the authenticated user.
pub const ME: &str = "me";

const WORKSPACES_PATH: &str = "/api/v2/workspaces";

/// Build the workspace listing path with its optional filters.
///
/// Filters are appended in the order `organization_id`, `owner`. Unset or
/// empty filters are left out, and the bare path is returned when nothing
/// remains.
pub fn workspaces_url(filter: Option<&WorkspaceFilter>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(filter) = filter {
        let pairs = [
            ("organization_id", filter.organization_id.as_deref()),
            ("owner", filter.owner.as_deref()),
        ];
        for (key, value) in pairs {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                query.append_pair(key, value);
            }
        }
    }
    let query = query.finish();
    if query.is_empty() {
        WORKSPACES_PATH.to_string()
    } else {
        format!("{WORKSPACES_PATH}?{query}")
    }
}

/// Synchronous, stateless client for the workspace API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn request_with_body<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    // --- users and sessions ---

    pub fn build_login(&self, email: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let payload = LoginWithPasswordRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.request_with_body(HttpMethod::Post, "/api/v2/users/login", &payload)
    }

    pub fn build_logout(&self) -> HttpRequest {
        self.request(HttpMethod::Post, "/api/v2/users/logout")
    }

    pub fn build_get_user(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/v2/users/me")
    }

    pub fn build_get_auth_methods(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/v2/users/authmethods")
    }

    pub fn build_check_user_permissions(
        &self,
        user_id: &str,
        params: &UserAuthorizationRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Post,
            &format!("/api/v2/users/{user_id}/authorization"),
            params,
        )
    }

    pub fn build_get_api_key(&self) -> HttpRequest {
        self.request(HttpMethod::Post, "/api/v2/users/me/keys")
    }

    /// Only active users are listed.
    pub fn build_get_users(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/v2/users?status=active")
    }

    pub fn build_create_user(&self, user: &CreateUserRequest) -> Result<HttpRequest, ApiError> {
        self.request_with_body(HttpMethod::Post, "/api/v2/users", user)
    }

    pub fn build_update_profile(
        &self,
        user_id: &str,
        data: &UpdateUserProfileRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Put,
            &format!("/api/v2/users/{user_id}/profile"),
            data,
        )
    }

    pub fn build_suspend_user(&self, user_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Put,
            &format!("/api/v2/users/{user_id}/status/suspend"),
        )
    }

    pub fn build_update_user_password(
        &self,
        password: &str,
        user_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = UpdateUserPasswordRequest {
            password: password.to_string(),
        };
        self.request_with_body(
            HttpMethod::Put,
            &format!("/api/v2/users/{user_id}/password"),
            &payload,
        )
    }

    pub fn build_get_site_roles(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/v2/users/roles")
    }

    pub fn build_update_user_roles(
        &self,
        roles: &[String],
        user_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = UpdateRoles {
            roles: roles.to_vec(),
        };
        self.request_with_body(
            HttpMethod::Put,
            &format!("/api/v2/users/{user_id}/roles"),
            &payload,
        )
    }

    pub fn build_get_user_ssh_key(&self, user_id: Option<&str>) -> HttpRequest {
        let user_id = user_id.unwrap_or(ME);
        self.request(HttpMethod::Get, &format!("/api/v2/users/{user_id}/gitsshkey"))
    }

    pub fn build_regenerate_user_ssh_key(&self, user_id: Option<&str>) -> HttpRequest {
        let user_id = user_id.unwrap_or(ME);
        self.request(HttpMethod::Put, &format!("/api/v2/users/{user_id}/gitsshkey"))
    }

    // --- organizations and templates ---

    pub fn build_get_organization(&self, organization_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/organizations/{organization_id}"),
        )
    }

    pub fn build_get_organizations(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/v2/users/me/organizations")
    }

    pub fn build_get_template(&self, template_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/api/v2/templates/{template_id}"))
    }

    pub fn build_get_templates(&self, organization_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/organizations/{organization_id}/templates"),
        )
    }

    pub fn build_get_template_by_name(&self, organization_id: &str, name: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/organizations/{organization_id}/templates/{name}"),
        )
    }

    pub fn build_create_template(
        &self,
        organization_id: &str,
        template: &CreateTemplateRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Post,
            &format!("/api/v2/organizations/{organization_id}/templates"),
            template,
        )
    }

    pub fn build_get_template_version(&self, version_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/templateversions/{version_id}"),
        )
    }

    pub fn build_get_template_version_schema(&self, version_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/templateversions/{version_id}/schema"),
        )
    }

    pub fn build_get_template_version_resources(&self, version_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/templateversions/{version_id}/resources"),
        )
    }

    // --- workspaces ---

    pub fn build_get_workspace(&self, workspace_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("{WORKSPACES_PATH}/{workspace_id}"))
    }

    pub fn build_get_workspaces(&self, filter: Option<&WorkspaceFilter>) -> HttpRequest {
        self.request(HttpMethod::Get, &workspaces_url(filter))
    }

    /// `owner` defaults to the authenticated user.
    pub fn build_get_workspace_by_owner_and_name(
        &self,
        organization_id: &str,
        owner: Option<&str>,
        workspace_name: &str,
    ) -> HttpRequest {
        let owner = owner.unwrap_or(ME);
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/organizations/{organization_id}/workspaces/{owner}/{workspace_name}"),
        )
    }

    pub fn build_create_workspace(
        &self,
        organization_id: &str,
        workspace: &CreateWorkspaceRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Post,
            &format!("/api/v2/organizations/{organization_id}/workspaces"),
            workspace,
        )
    }

    pub fn build_put_workspace_autostart(
        &self,
        workspace_id: &str,
        autostart: &UpdateWorkspaceAutostartRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Put,
            &format!("{WORKSPACES_PATH}/{workspace_id}/autostart"),
            autostart,
        )
    }

    pub fn build_put_workspace_autostop(
        &self,
        workspace_id: &str,
        ttl: &UpdateWorkspaceTtlRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Put,
            &format!("{WORKSPACES_PATH}/{workspace_id}/ttl"),
            ttl,
        )
    }

    // --- workspace builds ---

    /// Request a build performing `transition` on a workspace. Without a
    /// template version the server reuses the workspace's current one.
    pub fn build_workspace_build(
        &self,
        transition: WorkspaceTransition,
        workspace_id: &str,
        template_version_id: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let payload = CreateWorkspaceBuildRequest {
            transition,
            template_version_id: template_version_id.map(str::to_string),
        };
        self.request_with_body(
            HttpMethod::Post,
            &format!("{WORKSPACES_PATH}/{workspace_id}/builds"),
            &payload,
        )
    }

    pub fn build_start_workspace(
        &self,
        workspace_id: &str,
        template_version_id: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_workspace_build(WorkspaceTransition::Start, workspace_id, template_version_id)
    }

    pub fn build_stop_workspace(
        &self,
        workspace_id: &str,
        template_version_id: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_workspace_build(WorkspaceTransition::Stop, workspace_id, template_version_id)
    }

    pub fn build_delete_workspace(
        &self,
        workspace_id: &str,
        template_version_id: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_workspace_build(WorkspaceTransition::Delete, workspace_id, template_version_id)
    }

    pub fn build_get_workspace_builds(&self, workspace_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{WORKSPACES_PATH}/{workspace_id}/builds"),
        )
    }

    pub fn build_get_workspace_build(&self, build_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/api/v2/workspacebuilds/{build_id}"))
    }

    pub fn build_get_workspace_resources(&self, build_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/workspacebuilds/{build_id}/resources"),
        )
    }

    pub fn build_get_workspace_build_logs(&self, build_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/workspacebuilds/{build_id}/logs"),
        )
    }

    pub fn build_cancel_workspace_build(&self, build_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Patch,
            &format!("/api/v2/workspacebuilds/{build_id}/cancel"),
        )
    }

    // --- deployment ---

    pub fn build_get_build_info(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/v2/buildinfo")
    }

    // --- responses ---

    /// Decode a 2xx response body as `T`.
    pub fn parse_json<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Accept any 2xx response, whatever its body.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<Message>(&response.body)
        .ok()
        .map(|m| m.message);
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::HttpError {
        status: response.status,
        message,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use workspace_types::{BuildInfoResponse, UserAuthorizationResponse, Workspace};

    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn body_json(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn workspaces_url_without_filter_is_base_path() {
        assert_eq!(workspaces_url(None), "/api/v2/workspaces");
        assert_eq!(
            workspaces_url(Some(&WorkspaceFilter::default())),
            "/api/v2/workspaces"
        );
    }

    #[test]
    fn workspaces_url_with_owner_only() {
        let filter = WorkspaceFilter {
            organization_id: None,
            owner: Some("alice".to_string()),
        };
        assert_eq!(workspaces_url(Some(&filter)), "/api/v2/workspaces?owner=alice");
    }

    #[test]
    fn workspaces_url_with_both_filters() {
        let filter = WorkspaceFilter {
            organization_id: Some("org1".to_string()),
            owner: Some("alice".to_string()),
        };
        assert_eq!(
            workspaces_url(Some(&filter)),
            "/api/v2/workspaces?organization_id=org1&owner=alice"
        );
    }

    #[test]
    fn workspaces_url_skips_empty_filter_values() {
        let filter = WorkspaceFilter {
            organization_id: Some(String::new()),
            owner: Some("bob".to_string()),
        };
        assert_eq!(workspaces_url(Some(&filter)), "/api/v2/workspaces?owner=bob");
    }

    #[test]
    fn workspaces_url_encodes_filter_values() {
        let filter = WorkspaceFilter {
            organization_id: None,
            owner: Some("a b&c".to_string()),
        };
        assert_eq!(
            workspaces_url(Some(&filter)),
            "/api/v2/workspaces?owner=a+b%26c"
        );
    }

    #[test]
    fn build_login_produces_correct_request() {
        let req = client().build_login("test@coder.com", "password").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/v2/users/login");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(
            body_json(&req),
            serde_json::json!({"email": "test@coder.com", "password": "password"})
        );
    }

    #[test]
    fn build_logout_has_no_body() {
        let req = client().build_logout();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/v2/users/logout");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_users_filters_active() {
        let req = client().build_get_users();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/v2/users?status=active");
    }

    #[test]
    fn build_start_stop_delete_set_transition() {
        let c = client();
        let cases = [
            (c.build_start_workspace("ws-1", None).unwrap(), "start"),
            (c.build_stop_workspace("ws-1", None).unwrap(), "stop"),
            (c.build_delete_workspace("ws-1", None).unwrap(), "delete"),
        ];
        for (req, transition) in cases {
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(
                req.path,
                "http://localhost:3000/api/v2/workspaces/ws-1/builds"
            );
            assert_eq!(body_json(&req), serde_json::json!({"transition": transition}));
        }
    }

    #[test]
    fn build_workspace_build_includes_template_version() {
        let req = client()
            .build_start_workspace("ws-1", Some("tv-2"))
            .unwrap();
        assert_eq!(
            body_json(&req),
            serde_json::json!({"transition": "start", "template_version_id": "tv-2"})
        );
    }

    #[test]
    fn build_cancel_uses_patch() {
        let req = client().build_cancel_workspace_build("b-1");
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/v2/workspacebuilds/b-1/cancel"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn user_scoped_requests_default_to_me() {
        let c = client();
        assert_eq!(
            c.build_get_user_ssh_key(None).path,
            "http://localhost:3000/api/v2/users/me/gitsshkey"
        );
        let regenerate = c.build_regenerate_user_ssh_key(None);
        assert_eq!(regenerate.method, HttpMethod::Put);
        assert_eq!(
            regenerate.path,
            "http://localhost:3000/api/v2/users/me/gitsshkey"
        );
        assert_eq!(
            c.build_get_user_ssh_key(Some("u-1")).path,
            "http://localhost:3000/api/v2/users/u-1/gitsshkey"
        );
        assert_eq!(
            c.build_get_workspace_by_owner_and_name("org", None, "dev").path,
            "http://localhost:3000/api/v2/organizations/org/workspaces/me/dev"
        );
    }

    #[test]
    fn path_parameters_are_not_escaped() {
        let req = client().build_get_template_by_name("org", "my template");
        assert_eq!(
            req.path,
            "http://localhost:3000/api/v2/organizations/org/templates/my template"
        );
    }

    #[test]
    fn build_update_user_password_sends_password_only() {
        let req = client().build_update_user_password("s3cret", "u-1").unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/v2/users/u-1/password");
        assert_eq!(body_json(&req), serde_json::json!({"password": "s3cret"}));
    }

    #[test]
    fn build_update_user_roles_wraps_roles() {
        let roles = vec!["admin".to_string(), "member".to_string()];
        let req = client().build_update_user_roles(&roles, "u-1").unwrap();
        assert_eq!(req.path, "http://localhost:3000/api/v2/users/u-1/roles");
        assert_eq!(
            body_json(&req),
            serde_json::json!({"roles": ["admin", "member"]})
        );
    }

    #[test]
    fn build_put_workspace_autostart_sends_null_schedule() {
        let req = client()
            .build_put_workspace_autostart(
                "ws-1",
                &UpdateWorkspaceAutostartRequest { schedule: None },
            )
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/v2/workspaces/ws-1/autostart"
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"schedule":null}"#));
    }

    #[test]
    fn parse_json_success() {
        let info: BuildInfoResponse = client()
            .parse_json(response(
                200,
                r#"{"external_url":"file:///mock-url","version":"v99.999.9999+c9cdf14"}"#,
            ))
            .unwrap();
        assert_eq!(info.version, "v99.999.9999+c9cdf14");
    }

    #[test]
    fn parse_json_accepts_any_2xx() {
        let result: UserAuthorizationResponse = client()
            .parse_json(response(201, r#"{"readAllUsers":true}"#))
            .unwrap();
        assert_eq!(result.get("readAllUsers"), Some(&true));
    }

    #[test]
    fn parse_json_not_found_carries_message() {
        let err = client()
            .parse_json::<Workspace>(response(404, r#"{"message":"workspace not found"}"#))
            .unwrap_err();
        match err {
            ApiError::NotFound { message } => {
                assert_eq!(message.as_deref(), Some("workspace not found"))
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn parse_json_wrong_status() {
        let err = client()
            .parse_json::<Workspace>(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::HttpError {
                status: 500,
                message: None,
                ..
            }
        ));
    }

    #[test]
    fn parse_json_bad_json() {
        let err = client()
            .parse_json::<Workspace>(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_empty_ignores_body() {
        assert!(client().parse_empty(response(204, "")).is_ok());
        assert!(client().parse_empty(response(200, "")).is_ok());
        assert!(client().parse_empty(response(200, "{}")).is_ok());
    }

    #[test]
    fn parse_empty_rejects_error_status() {
        let err = client()
            .parse_empty(response(403, r#"{"message":"forbidden"}"#))
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.message(), Some("forbidden"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/");
        let req = client.build_get_build_info();
        assert_eq!(req.path, "http://localhost:3000/api/v2/buildinfo");
    }
}
