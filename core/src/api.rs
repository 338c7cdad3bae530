//! Async API: one method per endpoint, one HTTP request per call.
//!
//! # Design
//! `Api` pairs the sans-IO `ApiClient` with a `reqwest::Client`. Each method
//! builds its request, hands it to `execute`, and decodes the response with
//! `parse_json` or `parse_empty`. There is no retry, caching or shared
//! mutable state, so an `Api` can be cloned freely and used from concurrent
//! tasks.

use serde::de::DeserializeOwned;
use tracing::debug;
use workspace_types::{
    AuthMethods, BuildInfoResponse, CreateTemplateRequest, CreateUserRequest,
    CreateWorkspaceRequest, GenerateApiKeyResponse, GitSshKey, LoginWithPasswordResponse, Message,
    Organization, ParameterSchema, ProvisionerJobLog, Role, Template, TemplateVersion,
    UpdateUserProfileRequest, UpdateWorkspaceAutostartRequest, UpdateWorkspaceTtlRequest, User,
    UserAuthorizationRequest, UserAuthorizationResponse, Workspace, WorkspaceBuild,
    WorkspaceFilter, WorkspaceResource, WorkspaceTransition,
};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct Api {
    client: ApiClient,
    http: reqwest::Client,
}

impl Api {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: ApiClient::new(&config.base_url),
            http: builder.build()?,
        })
    }

    pub fn from_url(base_url: &str) -> Result<Self, ApiError> {
        Self::new(&ClientConfig::new(base_url))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Perform the round trip for a prepared request.
    ///
    /// Any status code is returned as data; only a failure to get a response
    /// at all is an error here.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut req = self.http.request(method, &request.path);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        debug!(method = %request.method, url = %request.path, "sending request");
        let response = req.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;
        debug!(method = %request.method, url = %request.path, status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        self.client.parse_json(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<(), ApiError> {
        let response = self.execute(request).await?;
        self.client.parse_empty(response)
    }

    // --- users and sessions ---

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginWithPasswordResponse, ApiError> {
        self.fetch(self.client.build_login(email, password)?).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send(self.client.build_logout()).await
    }

    pub async fn get_user(&self) -> Result<User, ApiError> {
        self.fetch(self.client.build_get_user()).await
    }

    pub async fn get_auth_methods(&self) -> Result<AuthMethods, ApiError> {
        self.fetch(self.client.build_get_auth_methods()).await
    }

    pub async fn check_user_permissions(
        &self,
        user_id: &str,
        params: &UserAuthorizationRequest,
    ) -> Result<UserAuthorizationResponse, ApiError> {
        self.fetch(self.client.build_check_user_permissions(user_id, params)?)
            .await
    }

    pub async fn get_api_key(&self) -> Result<GenerateApiKeyResponse, ApiError> {
        self.fetch(self.client.build_get_api_key()).await
    }

    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch(self.client.build_get_users()).await
    }

    pub async fn create_user(&self, user: &CreateUserRequest) -> Result<User, ApiError> {
        self.fetch(self.client.build_create_user(user)?).await
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        data: &UpdateUserProfileRequest,
    ) -> Result<User, ApiError> {
        self.fetch(self.client.build_update_profile(user_id, data)?)
            .await
    }

    pub async fn suspend_user(&self, user_id: &str) -> Result<User, ApiError> {
        self.fetch(self.client.build_suspend_user(user_id)).await
    }

    /// Resolves to `()`: the server answers without a body.
    pub async fn update_user_password(&self, password: &str, user_id: &str) -> Result<(), ApiError> {
        self.send(self.client.build_update_user_password(password, user_id)?)
            .await
    }

    pub async fn get_site_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.fetch(self.client.build_get_site_roles()).await
    }

    pub async fn update_user_roles(
        &self,
        roles: &[String],
        user_id: &str,
    ) -> Result<User, ApiError> {
        self.fetch(self.client.build_update_user_roles(roles, user_id)?)
            .await
    }

    pub async fn get_user_ssh_key(&self, user_id: Option<&str>) -> Result<GitSshKey, ApiError> {
        self.fetch(self.client.build_get_user_ssh_key(user_id)).await
    }

    pub async fn regenerate_user_ssh_key(
        &self,
        user_id: Option<&str>,
    ) -> Result<GitSshKey, ApiError> {
        self.fetch(self.client.build_regenerate_user_ssh_key(user_id))
            .await
    }

    // --- organizations and templates ---

    pub async fn get_organization(&self, organization_id: &str) -> Result<Organization, ApiError> {
        self.fetch(self.client.build_get_organization(organization_id))
            .await
    }

    pub async fn get_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        self.fetch(self.client.build_get_organizations()).await
    }

    pub async fn get_template(&self, template_id: &str) -> Result<Template, ApiError> {
        self.fetch(self.client.build_get_template(template_id)).await
    }

    pub async fn get_templates(&self, organization_id: &str) -> Result<Vec<Template>, ApiError> {
        self.fetch(self.client.build_get_templates(organization_id))
            .await
    }

    pub async fn get_template_by_name(
        &self,
        organization_id: &str,
        name: &str,
    ) -> Result<Template, ApiError> {
        self.fetch(self.client.build_get_template_by_name(organization_id, name))
            .await
    }

    pub async fn create_template(
        &self,
        organization_id: &str,
        template: &CreateTemplateRequest,
    ) -> Result<Template, ApiError> {
        self.fetch(self.client.build_create_template(organization_id, template)?)
            .await
    }

    pub async fn get_template_version(&self, version_id: &str) -> Result<TemplateVersion, ApiError> {
        self.fetch(self.client.build_get_template_version(version_id))
            .await
    }

    pub async fn get_template_version_schema(
        &self,
        version_id: &str,
    ) -> Result<Vec<ParameterSchema>, ApiError> {
        self.fetch(self.client.build_get_template_version_schema(version_id))
            .await
    }

    pub async fn get_template_version_resources(
        &self,
        version_id: &str,
    ) -> Result<Vec<WorkspaceResource>, ApiError> {
        self.fetch(self.client.build_get_template_version_resources(version_id))
            .await
    }

    // --- workspaces ---

    pub async fn get_workspace(&self, workspace_id: &str) -> Result<Workspace, ApiError> {
        self.fetch(self.client.build_get_workspace(workspace_id)).await
    }

    pub async fn get_workspaces(
        &self,
        filter: Option<&WorkspaceFilter>,
    ) -> Result<Vec<Workspace>, ApiError> {
        self.fetch(self.client.build_get_workspaces(filter)).await
    }

    pub async fn get_workspace_by_owner_and_name(
        &self,
        organization_id: &str,
        owner: Option<&str>,
        workspace_name: &str,
    ) -> Result<Workspace, ApiError> {
        self.fetch(self.client.build_get_workspace_by_owner_and_name(
            organization_id,
            owner,
            workspace_name,
        ))
        .await
    }

    pub async fn create_workspace(
        &self,
        organization_id: &str,
        workspace: &CreateWorkspaceRequest,
    ) -> Result<Workspace, ApiError> {
        self.fetch(self.client.build_create_workspace(organization_id, workspace)?)
            .await
    }

    pub async fn put_workspace_autostart(
        &self,
        workspace_id: &str,
        autostart: &UpdateWorkspaceAutostartRequest,
    ) -> Result<(), ApiError> {
        self.send(self.client.build_put_workspace_autostart(workspace_id, autostart)?)
            .await
    }

    pub async fn put_workspace_autostop(
        &self,
        workspace_id: &str,
        ttl: &UpdateWorkspaceTtlRequest,
    ) -> Result<(), ApiError> {
        self.send(self.client.build_put_workspace_autostop(workspace_id, ttl)?)
            .await
    }

    // --- workspace builds ---

    pub async fn post_workspace_build(
        &self,
        transition: WorkspaceTransition,
        workspace_id: &str,
        template_version_id: Option<&str>,
    ) -> Result<WorkspaceBuild, ApiError> {
        let request =
            self.client
                .build_workspace_build(transition, workspace_id, template_version_id)?;
        self.fetch(request).await
    }

    pub async fn start_workspace(
        &self,
        workspace_id: &str,
        template_version_id: Option<&str>,
    ) -> Result<WorkspaceBuild, ApiError> {
        self.post_workspace_build(WorkspaceTransition::Start, workspace_id, template_version_id)
            .await
    }

    pub async fn stop_workspace(
        &self,
        workspace_id: &str,
        template_version_id: Option<&str>,
    ) -> Result<WorkspaceBuild, ApiError> {
        self.post_workspace_build(WorkspaceTransition::Stop, workspace_id, template_version_id)
            .await
    }

    pub async fn delete_workspace(
        &self,
        workspace_id: &str,
        template_version_id: Option<&str>,
    ) -> Result<WorkspaceBuild, ApiError> {
        self.post_workspace_build(WorkspaceTransition::Delete, workspace_id, template_version_id)
            .await
    }

    pub async fn get_workspace_builds(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<WorkspaceBuild>, ApiError> {
        self.fetch(self.client.build_get_workspace_builds(workspace_id))
            .await
    }

    pub async fn get_workspace_build(&self, build_id: &str) -> Result<WorkspaceBuild, ApiError> {
        self.fetch(self.client.build_get_workspace_build(build_id)).await
    }

    pub async fn get_workspace_resources(
        &self,
        build_id: &str,
    ) -> Result<Vec<WorkspaceResource>, ApiError> {
        self.fetch(self.client.build_get_workspace_resources(build_id))
            .await
    }

    pub async fn get_workspace_build_logs(
        &self,
        build_id: &str,
    ) -> Result<Vec<ProvisionerJobLog>, ApiError> {
        self.fetch(self.client.build_get_workspace_build_logs(build_id))
            .await
    }

    pub async fn cancel_workspace_build(&self, build_id: &str) -> Result<Message, ApiError> {
        self.fetch(self.client.build_cancel_workspace_build(build_id))
            .await
    }

    // --- deployment ---

    pub async fn get_build_info(&self) -> Result<BuildInfoResponse, ApiError> {
        self.fetch(self.client.build_get_build_info()).await
    }
}
