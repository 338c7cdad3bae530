//! Wire DTOs shared by the workspace API client and the mock server.
//!
//! # Design
//! Every type here is a plain serde struct or enum whose JSON shape matches
//! the server's v2 REST API. Identifiers are opaque strings: the server hands
//! out UUIDs, but nothing on the client side depends on that, so they are
//! never parsed or validated. Timestamps decode into `chrono::DateTime<Utc>`.
//!
//! Both the client crate and the mock server depend on this crate, which is
//! the only coupling between them.

pub mod authorization;
pub mod build_info;
pub mod organizations;
pub mod provisioners;
pub mod templates;
pub mod users;
pub mod workspaces;

pub use authorization::{
    permissions_to_check, UserAuthorization, UserAuthorizationObject, UserAuthorizationRequest,
    UserAuthorizationResponse,
};
pub use build_info::BuildInfoResponse;
pub use organizations::Organization;
pub use provisioners::{
    LogLevel, LogSource, ProvisionerDaemon, ProvisionerJob, ProvisionerJobLog,
    ProvisionerJobStatus,
};
pub use templates::{CreateTemplateRequest, ParameterSchema, Template, TemplateVersion};
pub use users::{
    AuthMethods, CreateUserRequest, GenerateApiKeyResponse, GitSshKey, LoginWithPasswordRequest,
    LoginWithPasswordResponse, Role, UpdateRoles, UpdateUserPasswordRequest,
    UpdateUserProfileRequest, User, UserStatus,
};
pub use workspaces::{
    CreateParameterRequest, CreateWorkspaceBuildRequest, CreateWorkspaceRequest, Message,
    UpdateWorkspaceAutostartRequest, UpdateWorkspaceTtlRequest, Workspace, WorkspaceAgent,
    WorkspaceAgentStatus, WorkspaceBuild, WorkspaceFilter, WorkspaceResource, WorkspaceTransition,
};
