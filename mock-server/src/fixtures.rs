//! Canned entities served by the mock handlers.
//!
//! Each fixture is built once on first use and never mutated afterwards.
//! Fixtures reference each other (a workspace embeds its latest build, a
//! template points at its active version) so the graph stays consistent.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use workspace_types::{
    AuthMethods, BuildInfoResponse, GenerateApiKeyResponse, GitSshKey, LogLevel, LogSource,
    LoginWithPasswordResponse, Message, Organization, ProvisionerJob, ProvisionerJobLog,
    ProvisionerJobStatus, Role, Template, TemplateVersion, User, UserStatus, Workspace,
    WorkspaceAgent, WorkspaceAgentStatus, WorkspaceBuild, WorkspaceResource, WorkspaceTransition,
};

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("fixture timestamps are valid RFC 3339")
        .with_timezone(&Utc)
}

const CREATED_AT: &str = "2022-05-17T17:39:01.382927298Z";

fn role(name: &str, display_name: &str) -> Role {
    Role {
        name: name.to_string(),
        display_name: display_name.to_string(),
    }
}

pub static MOCK_BUILD_INFO: Lazy<BuildInfoResponse> = Lazy::new(|| BuildInfoResponse {
    external_url: "file:///mock-url".to_string(),
    version: "v99.999.9999+c9cdf14".to_string(),
});

pub static MOCK_SESSION_TOKEN: Lazy<LoginWithPasswordResponse> =
    Lazy::new(|| LoginWithPasswordResponse {
        session_token: "my-session-token".to_string(),
    });

pub static MOCK_API_KEY: Lazy<GenerateApiKeyResponse> = Lazy::new(|| GenerateApiKeyResponse {
    key: "my-api-key".to_string(),
});

pub static MOCK_AUTH_METHODS: Lazy<AuthMethods> = Lazy::new(|| AuthMethods {
    password: true,
    github: false,
    oidc: false,
});

pub static MOCK_ORGANIZATION: Lazy<Organization> = Lazy::new(|| Organization {
    id: "fc0774ce-cc9e-48d4-80ae-88f7a4d4a8b0".to_string(),
    name: "Test Organization".to_string(),
    created_at: timestamp(CREATED_AT),
    updated_at: timestamp(CREATED_AT),
});

pub static MOCK_SITE_ROLES: Lazy<Vec<Role>> =
    Lazy::new(|| vec![role("admin", "Admin"), role("auditor", "Auditor")]);

pub static MOCK_USER: Lazy<User> = Lazy::new(|| User {
    id: "test-user".to_string(),
    email: "test@coder.com".to_string(),
    username: "TestUser".to_string(),
    created_at: timestamp(CREATED_AT),
    status: UserStatus::Active,
    organization_ids: vec![MOCK_ORGANIZATION.id.clone()],
    roles: vec![role("admin", "Admin"), role("member", "Member")],
});

pub static MOCK_USER2: Lazy<User> = Lazy::new(|| User {
    id: "test-user-2".to_string(),
    email: "test2@coder.com".to_string(),
    username: "TestUser2".to_string(),
    created_at: timestamp(CREATED_AT),
    status: UserStatus::Active,
    organization_ids: vec![MOCK_ORGANIZATION.id.clone()],
    roles: vec![role("member", "Member")],
});

pub static MOCK_GIT_SSH_KEY: Lazy<GitSshKey> = Lazy::new(|| GitSshKey {
    user_id: MOCK_USER.id.clone(),
    created_at: timestamp("2022-05-16T14:30:34.148205897Z"),
    updated_at: timestamp("2022-05-16T15:29:10.302441433Z"),
    public_key: "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIFJOQRIM7kE30rOzrfy+/+R+nQGCk7S9pioihy+2ARbq"
        .to_string(),
});

pub static MOCK_PROVISIONER_JOB: Lazy<ProvisionerJob> = Lazy::new(|| ProvisionerJob {
    id: "test-provisioner-job".to_string(),
    created_at: timestamp(CREATED_AT),
    started_at: Some(timestamp("2022-05-17T17:39:02.000000000Z")),
    completed_at: Some(timestamp("2022-05-17T17:39:30.000000000Z")),
    error: None,
    status: ProvisionerJobStatus::Succeeded,
    worker_id: None,
});

pub static MOCK_TEMPLATE_VERSION: Lazy<TemplateVersion> = Lazy::new(|| TemplateVersion {
    id: "test-template-version".to_string(),
    template_id: Some("test-template".to_string()),
    created_at: timestamp(CREATED_AT),
    updated_at: timestamp(CREATED_AT),
    name: "test-version".to_string(),
    job: (*MOCK_PROVISIONER_JOB).clone(),
    readme: "---\nname:Template test\n---\n## Instructions\nYou can add instructions here\n"
        .to_string(),
    created_by_id: "test-creator-id".to_string(),
    created_by_name: "test_creator".to_string(),
});

pub static MOCK_TEMPLATE: Lazy<Template> = Lazy::new(|| Template {
    id: "test-template".to_string(),
    created_at: timestamp(CREATED_AT),
    updated_at: timestamp(CREATED_AT),
    organization_id: MOCK_ORGANIZATION.id.clone(),
    name: "test-template".to_string(),
    provisioner: "terraform".to_string(),
    active_version_id: MOCK_TEMPLATE_VERSION.id.clone(),
    workspace_owner_count: 1,
    description: "This is a test description.".to_string(),
    max_ttl_ms: 7 * 24 * 60 * 60 * 1000,
    min_autostart_interval_ms: 60 * 60 * 1000,
    created_by_id: "test-creator-id".to_string(),
    created_by_name: "test_creator".to_string(),
});

pub static MOCK_WORKSPACE_AGENT: Lazy<WorkspaceAgent> = Lazy::new(|| WorkspaceAgent {
    id: "test-workspace-agent".to_string(),
    created_at: timestamp(CREATED_AT),
    updated_at: timestamp(CREATED_AT),
    first_connected_at: Some(timestamp(CREATED_AT)),
    last_connected_at: Some(timestamp(CREATED_AT)),
    disconnected_at: None,
    status: WorkspaceAgentStatus::Connected,
    name: "a-workspace-agent".to_string(),
    resource_id: "test-workspace-resource".to_string(),
    instance_id: None,
    architecture: "amd64".to_string(),
    environment_variables: Default::default(),
    operating_system: "linux".to_string(),
    startup_script: None,
    directory: Some("/home/coder".to_string()),
});

pub static MOCK_WORKSPACE_RESOURCE: Lazy<WorkspaceResource> = Lazy::new(|| WorkspaceResource {
    id: "test-workspace-resource".to_string(),
    created_at: timestamp(CREATED_AT),
    job_id: MOCK_PROVISIONER_JOB.id.clone(),
    workspace_transition: WorkspaceTransition::Start,
    resource_type: "google_compute_disk".to_string(),
    name: "a-workspace-resource".to_string(),
    agents: vec![(*MOCK_WORKSPACE_AGENT).clone()],
});

pub static MOCK_WORKSPACE_RESOURCE2: Lazy<WorkspaceResource> = Lazy::new(|| WorkspaceResource {
    id: "test-workspace-resource-2".to_string(),
    created_at: timestamp(CREATED_AT),
    job_id: MOCK_PROVISIONER_JOB.id.clone(),
    workspace_transition: WorkspaceTransition::Start,
    resource_type: "google_compute_disk".to_string(),
    name: "another-workspace-resource".to_string(),
    agents: Vec::new(),
});

fn workspace_build(id: &str, build_number: u32, transition: WorkspaceTransition) -> WorkspaceBuild {
    WorkspaceBuild {
        id: id.to_string(),
        created_at: timestamp(CREATED_AT),
        updated_at: timestamp(CREATED_AT),
        workspace_id: "759f1d46-3174-453d-aa60-980a9c1442f3".to_string(),
        workspace_name: "test-workspace".to_string(),
        workspace_owner_id: MOCK_USER.id.clone(),
        workspace_owner_name: MOCK_USER.username.clone(),
        template_version_id: MOCK_TEMPLATE_VERSION.id.clone(),
        build_number,
        name: "a-workspace-build".to_string(),
        transition,
        initiator_id: MOCK_USER.id.clone(),
        initiator_name: MOCK_USER.username.clone(),
        job: (*MOCK_PROVISIONER_JOB).clone(),
        deadline: Some(timestamp("2022-05-17T23:39:00.000000000Z")),
    }
}

pub static MOCK_WORKSPACE_BUILD: Lazy<WorkspaceBuild> =
    Lazy::new(|| workspace_build("1", 1, WorkspaceTransition::Start));

pub static MOCK_WORKSPACE_BUILD_STOP: Lazy<WorkspaceBuild> =
    Lazy::new(|| workspace_build("2", 2, WorkspaceTransition::Stop));

pub static MOCK_WORKSPACE_BUILD_DELETE: Lazy<WorkspaceBuild> =
    Lazy::new(|| workspace_build("3", 3, WorkspaceTransition::Delete));

pub static MOCK_BUILDS: Lazy<Vec<WorkspaceBuild>> = Lazy::new(|| {
    vec![
        (*MOCK_WORKSPACE_BUILD).clone(),
        (*MOCK_WORKSPACE_BUILD_STOP).clone(),
    ]
});

pub static MOCK_WORKSPACE: Lazy<Workspace> = Lazy::new(|| Workspace {
    id: "test-workspace".to_string(),
    created_at: timestamp(CREATED_AT),
    updated_at: timestamp(CREATED_AT),
    owner_id: MOCK_USER.id.clone(),
    owner_name: MOCK_USER.username.clone(),
    template_id: MOCK_TEMPLATE.id.clone(),
    template_name: MOCK_TEMPLATE.name.clone(),
    latest_build: (*MOCK_WORKSPACE_BUILD).clone(),
    outdated: false,
    name: "Test-Workspace".to_string(),
    autostart_schedule: Some("CRON_TZ=UTC 30 9 * * 1-5".to_string()),
    ttl_ms: Some(2 * 60 * 60 * 1000),
});

fn build_log(id: &str, log_level: LogLevel, stage: &str, output: &str) -> ProvisionerJobLog {
    ProvisionerJobLog {
        id: id.to_string(),
        created_at: timestamp(CREATED_AT),
        log_source: LogSource::ProvisionerDaemon,
        log_level,
        stage: stage.to_string(),
        output: output.to_string(),
    }
}

pub static MOCK_WORKSPACE_BUILD_LOGS: Lazy<Vec<ProvisionerJobLog>> = Lazy::new(|| {
    vec![
        build_log("836f8ab6-5202-4711-afa5-293394ced011", LogLevel::Info, "Setting up", ""),
        build_log("2db0ae92-b310-4a6e-8b1f-23380b70ac7f", LogLevel::Info, "Starting workspace", ""),
        build_log(
            "37a5b7b1-b3eb-47cf-b80b-bd16e2e08a3d",
            LogLevel::Info,
            "Starting workspace",
            "Initializing the backend...",
        ),
        build_log(
            "5e4e37a1-c217-48bc-84f5-7f1c3efbd042",
            LogLevel::Info,
            "Starting workspace",
            "Apply complete! Resources: 1 added, 0 changed, 0 destroyed.",
        ),
        build_log("af2c3c8c-4b8d-4a4a-9b6a-f2a2b3f5c1f0", LogLevel::Info, "Cleaning Up", ""),
    ]
});

pub static MOCK_CANCELLATION_MESSAGE: Lazy<Message> = Lazy::new(|| Message {
    message: "Job successfully canceled".to_string(),
    detail: None,
});

/// Message returned when a workspace lookup by name misses.
pub const WORKSPACE_NOT_FOUND: &str = "workspace not found";
