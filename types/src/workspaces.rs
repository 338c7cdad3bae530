//! Workspaces, their builds and the resources a build provisions.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provisioners::ProvisionerJob;

/// Lifecycle action requested by a workspace build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceTransition {
    Start,
    Stop,
    Delete,
}

impl WorkspaceTransition {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkspaceTransition::Start => "start",
            WorkspaceTransition::Stop => "stop",
            WorkspaceTransition::Delete => "delete",
        }
    }
}

impl fmt::Display for WorkspaceTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceBuild {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub workspace_id: String,
    pub workspace_name: String,
    pub workspace_owner_id: String,
    pub workspace_owner_name: String,
    pub template_version_id: String,
    pub build_number: u32,
    pub name: String,
    pub transition: WorkspaceTransition,
    pub initiator_id: String,
    pub initiator_name: String,
    pub job: ProvisionerJob,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: String,
    pub owner_name: String,
    pub template_id: String,
    pub template_name: String,
    pub latest_build: WorkspaceBuild,
    pub outdated: bool,
    pub name: String,
    #[serde(default)]
    pub autostart_schedule: Option<String>,
    #[serde(default)]
    pub ttl_ms: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceAgentStatus {
    Connecting,
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceAgent {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub first_connected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_connected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disconnected_at: Option<DateTime<Utc>>,
    pub status: WorkspaceAgentStatus,
    pub name: String,
    pub resource_id: String,
    #[serde(default)]
    pub instance_id: Option<String>,
    pub architecture: String,
    #[serde(default)]
    pub environment_variables: BTreeMap<String, String>,
    pub operating_system: String,
    #[serde(default)]
    pub startup_script: Option<String>,
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceResource {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub job_id: String,
    pub workspace_transition: WorkspaceTransition,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub agents: Vec<WorkspaceAgent>,
}

/// Optional filters for listing workspaces. Each is sent as a query pair
/// only when set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkspaceFilter {
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorkspaceBuildRequest {
    pub transition: WorkspaceTransition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateParameterRequest {
    pub name: String,
    pub source_value: String,
    pub source_scheme: String,
    pub destination_scheme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub template_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autostart_schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_values: Vec<CreateParameterRequest>,
}

/// `schedule: None` is sent as `null` and clears the autostart schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWorkspaceAutostartRequest {
    pub schedule: Option<String>,
}

/// `ttl_ms: None` is sent as `null` and disables autostop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWorkspaceTtlRequest {
    pub ttl_ms: Option<i64>,
}

/// Generic acknowledgement or error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
