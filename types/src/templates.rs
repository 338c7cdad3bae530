//! Templates, template versions and their parameter schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provisioners::ProvisionerJob;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub organization_id: String,
    pub name: String,
    pub provisioner: String,
    pub active_version_id: String,
    pub workspace_owner_count: u32,
    pub description: String,
    pub max_ttl_ms: i64,
    pub min_autostart_interval_ms: i64,
    pub created_by_id: String,
    pub created_by_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVersion {
    pub id: String,
    #[serde(default)]
    pub template_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub job: ProvisionerJob,
    pub readme: String,
    pub created_by_id: String,
    pub created_by_name: String,
}

/// A parameter a template version accepts at workspace creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub job_id: String,
    pub name: String,
    pub description: String,
    pub default_source_scheme: String,
    pub default_source_value: String,
    pub allow_override_source: bool,
    pub default_destination_scheme: String,
    pub allow_override_destination: bool,
    pub default_refresh: String,
    pub redisplay_value: bool,
    pub validation_error: String,
    pub validation_condition: String,
    pub validation_type_system: String,
    pub validation_value_type: String,
    #[serde(default)]
    pub validation_contains: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub template_version_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ttl_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_autostart_interval_ms: Option<i64>,
}
