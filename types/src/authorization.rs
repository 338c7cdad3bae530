//! Permission checks (`POST /api/v2/users/{id}/authorization`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The resource a permission check is evaluated against. Unset scoping
/// fields are left out of the JSON so the server treats them as wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserAuthorizationObject {
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuthorization {
    pub object: UserAuthorizationObject,
    pub action: String,
}

/// A named set of checks. The response answers each key with a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserAuthorizationRequest {
    pub checks: BTreeMap<String, UserAuthorization>,
}

pub type UserAuthorizationResponse = BTreeMap<String, bool>;

pub const READ_ALL_USERS: &str = "readAllUsers";
pub const UPDATE_USERS: &str = "updateUsers";
pub const CREATE_USER: &str = "createUser";
pub const CREATE_TEMPLATES: &str = "createTemplates";
pub const DELETE_TEMPLATES: &str = "deleteTemplates";
pub const VIEW_AUDIT_LOG: &str = "viewAuditLog";

fn check(resource_type: &str, action: &str) -> UserAuthorization {
    UserAuthorization {
        object: UserAuthorizationObject {
            resource_type: resource_type.to_string(),
            ..Default::default()
        },
        action: action.to_string(),
    }
}

/// The fixed set of site-wide permissions the front end asks about after
/// sign-in.
pub fn permissions_to_check() -> BTreeMap<String, UserAuthorization> {
    [
        (READ_ALL_USERS, check("user", "read")),
        (UPDATE_USERS, check("user", "update")),
        (CREATE_USER, check("user", "create")),
        (CREATE_TEMPLATES, check("template", "update")),
        (DELETE_TEMPLATES, check("template", "delete")),
        (VIEW_AUDIT_LOG, check("audit_log", "read")),
    ]
    .into_iter()
    .map(|(key, auth)| (key.to_string(), auth))
    .collect()
}

impl UserAuthorizationRequest {
    /// Request covering every key of [`permissions_to_check`].
    pub fn all_permissions() -> Self {
        Self {
            checks: permissions_to_check(),
        }
    }
}
