use serde::{Deserialize, Serialize};

/// Response of `GET /api/v2/buildinfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfoResponse {
    pub external_url: String,
    pub version: String,
}
