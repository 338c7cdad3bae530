//! Static provisioner daemon list.

use workspace_types::ProvisionerDaemon;

/// Provisioners offered when creating a template. Not fetched from the server.
pub fn provisioners() -> Vec<ProvisionerDaemon> {
    [("terraform", "Terraform"), ("cdr-basic", "Basic")]
        .into_iter()
        .map(|(id, name)| ProvisionerDaemon {
            id: id.to_string(),
            name: name.to_string(),
            created_at: None,
            provisioners: Vec::new(),
        })
        .collect()
}
