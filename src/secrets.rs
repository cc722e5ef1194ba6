use crate::client::Client;
use crate::error::VaultSecretsError;
use crate::models::Secret;
use serde::{Deserialize, Serialize};

/// Versions the service retains per secret; a secret at this count must be
/// deleted before it can be written again.
pub const MAX_SECRET_VERSIONS: u32 = 20;

#[derive(Deserialize)]
struct SecretResponse {
    secret: Secret,
}

#[derive(Deserialize)]
struct ListSecretsResponse {
    #[serde(default)]
    secrets: Vec<Secret>,
}

#[derive(Serialize)]
struct CreateSecretRequest<'a> {
    name: &'a str,
    value: &'a str,
}

/// A secret name always addresses exactly one path segment; `.` and `..`
/// would be collapsed by URL normalization and are refused.
fn secret_segment(name: &str) -> Result<&str, VaultSecretsError> {
    match name {
        "" | "." | ".." => Err(VaultSecretsError::InvalidSecretName(name.to_string())),
        _ => Ok(name),
    }
}

impl Client {
    /// Fetches a secret together with the plaintext of its current version.
    pub async fn get_secret(&self, name: &str) -> Result<Secret, VaultSecretsError> {
        let url = self.app_resource_url(&["open", secret_segment(name)?])?;
        let response: SecretResponse = self.get_json(&url, &[]).await?;
        Ok(response.secret)
    }

    pub async fn latest_secret_version(&self, name: &str) -> Result<u32, VaultSecretsError> {
        Ok(self.get_secret(name).await?.latest_version)
    }

    /// Creates a secret, or a new version of an existing one.
    ///
    /// Refuses to write when the secret already holds
    /// [`MAX_SECRET_VERSIONS`] versions. A secret that does not exist yet is
    /// treated as having no versions; any other failure of the version lookup
    /// is returned.
    pub async fn create_secret(&self, name: &str, value: &str) -> Result<Secret, VaultSecretsError> {
        let url = self.app_resource_url(&["kv"])?;
        secret_segment(name)?;

        let latest_version = match self.latest_secret_version(name).await {
            Ok(version) => version,
            Err(e) if e.is_not_found() => {
                tracing::debug!(secret = name, "Secret does not exist yet");
                0
            }
            Err(e) => return Err(e),
        };

        if latest_version >= MAX_SECRET_VERSIONS {
            return Err(VaultSecretsError::VersionLimit {
                name: name.to_string(),
                versions: latest_version,
            });
        }

        let response: SecretResponse = self
            .post_json(&url, &CreateSecretRequest { name, value })
            .await?;

        tracing::debug!(
            secret = name,
            version = response.secret.latest_version,
            "Created secret version"
        );
        Ok(response.secret)
    }

    /// Names of all secrets in the application, in server order.
    pub async fn list_secrets(&self) -> Result<Vec<String>, VaultSecretsError> {
        let url = self.app_resource_url(&["secrets"])?;
        let response: ListSecretsResponse = self.get_json(&url, &[]).await?;
        Ok(response.secrets.into_iter().map(|s| s.name).collect())
    }

    /// Every secret of the application with its value, in list order.
    ///
    /// Secrets are fetched one after another; the first failure is returned
    /// and nothing fetched so far is kept.
    pub async fn get_all_secrets(&self) -> Result<Vec<Secret>, VaultSecretsError> {
        let names = self.list_secrets().await?;

        let mut secrets = Vec::with_capacity(names.len());
        for name in &names {
            secrets.push(self.get_secret(name).await?);
        }

        Ok(secrets)
    }

    pub async fn delete_secret(&self, name: &str) -> Result<(), VaultSecretsError> {
        let url = self.app_resource_url(&["secrets", secret_segment(name)?])?;
        self.delete(&url).await?;
        tracing::debug!(secret = name, "Deleted secret");
        Ok(())
    }
}
