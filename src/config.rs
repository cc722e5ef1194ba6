use std::time::Duration;

pub const DEFAULT_TOKEN_URL: &str = "https://auth.hashicorp.com/oauth/token";
pub const DEFAULT_AUDIENCE: &str = "https://api.hashicorp.cloud";
pub const DEFAULT_RESOURCE_MANAGER_URL: &str =
    "https://api.hashicorp.cloud/resource-manager/2019-12-10";
pub const DEFAULT_SECRETS_URL: &str = "https://api.cloud.hashicorp.com/secrets/2023-06-13";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const ENV_ORGANIZATION_ID: &str = "HCP_ORGANIZATION_ID";
pub(crate) const ENV_PROJECT_ID: &str = "HCP_PROJECT_ID";
pub(crate) const ENV_PROJECT_NAME: &str = "HCP_PROJECT_NAME";
pub(crate) const ENV_APPLICATION_NAME: &str = "HCP_APPLICATION_NAME";
pub(crate) const ENV_CLIENT_ID: &str = "HCP_CLIENT_ID";
pub(crate) const ENV_CLIENT_SECRET: &str = "HCP_CLIENT_SECRET";

/// Remote endpoints the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    pub audience: String,
    pub resource_manager_url: String,
    pub secrets_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            resource_manager_url: DEFAULT_RESOURCE_MANAGER_URL.to_string(),
            secrets_url: DEFAULT_SECRETS_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// All endpoints served from a single origin, e.g. a local mock server.
    /// The audience stays at its default.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{}/oauth/token", base),
            audience: DEFAULT_AUDIENCE.to_string(),
            resource_manager_url: format!("{}/resource-manager/2019-12-10", base),
            secrets_url: format!("{}/secrets/2023-06-13", base),
        }
    }

    pub(crate) fn organizations_url(&self) -> String {
        format!("{}/organizations", self.resource_manager_url.trim_end_matches('/'))
    }

    pub(crate) fn projects_url(&self) -> String {
        format!("{}/projects", self.resource_manager_url.trim_end_matches('/'))
    }

    pub(crate) fn app_url(&self, organization_id: &str, project_id: &str, app: &str) -> String {
        format!(
            "{}/organizations/{}/projects/{}/apps/{}",
            self.secrets_url.trim_end_matches('/'),
            organization_id,
            project_id,
            app
        )
    }
}

/// Reads an environment variable, treating an empty value as unset
pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(non_empty)
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.token_url, "https://auth.hashicorp.com/oauth/token");
        assert_eq!(
            endpoints.organizations_url(),
            "https://api.hashicorp.cloud/resource-manager/2019-12-10/organizations"
        );
        assert_eq!(
            endpoints.projects_url(),
            "https://api.hashicorp.cloud/resource-manager/2019-12-10/projects"
        );
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let endpoints = Endpoints::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(endpoints.token_url, "http://127.0.0.1:8080/oauth/token");
        assert_eq!(endpoints.audience, DEFAULT_AUDIENCE);
        assert_eq!(
            endpoints.app_url("org-1", "proj-1", "my-app"),
            "http://127.0.0.1:8080/secrets/2023-06-13/organizations/org-1/projects/proj-1/apps/my-app"
        );
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }
}
