use crate::config::{
    DEFAULT_TIMEOUT, ENV_APPLICATION_NAME, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_ORGANIZATION_ID,
    ENV_PROJECT_ID, ENV_PROJECT_NAME, Endpoints, env_var, non_empty,
};
use crate::error::VaultSecretsError;
use crate::transport::Transport;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub struct ClientBuilder {
    organization_id: Option<String>,
    project_id: Option<String>,
    project_name: Option<String>,
    application_name: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    endpoints: Endpoints,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            organization_id: None,
            project_id: None,
            project_name: None,
            application_name: None,
            client_id: None,
            client_secret: None,
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder pre-filled from `HCP_*` environment variables.
    /// Explicit setters called afterwards take precedence.
    pub fn from_env() -> Self {
        Self {
            organization_id: env_var(ENV_ORGANIZATION_ID),
            project_id: env_var(ENV_PROJECT_ID),
            project_name: env_var(ENV_PROJECT_NAME),
            application_name: env_var(ENV_APPLICATION_NAME),
            client_id: env_var(ENV_CLIENT_ID),
            client_secret: env_var(ENV_CLIENT_SECRET),
            ..Self::new()
        }
    }

    /// Builder holding exactly the arguments of [`Client::new`]
    fn from_parts(
        organization_id: Option<String>,
        project_id: Option<String>,
        application_name: String,
        client_id: String,
        client_secret: String,
        project_name: Option<String>,
    ) -> Self {
        Self {
            organization_id,
            project_id,
            project_name,
            application_name: Some(application_name),
            client_id: Some(client_id),
            client_secret: Some(client_secret),
            ..Self::new()
        }
    }

    pub fn organization_id(mut self, id: impl Into<String>) -> Self {
        self.organization_id = Some(id.into());
        self
    }

    pub fn project_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn resolve_config(self) -> Result<ResolvedConfig, VaultSecretsError> {
        let application_name = self
            .application_name
            .and_then(non_empty)
            .ok_or(VaultSecretsError::MissingConfig(ENV_APPLICATION_NAME))?;

        let client_id = self
            .client_id
            .and_then(non_empty)
            .ok_or(VaultSecretsError::MissingConfig(ENV_CLIENT_ID))?;

        let client_secret = self
            .client_secret
            .and_then(non_empty)
            .ok_or(VaultSecretsError::MissingConfig(ENV_CLIENT_SECRET))?;

        Ok(ResolvedConfig {
            organization_id: self.organization_id.and_then(non_empty),
            project_id: self.project_id.and_then(non_empty),
            project_name: self.project_name.and_then(non_empty),
            application_name,
            client_id,
            client_secret,
            endpoints: self.endpoints,
            timeout: self.timeout,
        })
    }

    /// Builds a client without contacting the API.
    ///
    /// The caller is responsible for [`Client::authenticate`] and, when the
    /// scope is unknown, [`Client::populate_organization_id`] and
    /// [`Client::populate_project_id`].
    pub fn build_unauthenticated(self) -> Result<Client, VaultSecretsError> {
        let config = self.resolve_config()?;
        let transport = Transport::new(config.timeout)?;

        Ok(Client {
            organization_id: config.organization_id,
            project_id: config.project_id,
            project_name: config.project_name,
            application_name: config.application_name,
            client_id: config.client_id,
            client_secret: config.client_secret,
            access_token: None,
            endpoints: config.endpoints,
            transport,
        })
    }

    /// Builds, authenticates and resolves missing scope.
    /// Nothing is returned unless every step succeeds.
    pub async fn build(self) -> Result<Client, VaultSecretsError> {
        let mut client = self.build_unauthenticated()?;

        client.authenticate().await?;

        if client.organization_id.is_none() {
            client.populate_organization_id().await?;
        }

        if client.project_id.is_none() {
            client.populate_project_id().await?;
        }

        Ok(client)
    }
}

struct ResolvedConfig {
    organization_id: Option<String>,
    project_id: Option<String>,
    project_name: Option<String>,
    application_name: String,
    client_id: String,
    client_secret: String,
    endpoints: Endpoints,
    timeout: Duration,
}

/// Client for one Vault Secrets application
pub struct Client {
    pub(crate) organization_id: Option<String>,
    pub(crate) project_id: Option<String>,
    pub(crate) project_name: Option<String>,
    pub(crate) application_name: String,
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) access_token: Option<String>,
    pub(crate) endpoints: Endpoints,
    pub(crate) transport: Transport,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("organization_id", &self.organization_id)
            .field("project_id", &self.project_id)
            .field("project_name", &self.project_name)
            .field("application_name", &self.application_name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("authenticated", &self.is_authenticated())
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl Client {
    /// Creates an authenticated client. Organization and project IDs that are
    /// `None` (or empty) are discovered from the account.
    pub async fn new(
        organization_id: Option<String>,
        project_id: Option<String>,
        application_name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        project_name: Option<String>,
    ) -> Result<Self, VaultSecretsError> {
        ClientBuilder::from_parts(
            organization_id,
            project_id,
            application_name.into(),
            client_id.into(),
            client_secret.into(),
            project_name,
        )
        .build()
        .await
    }

    pub async fn from_env() -> Result<Self, VaultSecretsError> {
        ClientBuilder::from_env().build().await
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn bearer_token(&self) -> Result<&str, VaultSecretsError> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(VaultSecretsError::NotAuthenticated)
    }

    /// Base URL of the configured application; fails when the scope is unresolved
    pub(crate) fn app_url(&self) -> Result<String, VaultSecretsError> {
        let organization_id = self
            .organization_id
            .as_deref()
            .ok_or(VaultSecretsError::UnresolvedScope("organization ID"))?;
        let project_id = self
            .project_id
            .as_deref()
            .ok_or(VaultSecretsError::UnresolvedScope("project ID"))?;

        Ok(self
            .endpoints
            .app_url(organization_id, project_id, &self.application_name))
    }

    /// URL of a resource below the application. Each segment is
    /// percent-encoded as one path segment, so `/`, `?` and `#` in a secret
    /// name cannot leave the application scope.
    pub(crate) fn app_resource_url(&self, segments: &[&str]) -> Result<String, VaultSecretsError> {
        let app_url = self.app_url()?;
        let mut url =
            Url::parse(&app_url).map_err(|e| VaultSecretsError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| VaultSecretsError::InvalidUrl(app_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url.to_string())
    }

    pub(crate) async fn get_json<T>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, VaultSecretsError>
    where
        T: DeserializeOwned,
    {
        let token = self.bearer_token()?;
        let data = self
            .transport
            .send(Method::GET, url, query, None::<&()>, Some(token))
            .await?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub(crate) async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, VaultSecretsError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer_token()?;
        let data = self
            .transport
            .send(Method::POST, url, &[], Some(body), Some(token))
            .await?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub(crate) async fn delete(&self, url: &str) -> Result<(), VaultSecretsError> {
        let token = self.bearer_token()?;
        self.transport
            .send(Method::DELETE, url, &[], None::<&()>, Some(token))
            .await?;
        Ok(())
    }
}
