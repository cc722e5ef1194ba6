use crate::client::Client;
use crate::error::VaultSecretsError;
use reqwest::Method;
use serde::{Deserialize, Serialize};

const GRANT_TYPE: &str = "client_credentials";

#[derive(Serialize)]
struct TokenRequest<'a> {
    audience: &'a str,
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
}

impl Client {
    /// Exchanges the client credentials for a bearer token.
    ///
    /// The token is stored only on success; it is never refreshed.
    pub async fn authenticate(&mut self) -> Result<(), VaultSecretsError> {
        let request = TokenRequest {
            audience: &self.endpoints.audience,
            grant_type: GRANT_TYPE,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        };

        let data = self
            .transport
            .send(Method::POST, &self.endpoints.token_url, &[], Some(&request), None)
            .await?;

        let token: TokenResponse = serde_json::from_slice(&data)?;
        if token.access_token.is_empty() {
            return Err(VaultSecretsError::NotAuthenticated);
        }

        tracing::debug!(token_type = %token.token_type, "Obtained access token");
        self.access_token = Some(token.access_token);
        Ok(())
    }
}
