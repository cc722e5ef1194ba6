use crate::error::VaultSecretsError;
use bytes::Bytes;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Error body of the OAuth token endpoint
#[derive(Debug, Default, Deserialize)]
struct OAuthErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Error body of the authenticated cloud APIs
#[derive(Debug, Default, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Sends single requests; holds no per-call state.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new(timeout: Duration) -> Result<Self, VaultSecretsError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    /// Sends one request and returns the raw body of a 200 response.
    ///
    /// A request carrying `token` is authenticated; its error responses are
    /// decoded as service errors. Requests without a token only go to the
    /// OAuth endpoint and their error responses are decoded as OAuth errors.
    pub async fn send<B>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Bytes, VaultSecretsError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method.clone(), url);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%method, url, status = status.as_u16(), "Vault Secrets request");

        let data = response.bytes().await?;
        if status != StatusCode::OK {
            return Err(decode_error(status, &data, token.is_some()));
        }

        Ok(data)
    }
}

fn decode_error(status: StatusCode, data: &[u8], authenticated: bool) -> VaultSecretsError {
    let status = status.as_u16();
    let raw = || String::from_utf8_lossy(data).into_owned();

    if authenticated {
        let body = serde_json::from_slice::<ServiceErrorBody>(data).unwrap_or_else(|_| {
            ServiceErrorBody {
                code: 0,
                message: raw(),
            }
        });
        VaultSecretsError::Service {
            status,
            code: body.code,
            message: body.message,
        }
    } else {
        let body = serde_json::from_slice::<OAuthErrorBody>(data).unwrap_or_else(|_| {
            OAuthErrorBody {
                error: String::new(),
                error_description: raw(),
            }
        });
        let description = if body.error_description.is_empty() {
            body.error.clone()
        } else {
            body.error_description
        };
        VaultSecretsError::Auth {
            status,
            error: body.error,
            description,
        }
    }
}
