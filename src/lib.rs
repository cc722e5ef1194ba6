//! hcp-vault-secrets - Rust client for HashiCorp Cloud Platform Vault Secrets
//!
//! Client initialization:
//! 1. client credentials → OAuth bearer token
//! 2. no organization ID → first organization of the account
//! 3. no project ID → first project, or the project with the configured name
//!
//! Afterwards every operation is a single authenticated request against the
//! configured application.

mod auth;
mod client;
mod config;
mod error;
mod models;
mod scope;
mod secrets;
mod transport;

pub use client::{Client, ClientBuilder};
pub use config::{
    DEFAULT_AUDIENCE, DEFAULT_RESOURCE_MANAGER_URL, DEFAULT_SECRETS_URL, DEFAULT_TIMEOUT,
    DEFAULT_TOKEN_URL, Endpoints,
};
pub use error::{ErrorKind, VaultSecretsError};
pub use models::{Organization, Project, Secret, User, Version};
pub use secrets::MAX_SECRET_VERSIONS;
