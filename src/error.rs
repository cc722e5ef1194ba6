use thiserror::Error;

/// Coarse classification of [`VaultSecretsError`] for callers that branch on
/// the failure class rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    Auth,
    Service,
    Decode,
    VersionLimit,
    Resolution,
}

#[derive(Debug, Error)]
pub enum VaultSecretsError {
    #[error("Missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid secret name: {0:?}")]
    InvalidSecretName(String),

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication error: {description}, HTTP status: {status}")]
    Auth {
        status: u16,
        error: String,
        description: String,
    },

    #[error("Client is not authenticated")]
    NotAuthenticated,

    #[error("VaultSecrets error: {message}, HTTP status: {status}")]
    Service {
        status: u16,
        code: i64,
        message: String,
    },

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(
        "Secret {name} already has {versions} versions - it will need to be deleted before creating a new version"
    )]
    VersionLimit { name: String, versions: u32 },

    #[error("No organizations found for the service principal")]
    NoOrganizations,

    #[error("No projects found in organization {organization_id}")]
    NoProjects { organization_id: String },

    #[error("Scope not resolved: {0} is unknown")]
    UnresolvedScope(&'static str),
}

impl VaultSecretsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingConfig(_) | Self::InvalidUrl(_) | Self::InvalidSecretName(_) => {
                ErrorKind::Config
            }
            Self::Transport(_) => ErrorKind::Transport,
            Self::Auth { .. } | Self::NotAuthenticated => ErrorKind::Auth,
            Self::Service { .. } => ErrorKind::Service,
            Self::Decode(_) => ErrorKind::Decode,
            Self::VersionLimit { .. } => ErrorKind::VersionLimit,
            Self::NoOrganizations | Self::NoProjects { .. } | Self::UnresolvedScope(_) => {
                ErrorKind::Resolution
            }
        }
    }

    /// HTTP status of a rejected request, if the API answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Service { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Service { status: 404, .. })
    }
}
