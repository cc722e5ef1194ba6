use std::process::ExitCode;

use hcp_vault_secrets::{Client, VaultSecretsError};

mod logging;

/// Connects with `HCP_*` credentials from the environment and prints the
/// resolved scope followed by every secret of the application.
#[tokio::main]
async fn main() -> ExitCode {
    let _guard = logging::init_logger();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = ?e.kind(), "{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), VaultSecretsError> {
    let client = Client::from_env().await?;

    println!("Organization ID: {}", client.organization_id().unwrap_or_default());
    println!("Project ID: {}", client.project_id().unwrap_or_default());
    println!("Project Name: {}", client.project_name().unwrap_or_default());

    let secrets = client.get_all_secrets().await?;
    tracing::info!(count = secrets.len(), app = client.application_name(), "Fetched secrets");

    for secret in &secrets {
        println!("{} (v{}): {}", secret.name, secret.latest_version, secret.value());
    }

    Ok(())
}
