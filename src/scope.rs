use crate::client::Client;
use crate::error::VaultSecretsError;
use crate::models::{Organization, Project};
use serde::Deserialize;

#[derive(Deserialize)]
struct OrganizationsResponse {
    #[serde(default)]
    organizations: Vec<Organization>,
}

#[derive(Deserialize)]
struct ProjectsResponse {
    #[serde(default)]
    projects: Vec<Project>,
}

impl Client {
    /// Uses the first organization visible to the service principal.
    pub async fn populate_organization_id(&mut self) -> Result<(), VaultSecretsError> {
        let url = self.endpoints.organizations_url();
        let response: OrganizationsResponse = self.get_json(&url, &[]).await?;

        let organization = response
            .organizations
            .into_iter()
            .next()
            .ok_or(VaultSecretsError::NoOrganizations)?;

        tracing::debug!(organization_id = %organization.id, "Resolved organization");
        self.organization_id = Some(organization.id);
        Ok(())
    }

    /// Resolves the project inside the current organization.
    ///
    /// Without a configured project name the first project is used and its
    /// name recorded. With a name, the project of that exact name is used; if
    /// none matches, the project ID stays unset and no error is returned.
    pub async fn populate_project_id(&mut self) -> Result<(), VaultSecretsError> {
        let organization_id = self
            .organization_id
            .clone()
            .ok_or(VaultSecretsError::UnresolvedScope("organization ID"))?;

        let url = self.endpoints.projects_url();
        let query = [
            ("scope.type", "ORGANIZATION"),
            ("scope.id", organization_id.as_str()),
        ];
        let response: ProjectsResponse = self.get_json(&url, &query).await?;

        if response.projects.is_empty() {
            return Err(VaultSecretsError::NoProjects { organization_id });
        }

        let selected = match self.project_name.as_deref() {
            None => response.projects.into_iter().next(),
            Some(name) => response.projects.into_iter().find(|p| p.name == name),
        };

        match selected {
            Some(project) => {
                tracing::debug!(project_id = %project.id, project_name = %project.name, "Resolved project");
                if self.project_name.is_none() {
                    self.project_name = Some(project.name);
                }
                self.project_id = Some(project.id);
            }
            None => {
                tracing::warn!(
                    project_name = self.project_name.as_deref().unwrap_or_default(),
                    organization_id = %organization_id,
                    "Project not found in organization, project ID left unset"
                );
            }
        }

        Ok(())
    }
}
