use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{
    ConnectionFactory, CredentialClient, EnvironmentProperties, EnvironmentSummary,
    ManagementClient,
};
use crate::model::{AwsCredential, AzureCredential, Workspace, application_id};

pub const ENDPOINT_ENV: &str = "RAD_UCP_ENDPOINT";
/// Reached through `kubectl proxy` on its default port.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8001/apis/api.ucp.dev/v1alpha3";
pub const API_VERSION: &str = "2023-10-01-preview";
pub const LOCATION_GLOBAL: &str = "global";

const AZURE_CREDENTIAL_PATH: &str =
    "/planes/azure/azurecloud/providers/System.Azure/credentials/default";
const AWS_CREDENTIAL_PATH: &str = "/planes/aws/aws/providers/System.AWS/credentials/default";

#[derive(Clone, Debug)]
pub struct HttpConnectionFactory {
    base_url: String,
}

impl HttpConnectionFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        match std::env::var(ENDPOINT_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_ENDPOINT),
        }
    }

    fn connect(&self, workspace: &Workspace) -> Result<HttpApi> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("rad/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build reqwest client")?;
        tracing::debug!(
            base_url = %self.base_url,
            context = %workspace.connection.context,
            "connecting to control plane"
        );
        Ok(HttpApi {
            base_url: self.base_url.clone(),
            scope: workspace.scope.clone(),
            client,
        })
    }
}

impl ConnectionFactory for HttpConnectionFactory {
    fn management_client(&self, workspace: &Workspace) -> Result<Box<dyn ManagementClient>> {
        Ok(Box::new(self.connect(workspace)?))
    }

    fn credential_client(&self, workspace: &Workspace) -> Result<Box<dyn CredentialClient>> {
        Ok(Box::new(self.connect(workspace)?))
    }
}

struct HttpApi {
    base_url: String,
    scope: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct ResourceList {
    #[serde(default)]
    value: Vec<ResourceSummary>,
}

#[derive(Debug, Deserialize)]
struct ResourceSummary {
    #[serde(default)]
    id: String,
    name: String,
}

impl HttpApi {
    fn url(&self, path: &str) -> String {
        format!("{}{}?api-version={}", self.base_url, path, API_VERSION)
    }

    fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED
            || resp.status() == reqwest::StatusCode::FORBIDDEN
        {
            anyhow::bail!(
                "{}: access denied by the control plane ({}); check your kubeconfig credentials",
                label,
                resp.status()
            );
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    fn put(&self, path: &str, body: &Value, label: &str) -> Result<()> {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .with_context(|| label.to_string())?;
        self.ensure_ok(resp, label)?;
        Ok(())
    }
}

impl ManagementClient for HttpApi {
    fn list_environments(&self) -> Result<Vec<EnvironmentSummary>> {
        let resp = self
            .client
            .get(self.url("/planes/radius/local/providers/Applications.Core/environments"))
            .send()
            .context("list environments")?;
        let list: ResourceList = self
            .ensure_ok(resp, "list environments")?
            .json()
            .context("parse environment list")?;
        Ok(list
            .value
            .into_iter()
            .map(|r| EnvironmentSummary {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    fn create_resource_group(&self, plane: &str, name: &str) -> Result<()> {
        self.put(
            &format!("/planes/{}/local/resourceGroups/{}", plane, name),
            &json!({ "location": LOCATION_GLOBAL }),
            "create resource group",
        )
    }

    fn create_environment(
        &self,
        name: &str,
        location: &str,
        properties: &EnvironmentProperties,
    ) -> Result<()> {
        let body = json!({ "location": location, "properties": properties });
        self.put(
            &format!(
                "{}/providers/Applications.Core/environments/{}",
                self.scope, name
            ),
            &body,
            "create environment",
        )
    }

    fn create_application_if_not_found(&self, name: &str, environment_id: &str) -> Result<()> {
        let path = application_id(&self.scope, name);
        let resp = self
            .client
            .get(self.url(&path))
            .send()
            .context("get application")?;
        if resp.status() != reqwest::StatusCode::NOT_FOUND {
            self.ensure_ok(resp, "get application")?;
            tracing::debug!(application = name, "application already exists");
            return Ok(());
        }

        self.put(
            &path,
            &json!({
                "location": LOCATION_GLOBAL,
                "properties": { "environment": environment_id },
            }),
            "create application",
        )
    }
}

impl CredentialClient for HttpApi {
    fn put_azure(&self, credential: &AzureCredential) -> Result<()> {
        self.put(
            AZURE_CREDENTIAL_PATH,
            &azure_credential_body(credential),
            "put azure credential",
        )
    }

    fn put_aws(&self, credential: &AwsCredential) -> Result<()> {
        self.put(
            AWS_CREDENTIAL_PATH,
            &aws_credential_body(credential),
            "put aws credential",
        )
    }
}

pub(crate) fn azure_credential_body(credential: &AzureCredential) -> Value {
    let properties = match credential {
        AzureCredential::ServicePrincipal {
            client_id,
            client_secret,
            tenant_id,
        } => json!({
            "kind": "ServicePrincipal",
            "clientId": client_id,
            "clientSecret": client_secret,
            "tenantId": tenant_id,
            "storage": { "kind": "Internal" },
        }),
        AzureCredential::WorkloadIdentity {
            client_id,
            tenant_id,
        } => json!({
            "kind": "WorkloadIdentity",
            "clientId": client_id,
            "tenantId": tenant_id,
            "storage": { "kind": "Internal" },
        }),
    };
    json!({
        "location": LOCATION_GLOBAL,
        "type": "System.Azure/credentials",
        "properties": properties,
    })
}

pub(crate) fn aws_credential_body(credential: &AwsCredential) -> Value {
    let properties = match credential {
        AwsCredential::AccessKey {
            access_key_id,
            secret_access_key,
        } => json!({
            "kind": "AccessKey",
            "accessKeyId": access_key_id,
            "secretAccessKey": secret_access_key,
            "storage": { "kind": "Internal" },
        }),
        AwsCredential::Irsa { role_arn } => json!({
            "kind": "IRSA",
            "roleARN": role_arn,
            "storage": { "kind": "Internal" },
        }),
    };
    json!({
        "location": LOCATION_GLOBAL,
        "type": "System.AWS/credentials",
        "properties": properties,
    })
}

#[cfg(test)]
#[path = "../tests/clients/management_tests.rs"]
mod tests;
