//! Systems `rad init` talks to: the kubeconfig, Helm, the control plane's
//! resource API, and the Azure and AWS command line tools.
//!
//! The wizard only sees the traits in this module. The submodules hold thin
//! implementations that shell out or issue plain HTTP requests.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::config::ConfigStore;
use crate::model::{AwsCredential, AzureCredential, Workspace};

pub mod aws;
pub mod azure;
mod exec;
pub mod helm;
pub mod kube;
pub mod management;
pub mod recipes;
pub mod scaffold;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KubeConfigSummary {
    pub current: String,
    pub contexts: BTreeMap<String, KubeContext>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KubeContext {
    pub cluster: String,
    pub namespace: Option<String>,
}

pub trait KubeContexts: Send + Sync {
    fn contexts(&self) -> Result<KubeConfigSummary>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallState {
    pub installed: bool,
    pub version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterInstallOptions {
    pub namespace: String,
    pub version: String,
    pub set_values: Vec<String>,
}

pub trait Helm: Send + Sync {
    fn check_installed(&self, context: &str) -> Result<InstallState>;

    /// Returns `true` when a release was installed or upgraded.
    fn install(&self, context: &str, options: &ClusterInstallOptions) -> Result<bool>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentSummary {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProperties {
    pub compute: KubernetesCompute,
    #[serde(skip_serializing_if = "EnvironmentProviders::is_empty")]
    pub providers: EnvironmentProviders,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub recipes: RecipeMap,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KubernetesCompute {
    pub kind: String,
    pub namespace: String,
}

impl KubernetesCompute {
    pub fn in_namespace(namespace: &str) -> Self {
        Self {
            kind: "kubernetes".to_string(),
            namespace: namespace.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentProviders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure: Option<ProviderScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws: Option<ProviderScope>,
}

impl EnvironmentProviders {
    pub fn is_empty(&self) -> bool {
        self.azure.is_none() && self.aws.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderScope {
    pub scope: String,
}

/// Resource type -> recipe name -> recipe.
pub type RecipeMap = BTreeMap<String, BTreeMap<String, RecipeProperties>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeProperties {
    pub template_kind: String,
    pub template_path: String,
}

pub trait ManagementClient {
    fn list_environments(&self) -> Result<Vec<EnvironmentSummary>>;

    /// Create or update resource group `name` in `plane` (e.g. `radius`).
    fn create_resource_group(&self, plane: &str, name: &str) -> Result<()>;

    fn create_environment(
        &self,
        name: &str,
        location: &str,
        properties: &EnvironmentProperties,
    ) -> Result<()>;

    fn create_application_if_not_found(&self, name: &str, environment_id: &str) -> Result<()>;
}

pub trait CredentialClient {
    fn put_azure(&self, credential: &AzureCredential) -> Result<()>;
    fn put_aws(&self, credential: &AwsCredential) -> Result<()>;
}

/// Builds API clients bound to a workspace's connection and scope.
pub trait ConnectionFactory: Send + Sync {
    fn management_client(&self, workspace: &Workspace) -> Result<Box<dyn ManagementClient>>;
    fn credential_client(&self, workspace: &Workspace) -> Result<Box<dyn CredentialClient>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionList {
    pub default: Option<Subscription>,
    pub subscriptions: Vec<Subscription>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub display_name: String,
}

pub trait AzureClient: Send + Sync {
    fn subscriptions(&self) -> Result<SubscriptionList>;
    fn resource_groups(&self, subscription_id: &str) -> Result<Vec<String>>;
    fn resource_group_exists(&self, subscription_id: &str, name: &str) -> Result<bool>;
    fn locations(&self, subscription_id: &str) -> Result<Vec<Location>>;
    fn create_resource_group(&self, subscription_id: &str, name: &str, location: &str)
    -> Result<()>;
}

pub trait AwsClient: Send + Sync {
    /// Account id of the identity behind `credential`.
    fn caller_identity(&self, region: &str, credential: &AwsCredential) -> Result<String>;
    fn list_regions(&self, region: &str, credential: &AwsCredential) -> Result<Vec<String>>;
}

pub trait DevRecipeClient: Send + Sync {
    fn dev_recipes(&self) -> Result<RecipeMap>;
}

pub trait Scaffolder: Send + Sync {
    /// Write starter files for `app_name` into `dir`, keeping existing ones.
    fn scaffold(&self, dir: &Path, app_name: &str) -> Result<()>;
}

/// Everything the init runner needs besides the prompter.
pub struct Clients {
    pub kube: Box<dyn KubeContexts>,
    pub helm: Box<dyn Helm>,
    pub connections: Box<dyn ConnectionFactory>,
    pub azure: Box<dyn AzureClient>,
    pub aws: Box<dyn AwsClient>,
    pub recipes: Box<dyn DevRecipeClient>,
    pub scaffolder: Box<dyn Scaffolder>,
    pub config: Box<dyn ConfigStore>,
}

impl Clients {
    /// Real implementations backed by local tools and the control plane API.
    pub fn system(config: Box<dyn ConfigStore>) -> Result<Self> {
        Ok(Self {
            kube: Box::new(kube::KubeConfigFile::from_env()?),
            helm: Box::new(helm::HelmCli::default()),
            connections: Box::new(management::HttpConnectionFactory::from_env()),
            azure: Box::new(azure::AzCli),
            aws: Box::new(aws::AwsCli),
            recipes: Box::new(recipes::BuiltinDevRecipes),
            scaffolder: Box::new(scaffold::FileScaffolder),
            config,
        })
    }
}
