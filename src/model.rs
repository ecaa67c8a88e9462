use serde::{Deserialize, Serialize};

mod providers;
pub use self::providers::*;

/// Everything `rad init` has decided to do, built up one section at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitOptions {
    pub cluster: ClusterOptions,
    pub environment: EnvironmentOptions,
    pub cloud_providers: CloudProviderOptions,
    pub recipes: RecipePackOptions,
    pub application: ApplicationOptions,
    /// Extra `key=value` overrides passed to the installer.
    pub set_values: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterOptions {
    pub install: bool,
    pub namespace: String,
    pub context: String,
    pub version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvironmentOptions {
    pub create: bool,
    pub name: String,
    pub namespace: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CloudProviderOptions {
    pub azure: Option<AzureProvider>,
    pub aws: Option<AwsProvider>,
}

impl CloudProviderOptions {
    pub fn is_empty(&self) -> bool {
        self.azure.is_none() && self.aws.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipePackOptions {
    pub dev_recipes: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationOptions {
    pub scaffold: bool,
    pub name: String,
}

/// Snapshot of which execution phases have finished.
///
/// Flags only ever go from `false` to `true`; each send carries the full
/// cumulative state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressMsg {
    pub install_complete: bool,
    pub environment_complete: bool,
    pub application_complete: bool,
    pub config_complete: bool,
}

impl ProgressMsg {
    pub fn all_complete(&self) -> bool {
        self.install_complete
            && self.environment_complete
            && self.application_complete
            && self.config_complete
    }

    /// Flags in display order: install, environment, application, config.
    pub fn phases(&self) -> [bool; 4] {
        [
            self.install_complete,
            self.environment_complete,
            self.application_complete,
            self.config_complete,
        ]
    }
}

pub const WORKSPACE_CONNECTION_KUBERNETES: &str = "kubernetes";

/// A named binding of cluster connection, scope and default environment
/// stored in the local config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(skip)]
    pub name: String,
    pub connection: WorkspaceConnection,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_application: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConnection {
    pub kind: String,
    pub context: String,
}

impl Workspace {
    pub const DEFAULT_NAME: &'static str = "default";

    /// Workspace connected to `context` with no environment chosen yet.
    pub fn for_context(context: &str) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            connection: WorkspaceConnection {
                kind: WORKSPACE_CONNECTION_KUBERNETES.to_string(),
                context: context.to_string(),
            },
            scope: String::new(),
            environment: String::new(),
            default_application: None,
        }
    }

    /// Point the workspace at the resource group and environment named `env`.
    pub fn with_environment(mut self, env: &str) -> Self {
        self.scope = resource_group_scope(env);
        self.environment = environment_id(&self.scope, env);
        self
    }
}

pub fn resource_group_scope(group: &str) -> String {
    format!("/planes/radius/local/resourceGroups/{}", group)
}

pub fn environment_id(scope: &str, name: &str) -> String {
    format!("{}/providers/Applications.Core/environments/{}", scope, name)
}

pub fn application_id(scope: &str, name: &str) -> String {
    format!("{}/providers/Applications.Core/applications/{}", scope, name)
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
