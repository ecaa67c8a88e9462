//! The `rad init` wizard.
//!
//! [`Runner::validate`] gathers [`InitOptions`] from the user, looping until
//! the summary is confirmed. [`Runner::run`] then performs the work while a
//! progress screen runs on a second thread.

use std::path::PathBuf;

use anyhow::Result;

use crate::clients::Clients;
use crate::model::{InitOptions, Workspace};
use crate::prompt::Prompter;

mod application;
mod aws;
mod azure;
mod cloud;
mod cluster;
mod display;
mod environment;
mod run;

pub use self::display::{ProgressModel, SummaryModel, SummaryResult};
pub use self::run::ProgressReporter;

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("unsupported cloud provider {0:?}")]
    UnsupportedProvider(String),
    #[error("unsupported credential kind {0:?}")]
    UnsupportedCredentialKind(String),
    #[error("no kubeconfig contexts found; configure access to a Kubernetes cluster first")]
    NoKubeContexts,
    #[error("kubeconfig has no current context; set one with `kubectl config use-context`")]
    NoCurrentContext,
    #[error("{0:?} was not one of the offered choices")]
    UnknownChoice(String),
    #[error("init options have not been gathered")]
    NotValidated,
}

/// Execution phases, each with the message shown when it fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Install,
    ResourceGroup,
    Environment,
    AzureCredentials,
    AwsCredentials,
    Application,
    Config,
}

impl Phase {
    pub fn failure_message(self) -> &'static str {
        match self {
            Phase::Install => "Failed to install Radius.",
            Phase::ResourceGroup => "Failed to create resource group.",
            Phase::Environment => "Failed to create environment.",
            Phase::AzureCredentials => "Failed to configure Azure credentials.",
            Phase::AwsCredentials => "Failed to configure AWS credentials.",
            Phase::Application => "Failed to scaffold application.",
            Phase::Config => "Failed to update local configuration.",
        }
    }
}

pub struct Runner {
    prompter: Box<dyn Prompter>,
    clients: Clients,
    /// Ask every question and show the confirmation screen. Without it the
    /// wizard picks defaults wherever it can.
    full: bool,
    cli_version: String,
    working_dir: PathBuf,
    options: Option<InitOptions>,
    workspace: Option<Workspace>,
}

impl Runner {
    pub fn new(prompter: Box<dyn Prompter>, clients: Clients) -> Self {
        Self {
            prompter,
            clients,
            full: false,
            cli_version: env!("CARGO_PKG_VERSION").to_string(),
            working_dir: PathBuf::from("."),
            options: None,
            workspace: None,
        }
    }

    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    pub fn cli_version(mut self, version: impl Into<String>) -> Self {
        self.cli_version = version.into();
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn options(&self) -> Option<&InitOptions> {
        self.options.as_ref()
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    /// Gather options until the user confirms them.
    ///
    /// Returns [`crate::prompt::ExitConsole`] if the user quits; nothing has
    /// been changed on the cluster or on disk in that case.
    pub fn validate(&mut self) -> Result<()> {
        loop {
            let (options, workspace) = self.enter_init_options()?;

            let confirmed = if self.full {
                self.confirm_options(&options)?
            } else {
                true
            };

            if confirmed {
                tracing::debug!(cluster = ?options.cluster, environment = ?options.environment, "options confirmed");
                self.options = Some(options);
                self.workspace = Some(workspace);
                return Ok(());
            }

            tracing::debug!("summary dismissed; asking again");
        }
    }

    pub(crate) fn enter_init_options(&self) -> Result<(InitOptions, Workspace)> {
        let mut options = InitOptions::default();

        self.enter_cluster_options(&mut options)?;
        let mut workspace = self.enter_environment_options(&mut options)?;
        self.enter_cloud_provider_options(&mut options)?;
        self.enter_application_options(&mut options)?;

        if options.application.scaffold {
            workspace.default_application = Some(options.application.name.clone());
        }

        Ok((options, workspace))
    }
}

#[cfg(test)]
#[path = "tests/init_tests.rs"]
mod tests;
