use anyhow::{Context, Result};
use crossbeam_channel::{Sender, bounded, unbounded};

use super::{InitError, Phase, ProgressModel, Runner};
use crate::clients::management::LOCATION_GLOBAL;
use crate::clients::{
    ClusterInstallOptions, EnvironmentProperties, EnvironmentProviders, KubernetesCompute,
    ProviderScope, RecipeMap,
};
use crate::config::Config;
use crate::model::{CloudProviderOptions, InitOptions, ProgressMsg, Workspace};
use crate::prompt::Msg;

pub const RADIUS_PLANE: &str = "radius";

/// Sends cumulative [`ProgressMsg`] snapshots to the progress screen.
///
/// Dropping the reporter closes the channel, which ends the screen.
pub struct ProgressReporter {
    tx: Sender<Msg>,
    state: ProgressMsg,
}

impl ProgressReporter {
    pub fn new(tx: Sender<Msg>) -> Self {
        Self {
            tx,
            state: ProgressMsg::default(),
        }
    }

    pub fn update(&mut self, mark: impl FnOnce(&mut ProgressMsg)) {
        mark(&mut self.state);
        // The screen may already be gone; progress is best effort.
        if self.tx.send(Msg::Progress(self.state)).is_err() {
            tracing::debug!("progress display no longer listening");
        }
    }

    pub fn state(&self) -> ProgressMsg {
        self.state
    }
}

impl Runner {
    /// Apply the confirmed options. Returns the workspace that was saved.
    pub fn run(&self) -> Result<Workspace> {
        let (Some(options), Some(workspace)) = (&self.options, &self.workspace) else {
            return Err(InitError::NotValidated.into());
        };

        let mut config = self
            .clients
            .config
            .load()
            .context("failed to load config")?;

        let (progress_tx, progress_rx) = unbounded::<Msg>();
        let (done_tx, done_rx) = bounded::<Result<()>>(1);
        let prompter = self.prompter.as_ref();
        let display = options.clone();

        std::thread::scope(|s| -> Result<Workspace> {
            s.spawn(move || {
                let mut model = ProgressModel::new(display);
                let res = prompter.run_program(&mut model, Some(progress_rx));
                done_tx.send(res).ok();
            });

            let mut reporter = ProgressReporter::new(progress_tx);
            self.execute(options, workspace, &mut config, &mut reporter)?;
            drop(reporter);

            done_rx
                .recv()
                .context("progress display stopped without reporting")??;
            Ok(workspace.clone())
        })
    }

    /// Install, environment, application, config; one snapshot after each.
    fn execute(
        &self,
        options: &InitOptions,
        workspace: &Workspace,
        config: &mut Config,
        reporter: &mut ProgressReporter,
    ) -> Result<()> {
        if options.cluster.install {
            self.install(options)
                .context(Phase::Install.failure_message())?;
        }
        reporter.update(|p| p.install_complete = true);

        if options.environment.create {
            self.create_environment(options, workspace)?;
        }
        reporter.update(|p| p.environment_complete = true);

        if options.application.scaffold {
            self.create_application(options, workspace)
                .context(Phase::Application.failure_message())?;
        }
        reporter.update(|p| p.application_complete = true);

        self.clients
            .config
            .edit_workspaces(config, workspace)
            .context(Phase::Config.failure_message())?;
        reporter.update(|p| p.config_complete = true);

        Ok(())
    }

    fn install(&self, options: &InitOptions) -> Result<()> {
        let install = ClusterInstallOptions {
            namespace: options.cluster.namespace.clone(),
            version: options.cluster.version.clone(),
            set_values: options.set_values.clone(),
        };
        tracing::info!(context = %options.cluster.context, version = %install.version, "installing Radius");
        self.clients
            .helm
            .install(&options.cluster.context, &install)?;
        Ok(())
    }

    fn create_environment(&self, options: &InitOptions, workspace: &Workspace) -> Result<()> {
        let env = &options.environment;
        let providers = &options.cloud_providers;

        let client = self
            .clients
            .connections
            .management_client(workspace)
            .context(Phase::Environment.failure_message())?;

        if let Some(azure) = &providers.azure
            && let Some(location) = &azure.create_resource_group_in
        {
            self.clients
                .azure
                .create_resource_group(&azure.subscription_id, &azure.resource_group, location)
                .context(Phase::ResourceGroup.failure_message())?;
        }

        client
            .create_resource_group(RADIUS_PLANE, &env.name)
            .context(Phase::ResourceGroup.failure_message())?;

        let recipes = if options.recipes.dev_recipes {
            self.clients
                .recipes
                .dev_recipes()
                .context(Phase::Environment.failure_message())?
        } else {
            RecipeMap::new()
        };

        let properties = EnvironmentProperties {
            compute: KubernetesCompute::in_namespace(&env.namespace),
            providers: environment_providers(providers),
            recipes,
        };
        client
            .create_environment(&env.name, LOCATION_GLOBAL, &properties)
            .context(Phase::Environment.failure_message())?;

        if providers.is_empty() {
            return Ok(());
        }

        let credentials = self
            .clients
            .connections
            .credential_client(workspace)
            .context(Phase::Environment.failure_message())?;
        if let Some(azure) = &providers.azure {
            credentials
                .put_azure(&azure.credential)
                .context(Phase::AzureCredentials.failure_message())?;
        }
        if let Some(aws) = &providers.aws {
            credentials
                .put_aws(&aws.credential)
                .context(Phase::AwsCredentials.failure_message())?;
        }
        Ok(())
    }

    fn create_application(&self, options: &InitOptions, workspace: &Workspace) -> Result<()> {
        let name = &options.application.name;
        let client = self.clients.connections.management_client(workspace)?;
        client.create_application_if_not_found(name, &workspace.environment)?;
        self.clients.scaffolder.scaffold(&self.working_dir, name)?;
        Ok(())
    }
}

pub(crate) fn environment_providers(providers: &CloudProviderOptions) -> EnvironmentProviders {
    EnvironmentProviders {
        azure: providers.azure.as_ref().map(|a| ProviderScope { scope: a.scope() }),
        aws: providers.aws.as_ref().map(|a| ProviderScope { scope: a.scope() }),
    }
}

#[cfg(test)]
#[path = "../tests/init/run_tests.rs"]
mod tests;
