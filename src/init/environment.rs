use anyhow::{Context, Result};

use super::{InitError, Runner};
use crate::clients::EnvironmentSummary;
use crate::model::{InitOptions, Workspace};
use crate::prompt::TextInputOptions;
use crate::validate::{validate_namespace, validate_resource_name};

pub(crate) const DEFAULT_ENVIRONMENT_NAME: &str = "default";
pub(crate) const DEFAULT_ENVIRONMENT_NAMESPACE: &str = "default";

pub(crate) const SELECT_EXISTING_ENVIRONMENT_PROMPT: &str =
    "Select an existing environment or create a new one";
pub(crate) const CREATE_NEW_ENVIRONMENT_SENTINEL: &str = "[create new]";
pub(crate) const ENTER_ENVIRONMENT_NAME_PROMPT: &str = "Enter an environment name";
pub(crate) const ENTER_NAMESPACE_PROMPT: &str = "Enter a namespace name to deploy apps into";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EnvironmentChoice {
    Existing(String),
    CreateNew,
}

impl EnvironmentChoice {
    pub(crate) fn parse(label: &str) -> Self {
        if label == CREATE_NEW_ENVIRONMENT_SENTINEL {
            EnvironmentChoice::CreateNew
        } else {
            EnvironmentChoice::Existing(label.to_string())
        }
    }
}

impl Runner {
    /// Decide between reusing and creating an environment. Returns the
    /// workspace bound to the chosen environment.
    pub(super) fn enter_environment_options(&self, options: &mut InitOptions) -> Result<Workspace> {
        let workspace = Workspace::for_context(&options.cluster.context);

        // A fresh install cannot have environments yet.
        if !options.cluster.install
            && let Some(existing) = self.select_existing_environment(&workspace)?
        {
            options.environment.create = false;
            options.environment.name = existing.name.clone();
            return Ok(bind_existing(workspace, &existing));
        }

        options.environment.create = true;
        options.environment.name = self.enter_environment_name()?;
        options.environment.namespace = self.enter_environment_namespace()?;
        options.recipes.dev_recipes = !self.full;

        Ok(workspace.with_environment(&options.environment.name))
    }

    /// `None` means a new environment should be created.
    fn select_existing_environment(
        &self,
        workspace: &Workspace,
    ) -> Result<Option<EnvironmentSummary>> {
        let client = self
            .clients
            .connections
            .management_client(workspace)
            .context("failed to connect to the control plane")?;
        let environments = client
            .list_environments()
            .context("failed to list environments")?;
        if environments.is_empty() {
            return Ok(None);
        }

        if !self.full
            && let Some(env) = environments
                .iter()
                .find(|e| e.name == DEFAULT_ENVIRONMENT_NAME)
        {
            return Ok(Some(env.clone()));
        }

        let names = environments.iter().map(|e| e.name.clone()).collect::<Vec<_>>();
        let choices = environment_choices(&names);
        let answer = self
            .prompter
            .list_input(&choices, SELECT_EXISTING_ENVIRONMENT_PROMPT)?;

        match EnvironmentChoice::parse(&answer) {
            EnvironmentChoice::CreateNew => Ok(None),
            EnvironmentChoice::Existing(name) => environments
                .into_iter()
                .find(|e| e.name == name)
                .map(Some)
                .ok_or_else(|| InitError::UnknownChoice(name).into()),
        }
    }

    fn enter_environment_name(&self) -> Result<String> {
        if !self.full {
            return Ok(DEFAULT_ENVIRONMENT_NAME.to_string());
        }
        self.prompter.text_input(
            ENTER_ENVIRONMENT_NAME_PROMPT,
            TextInputOptions::with_default(DEFAULT_ENVIRONMENT_NAME)
                .validated(validate_resource_name),
        )
    }

    fn enter_environment_namespace(&self) -> Result<String> {
        if !self.full {
            return Ok(DEFAULT_ENVIRONMENT_NAMESPACE.to_string());
        }
        self.prompter.text_input(
            ENTER_NAMESPACE_PROMPT,
            TextInputOptions::with_default(DEFAULT_ENVIRONMENT_NAMESPACE)
                .validated(validate_namespace),
        )
    }
}

/// `default` first when present, the others in name order, then the
/// create-new sentinel.
pub(crate) fn environment_choices(names: &[String]) -> Vec<String> {
    let mut rest = names
        .iter()
        .filter(|n| n.as_str() != DEFAULT_ENVIRONMENT_NAME)
        .cloned()
        .collect::<Vec<_>>();
    rest.sort();
    rest.dedup();

    let mut choices = Vec::with_capacity(rest.len() + 2);
    if names.iter().any(|n| n == DEFAULT_ENVIRONMENT_NAME) {
        choices.push(DEFAULT_ENVIRONMENT_NAME.to_string());
    }
    choices.extend(rest);
    choices.push(CREATE_NEW_ENVIRONMENT_SENTINEL.to_string());
    choices
}

/// Use the listed environment id, and its resource group as scope.
fn bind_existing(mut workspace: Workspace, env: &EnvironmentSummary) -> Workspace {
    match env.id.split_once("/providers/") {
        Some((scope, _)) if !env.id.is_empty() => {
            workspace.scope = scope.to_string();
            workspace.environment = env.id.clone();
            workspace
        }
        _ => workspace.with_environment(&env.name),
    }
}
