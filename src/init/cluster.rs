use anyhow::{Context, Result};

use super::{InitError, Runner};
use crate::clients::KubeConfigSummary;
use crate::clients::helm::DEFAULT_NAMESPACE;
use crate::model::InitOptions;

pub(crate) const SELECT_CLUSTER_PROMPT: &str =
    "Select the kubeconfig context to install Radius into";

impl Runner {
    pub(super) fn enter_cluster_options(&self, options: &mut InitOptions) -> Result<()> {
        let kube = self
            .clients
            .kube
            .contexts()
            .context("failed to read kubeconfig contexts")?;
        let context = self.select_cluster(&kube)?;

        let state = self
            .clients
            .helm
            .check_installed(&context)
            .with_context(|| format!("failed to check Radius installation in context {}", context))?;

        options.cluster.context = context;
        if state.installed {
            options.cluster.install = false;
            options.cluster.version = state.version;
        } else {
            options.cluster.install = true;
            options.cluster.version = self.cli_version.clone();
            options.cluster.namespace = DEFAULT_NAMESPACE.to_string();
        }
        Ok(())
    }

    fn select_cluster(&self, kube: &KubeConfigSummary) -> Result<String> {
        if !self.full {
            if kube.current.is_empty() {
                return Err(InitError::NoCurrentContext.into());
            }
            return Ok(kube.current.clone());
        }

        let choices = cluster_choices(kube);
        if choices.is_empty() {
            return Err(InitError::NoKubeContexts.into());
        }
        let choice = self.prompter.list_input(&choices, SELECT_CLUSTER_PROMPT)?;
        if !kube.contexts.contains_key(&choice) {
            return Err(InitError::UnknownChoice(choice).into());
        }
        Ok(choice)
    }
}

/// Current context first, the rest in name order.
pub(crate) fn cluster_choices(kube: &KubeConfigSummary) -> Vec<String> {
    let mut choices = Vec::with_capacity(kube.contexts.len());
    if kube.contexts.contains_key(&kube.current) {
        choices.push(kube.current.clone());
    }
    choices.extend(
        kube.contexts
            .keys()
            .filter(|name| **name != kube.current)
            .cloned(),
    );
    choices
}
