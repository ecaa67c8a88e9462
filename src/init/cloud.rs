use anyhow::Result;

use super::Runner;
use super::aws::AWS_IRSA_SET_VALUE;
use super::azure::AZURE_WORKLOAD_IDENTITY_SET_VALUE;
use crate::model::{CloudProviderChoice, InitOptions, ProviderKind};
use crate::prompt::yes_no;

pub(crate) const CONFIRM_CLOUD_PROVIDER_PROMPT: &str = "Add cloud providers for cloud resources?";
pub(crate) const CONFIRM_CLOUD_PROVIDER_ADDITIONAL_PROMPT: &str =
    "Add additional cloud providers for cloud resources?";
pub(crate) const SELECT_CLOUD_PROVIDER_PROMPT: &str = "Select your cloud provider";

impl Runner {
    /// Only offered with `--full` when a new environment is created; provider
    /// config of an existing environment is left alone.
    pub(super) fn enter_cloud_provider_options(&self, options: &mut InitOptions) -> Result<()> {
        if !self.full || !options.environment.create {
            return Ok(());
        }

        let mut question = CONFIRM_CLOUD_PROVIDER_PROMPT;
        loop {
            if !yes_no(self.prompter.as_ref(), question)? {
                return Ok(());
            }

            let answer = self
                .prompter
                .list_input(&CloudProviderChoice::labels(), SELECT_CLOUD_PROVIDER_PROMPT)?;
            match CloudProviderChoice::parse(&answer)? {
                CloudProviderChoice::Back => return Ok(()),
                CloudProviderChoice::Provider(ProviderKind::Azure) => {
                    remove_set_value(options, AZURE_WORKLOAD_IDENTITY_SET_VALUE);
                    let provider = self.enter_azure_cloud_provider(options)?;
                    options.cloud_providers.azure = Some(provider);
                }
                CloudProviderChoice::Provider(ProviderKind::Aws) => {
                    remove_set_value(options, AWS_IRSA_SET_VALUE);
                    let provider = self.enter_aws_cloud_provider(options)?;
                    options.cloud_providers.aws = Some(provider);
                }
            }

            question = CONFIRM_CLOUD_PROVIDER_ADDITIONAL_PROMPT;
        }
    }
}

/// Record an installer override once.
pub(super) fn add_set_value(options: &mut InitOptions, value: &str) {
    if !options.set_values.iter().any(|v| v == value) {
        options.set_values.push(value.to_string());
    }
}

/// A provider entered again replaces the old one, overrides included.
fn remove_set_value(options: &mut InitOptions, value: &str) {
    options.set_values.retain(|v| v != value);
}
