use std::collections::BTreeMap;

use anyhow::{Context, Result};

use super::cloud::add_set_value;
use super::{InitError, Runner};
use crate::clients::Subscription;
use crate::model::{AzureCredential, AzureCredentialKind, AzureProvider, InitOptions};
use crate::prompt::{TextInputOptions, yes_no};
use crate::validate::{validate_resource_name, validate_uuid_v4};

pub(crate) const SELECT_AZURE_SUBSCRIPTION_PROMPT: &str = "Select a subscription:";
pub(crate) const CONFIRM_AZURE_CREATE_RESOURCE_GROUP_PROMPT: &str = "Create a new resource group?";
pub(crate) const ENTER_AZURE_RESOURCE_GROUP_NAME_PROMPT: &str = "Enter a resource group name";
pub(crate) const SELECT_AZURE_RESOURCE_GROUP_LOCATION_PROMPT: &str =
    "Select a location for the resource group:";
pub(crate) const SELECT_AZURE_RESOURCE_GROUP_PROMPT: &str = "Select a resource group:";
pub(crate) const SELECT_AZURE_CREDENTIAL_KIND_PROMPT: &str =
    "Select a credential kind for the Azure provider";
pub(crate) const ENTER_AZURE_CLIENT_ID_PROMPT: &str =
    "Enter the `appId` of the service principal used to create Azure resources";
pub(crate) const ENTER_AZURE_CLIENT_SECRET_PROMPT: &str =
    "Enter the `password` of the service principal used to create Azure resources";
pub(crate) const ENTER_AZURE_TENANT_ID_PROMPT: &str =
    "Enter the `tenantId` of the service principal used to create Azure resources";

pub(crate) const AZURE_WORKLOAD_IDENTITY_SET_VALUE: &str = "global.azureWorkloadIdentity.enabled=true";

pub(crate) fn confirm_azure_subscription_prompt(name: &str) -> String {
    format!("Use subscription '{}'?", name)
}

fn service_principal_instructions(subscription_id: &str, resource_group: &str) -> String {
    format!(
        "An Azure service principal with a role assignment on your resource group is required to create Azure resources.\n\n\
         For example, you can create one using the following command:\n\
         az ad sp create-for-rbac --role Owner --scope /subscriptions/{}/resourceGroups/{}",
        subscription_id, resource_group
    )
}

fn workload_identity_instructions(subscription_id: &str, resource_group: &str) -> String {
    format!(
        "An Azure AD application with a federated credential for the Radius service accounts and a role assignment on\n\
         /subscriptions/{}/resourceGroups/{} is required to use workload identity.",
        subscription_id, resource_group
    )
}

impl Runner {
    pub(super) fn enter_azure_cloud_provider(
        &self,
        options: &mut InitOptions,
    ) -> Result<AzureProvider> {
        let subscription = self.select_azure_subscription()?;
        let (resource_group, create_resource_group_in) =
            self.select_azure_resource_group(&subscription)?;

        let kinds = AzureCredentialKind::ALL
            .iter()
            .map(|k| k.label().to_string())
            .collect::<Vec<_>>();
        let answer = self
            .prompter
            .list_input(&kinds, SELECT_AZURE_CREDENTIAL_KIND_PROMPT)?;
        let kind = AzureCredentialKind::from_label(&answer)
            .ok_or(InitError::UnsupportedCredentialKind(answer))?;

        let credential = match kind {
            AzureCredentialKind::ServicePrincipal => {
                let client_id = self.prompter.text_input(
                    ENTER_AZURE_CLIENT_ID_PROMPT,
                    TextInputOptions::default()
                        .placeholder("Enter appId...")
                        .validated(validate_uuid_v4)
                        .help(service_principal_instructions(
                            &subscription.id,
                            &resource_group,
                        )),
                )?;
                let client_secret = self.prompter.text_input(
                    ENTER_AZURE_CLIENT_SECRET_PROMPT,
                    TextInputOptions::default()
                        .placeholder("Enter password...")
                        .masked(),
                )?;
                let tenant_id = self.prompter.text_input(
                    ENTER_AZURE_TENANT_ID_PROMPT,
                    TextInputOptions::default()
                        .placeholder("Enter tenantId...")
                        .validated(validate_uuid_v4),
                )?;
                AzureCredential::ServicePrincipal {
                    client_id,
                    client_secret,
                    tenant_id,
                }
            }
            AzureCredentialKind::WorkloadIdentity => {
                let client_id = self.prompter.text_input(
                    ENTER_AZURE_CLIENT_ID_PROMPT,
                    TextInputOptions::default()
                        .placeholder("Enter appId...")
                        .validated(validate_uuid_v4)
                        .help(workload_identity_instructions(
                            &subscription.id,
                            &resource_group,
                        )),
                )?;
                let tenant_id = self.prompter.text_input(
                    ENTER_AZURE_TENANT_ID_PROMPT,
                    TextInputOptions::default()
                        .placeholder("Enter tenantId...")
                        .validated(validate_uuid_v4),
                )?;
                add_set_value(options, AZURE_WORKLOAD_IDENTITY_SET_VALUE);
                AzureCredential::WorkloadIdentity {
                    client_id,
                    tenant_id,
                }
            }
        };

        Ok(AzureProvider {
            subscription_id: subscription.id,
            resource_group,
            create_resource_group_in,
            credential,
        })
    }

    fn select_azure_subscription(&self) -> Result<Subscription> {
        let list = self
            .clients
            .azure
            .subscriptions()
            .context("failed to list Azure subscriptions")?;

        if let Some(default) = &list.default
            && yes_no(
                self.prompter.as_ref(),
                &confirm_azure_subscription_prompt(&default.name),
            )?
        {
            return Ok(default.clone());
        }

        let by_name = list
            .subscriptions
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect::<BTreeMap<_, _>>();
        let names = by_name.keys().cloned().collect::<Vec<_>>();
        let name = self
            .prompter
            .list_input(&names, SELECT_AZURE_SUBSCRIPTION_PROMPT)?;
        by_name
            .get(&name)
            .cloned()
            .ok_or_else(|| InitError::UnknownChoice(name).into())
    }

    /// Returns the group name and, when it has to be created, its location.
    fn select_azure_resource_group(
        &self,
        subscription: &Subscription,
    ) -> Result<(String, Option<String>)> {
        let create = yes_no(
            self.prompter.as_ref(),
            CONFIRM_AZURE_CREATE_RESOURCE_GROUP_PROMPT,
        )?;

        if !create {
            let mut groups = self
                .clients
                .azure
                .resource_groups(&subscription.id)
                .context("failed to list Azure resource groups")?;
            groups.sort();
            let name = self
                .prompter
                .list_input(&groups, SELECT_AZURE_RESOURCE_GROUP_PROMPT)?;
            return Ok((name, None));
        }

        let name = self.prompter.text_input(
            ENTER_AZURE_RESOURCE_GROUP_NAME_PROMPT,
            TextInputOptions::default()
                .placeholder("Enter resource group name")
                .validated(validate_resource_name),
        )?;

        let exists = self
            .clients
            .azure
            .resource_group_exists(&subscription.id, &name)
            .context("failed to check for Azure resource group")?;
        if exists {
            return Ok((name, None));
        }

        let locations = self
            .clients
            .azure
            .locations(&subscription.id)
            .context("failed to list Azure locations")?;
        let by_display = locations
            .into_iter()
            .map(|l| (l.display_name.clone(), l))
            .collect::<BTreeMap<_, _>>();
        let names = by_display.keys().cloned().collect::<Vec<_>>();
        let display = self
            .prompter
            .list_input(&names, SELECT_AZURE_RESOURCE_GROUP_LOCATION_PROMPT)?;
        let location = by_display
            .get(&display)
            .ok_or(InitError::UnknownChoice(display.clone()))?;

        Ok((name, Some(location.name.clone())))
    }
}
