use anyhow::{Context, Result};
use serde::Deserialize;

use super::exec;
use super::{AzureClient, Location, Subscription, SubscriptionList};

/// Azure lookups through the `az` command line, using whatever account the
/// user is logged in with.
#[derive(Clone, Copy, Debug, Default)]
pub struct AzCli;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubscription {
    id: String,
    name: String,
    #[serde(default)]
    is_default: bool,
    #[serde(default)]
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    name: String,
    #[serde(default)]
    display_name: String,
}

impl AzureClient for AzCli {
    fn subscriptions(&self) -> Result<SubscriptionList> {
        let out = exec::run("az", &["account", "list", "--output", "json"], &[])?;
        parse_subscriptions(&out)
    }

    fn resource_groups(&self, subscription_id: &str) -> Result<Vec<String>> {
        let groups: Vec<RawGroup> = exec::run_json(
            "az",
            &[
                "group",
                "list",
                "--subscription",
                subscription_id,
                "--output",
                "json",
            ],
            &[],
        )?;
        Ok(groups.into_iter().map(|g| g.name).collect())
    }

    fn resource_group_exists(&self, subscription_id: &str, name: &str) -> Result<bool> {
        let exists: bool = exec::run_json(
            "az",
            &[
                "group",
                "exists",
                "--subscription",
                subscription_id,
                "--name",
                name,
                "--output",
                "json",
            ],
            &[],
        )?;
        Ok(exists)
    }

    fn locations(&self, subscription_id: &str) -> Result<Vec<Location>> {
        let locations: Vec<RawLocation> = exec::run_json(
            "az",
            &[
                "account",
                "list-locations",
                "--subscription",
                subscription_id,
                "--output",
                "json",
            ],
            &[],
        )?;
        Ok(locations
            .into_iter()
            .map(|l| Location {
                display_name: if l.display_name.is_empty() {
                    l.name.clone()
                } else {
                    l.display_name
                },
                name: l.name,
            })
            .collect())
    }

    fn create_resource_group(
        &self,
        subscription_id: &str,
        name: &str,
        location: &str,
    ) -> Result<()> {
        exec::run(
            "az",
            &[
                "group",
                "create",
                "--subscription",
                subscription_id,
                "--name",
                name,
                "--location",
                location,
                "--output",
                "none",
            ],
            &[],
        )
        .with_context(|| format!("create Azure resource group {}", name))?;
        Ok(())
    }
}

/// Enabled subscriptions only; the one marked default is reported separately.
pub(crate) fn parse_subscriptions(json: &str) -> Result<SubscriptionList> {
    let raw: Vec<RawSubscription> =
        serde_json::from_str(json).context("parse az account list output")?;

    let mut list = SubscriptionList::default();
    for s in raw {
        if s.state.as_deref().is_some_and(|state| state != "Enabled") {
            continue;
        }
        let sub = Subscription {
            id: s.id,
            name: s.name,
        };
        if s.is_default {
            list.default = Some(sub.clone());
        }
        list.subscriptions.push(sub);
    }
    Ok(list)
}

#[cfg(test)]
#[path = "../tests/clients/azure_tests.rs"]
mod tests;
