use std::collections::BTreeMap;

use anyhow::Result;

use super::{DevRecipeClient, RecipeMap, RecipeProperties};

pub const DEV_RECIPE_REGISTRY: &str = "ghcr.io/radius-project/recipes/local-dev";
pub const DEV_RECIPE_NAME: &str = "default";

/// Resource type and the repository its local-dev recipe is published under.
const DEV_RECIPES: &[(&str, &str)] = &[
    ("Applications.Dapr/pubSubBrokers", "pubsubbrokers"),
    ("Applications.Dapr/secretStores", "secretstores"),
    ("Applications.Dapr/stateStores", "statestores"),
    ("Applications.Datastores/mongoDatabases", "mongodatabases"),
    ("Applications.Datastores/redisCaches", "rediscaches"),
    ("Applications.Datastores/sqlDatabases", "sqldatabases"),
    ("Applications.Messaging/rabbitMQQueues", "rabbitmqqueues"),
];

/// The built-in "dev" recipe pack: containerised stand-ins for common
/// infrastructure, one `default` recipe per resource type.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinDevRecipes;

impl DevRecipeClient for BuiltinDevRecipes {
    fn dev_recipes(&self) -> Result<RecipeMap> {
        Ok(DEV_RECIPES
            .iter()
            .map(|(resource_type, repo)| {
                let recipe = RecipeProperties {
                    template_kind: "bicep".to_string(),
                    template_path: format!("{}/{}:latest", DEV_RECIPE_REGISTRY, repo),
                };
                (
                    resource_type.to_string(),
                    BTreeMap::from([(DEV_RECIPE_NAME.to_string(), recipe)]),
                )
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../tests/clients/recipes_tests.rs"]
mod tests;
