    use super::*;

    #[test]
    fn every_type_gets_a_default_local_dev_recipe() -> Result<()> {
        let recipes = BuiltinDevRecipes.dev_recipes()?;
        assert_eq!(recipes.len(), DEV_RECIPES.len());

        let redis = &recipes["Applications.Datastores/redisCaches"][DEV_RECIPE_NAME];
        assert_eq!(redis.template_kind, "bicep");
        assert_eq!(
            redis.template_path,
            "ghcr.io/radius-project/recipes/local-dev/rediscaches:latest"
        );
        assert!(recipes.values().all(|named| named.len() == 1));
        Ok(())
    }
