use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::Scaffolder;
use crate::config::write_atomic;

pub const APP_BICEP: &str = "app.bicep";
pub const RAD_DIR: &str = ".rad";
pub const RAD_YAML: &str = "rad.yaml";

const APP_BICEP_TEMPLATE: &str = r#"extension radius

@description('The Radius Application ID. Injected automatically by the rad CLI.')
param application string

resource demo 'Applications.Core/containers@2023-10-01-preview' = {
  name: 'demo'
  properties: {
    application: application
    container: {
      image: 'ghcr.io/radius-project/samples/demo:latest'
      ports: {
        web: {
          containerPort: 3000
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct DirectoryConfig<'a> {
    workspace: DirectoryWorkspace<'a>,
}

#[derive(Debug, Serialize)]
struct DirectoryWorkspace<'a> {
    application: &'a str,
}

/// Writes `app.bicep` and `.rad/rad.yaml`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileScaffolder;

impl Scaffolder for FileScaffolder {
    fn scaffold(&self, dir: &Path, app_name: &str) -> Result<()> {
        let bicep = dir.join(APP_BICEP);
        if bicep.exists() {
            tracing::info!(path = %bicep.display(), "keeping existing file");
        } else {
            write_atomic(&bicep, APP_BICEP_TEMPLATE.as_bytes())?;
        }

        let rad_dir = dir.join(RAD_DIR);
        fs::create_dir_all(&rad_dir)
            .with_context(|| format!("create directory {}", rad_dir.display()))?;
        let rad_yaml = rad_dir.join(RAD_YAML);
        if rad_yaml.exists() {
            tracing::info!(path = %rad_yaml.display(), "keeping existing file");
            return Ok(());
        }
        let yaml = serde_yaml::to_string(&DirectoryConfig {
            workspace: DirectoryWorkspace {
                application: app_name,
            },
        })
        .context("serialize rad.yaml")?;
        write_atomic(&rad_yaml, yaml.as_bytes())
    }
}

#[cfg(test)]
#[path = "../tests/clients/scaffold_tests.rs"]
mod tests;
