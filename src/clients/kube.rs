use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{KubeConfigSummary, KubeContext, KubeContexts};

/// Contexts read straight from the kubeconfig file.
#[derive(Clone, Debug)]
pub struct KubeConfigFile {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawKubeConfig {
    #[serde(rename = "current-context", default)]
    current_context: String,
    #[serde(default)]
    contexts: Vec<NamedContext>,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,
    #[serde(default)]
    context: RawContext,
}

#[derive(Debug, Default, Deserialize)]
struct RawContext {
    #[serde(default)]
    cluster: String,
    #[serde(default)]
    namespace: Option<String>,
}

impl KubeConfigFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// First entry of `$KUBECONFIG`, or `~/.kube/config`.
    pub fn from_env() -> Result<Self> {
        if let Some(list) = std::env::var_os("KUBECONFIG")
            && let Some(first) = std::env::split_paths(&list).find(|p| !p.as_os_str().is_empty())
        {
            return Ok(Self::at(first));
        }
        let home = dirs::home_dir().context("cannot locate home directory for kubeconfig")?;
        Ok(Self::at(home.join(".kube").join("config")))
    }
}

impl KubeContexts for KubeConfigFile {
    fn contexts(&self) -> Result<KubeConfigSummary> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read kubeconfig {}", self.path.display()))?;
        parse_kubeconfig(&text).with_context(|| format!("parse kubeconfig {}", self.path.display()))
    }
}

pub(crate) fn parse_kubeconfig(text: &str) -> Result<KubeConfigSummary> {
    let raw: RawKubeConfig = serde_yaml::from_str(text).context("invalid kubeconfig yaml")?;
    let contexts = raw
        .contexts
        .into_iter()
        .map(|c| {
            (
                c.name,
                KubeContext {
                    cluster: c.context.cluster,
                    namespace: c.context.namespace,
                },
            )
        })
        .collect::<BTreeMap<_, _>>();
    Ok(KubeConfigSummary {
        current: raw.current_context,
        contexts,
    })
}

#[cfg(test)]
#[path = "../tests/clients/kube_tests.rs"]
mod tests;
