use anyhow::{Context, Result};
use serde::Deserialize;

use super::exec;
use super::{ClusterInstallOptions, Helm, InstallState};

pub const DEFAULT_NAMESPACE: &str = "radius-system";
pub const RELEASE_NAME: &str = "radius";
pub const CHART_REPO: &str = "https://charts.radapp.io";

/// Helm operations through the `helm` binary.
#[derive(Clone, Debug)]
pub struct HelmCli {
    pub namespace: String,
    pub release: String,
    pub repo: String,
}

impl Default for HelmCli {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            release: RELEASE_NAME.to_string(),
            repo: CHART_REPO.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Release {
    name: String,
    #[serde(default)]
    app_version: String,
    #[serde(default)]
    chart: String,
}

impl Helm for HelmCli {
    fn check_installed(&self, context: &str) -> Result<InstallState> {
        let filter = format!("^{}$", self.release);
        let out = exec::run(
            "helm",
            &[
                "list",
                "--kube-context",
                context,
                "--namespace",
                &self.namespace,
                "--filter",
                &filter,
                "--output",
                "json",
            ],
            &[],
        )
        .with_context(|| format!("list helm releases in context {}", context))?;
        parse_release_list(&out, &self.release)
    }

    fn install(&self, context: &str, options: &ClusterInstallOptions) -> Result<bool> {
        let args = install_args(self, context, options);
        let args = args.iter().map(String::as_str).collect::<Vec<_>>();
        exec::run("helm", &args, &[])
            .with_context(|| format!("install {} into context {}", self.release, context))?;
        Ok(true)
    }
}

pub(crate) fn parse_release_list(json: &str, release: &str) -> Result<InstallState> {
    let releases: Vec<Release> = serde_json::from_str(json).context("parse helm list output")?;
    let Some(found) = releases.into_iter().find(|r| r.name == release) else {
        return Ok(InstallState::default());
    };

    let version = if !found.app_version.is_empty() {
        found.app_version
    } else {
        found
            .chart
            .strip_prefix(&format!("{}-", release))
            .unwrap_or(&found.chart)
            .to_string()
    };
    Ok(InstallState {
        installed: true,
        version,
    })
}

pub(crate) fn install_args(
    helm: &HelmCli,
    context: &str,
    options: &ClusterInstallOptions,
) -> Vec<String> {
    let namespace = if options.namespace.is_empty() {
        helm.namespace.as_str()
    } else {
        options.namespace.as_str()
    };

    let mut args = vec![
        "upgrade".to_string(),
        "--install".to_string(),
        helm.release.clone(),
        helm.release.clone(),
        "--repo".to_string(),
        helm.repo.clone(),
        "--kube-context".to_string(),
        context.to_string(),
        "--namespace".to_string(),
        namespace.to_string(),
        "--create-namespace".to_string(),
        "--wait".to_string(),
    ];
    if !options.version.is_empty() {
        args.push("--version".to_string());
        args.push(options.version.clone());
    }
    for value in &options.set_values {
        args.push("--set".to_string());
        args.push(value.clone());
    }
    args
}

#[cfg(test)]
#[path = "../tests/clients/helm_tests.rs"]
mod tests;
