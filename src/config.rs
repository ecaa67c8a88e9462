use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Workspace;

pub const CONFIG_ENV: &str = "RAD_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("serialize config")]
    Serialize(#[source] serde_yaml::Error),
    #[error("cannot locate home directory (set RAD_CONFIG to choose a config file)")]
    NoHome,
}

/// Contents of `~/.rad/config.yaml`. Sections other than `workspaces` are
/// carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspaces: WorkspaceSection,

    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub items: BTreeMap<String, Workspace>,
}

impl Config {
    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut cfg: Config = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        for (name, ws) in cfg.workspaces.items.iter_mut() {
            ws.name = name.clone();
        }
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Insert or replace `workspace` and make it the default.
    pub fn upsert_workspace(&mut self, workspace: &Workspace) {
        let key = workspace.name.to_lowercase();
        let mut ws = workspace.clone();
        ws.name = key.clone();
        self.workspaces.items.insert(key.clone(), ws);
        self.workspaces.default = Some(key);
    }

    pub fn default_workspace(&self) -> Option<&Workspace> {
        let name = self.workspaces.default.as_ref()?;
        self.workspaces.items.get(name)
    }
}

pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<Config>;

    /// Read-modify-write of the workspace registry; `config` is updated to
    /// match what was written.
    fn edit_workspaces(&self, config: &mut Config, workspace: &Workspace) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$RAD_CONFIG`, or `~/.rad/config.yaml`.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV)
            && !path.is_empty()
        {
            return Ok(Self::at(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(Self::at(home.join(".rad").join("config.yaml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Config, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Config::parse(&self.path, &text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(source) => Err(ConfigError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Config> {
        Ok(self.read()?)
    }

    fn edit_workspaces(&self, config: &mut Config, workspace: &Workspace) -> Result<()> {
        let mut current = self.read()?;
        current.upsert_workspace(workspace);
        let yaml = current.to_yaml()?;
        write_atomic(&self.path, yaml.as_bytes())?;
        tracing::info!(path = %self.path.display(), workspace = %workspace.name, "updated workspace config");
        *config = current;
        Ok(())
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    if let Err(err) = fs::rename(&tmp, path) {
        fs::remove_file(&tmp).ok();
        return Err(err).with_context(|| format!("rename {} -> {}", tmp.display(), path.display()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
