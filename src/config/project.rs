use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigData;
use crate::decorator::DecoratorKind;
use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "sourcelines.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub data: ConfigData,
    pub path: PathBuf,
}

impl Config {
    pub fn load_or_default(project_root: impl AsRef<Path>) -> Result<Self> {
        let config_path = project_root.as_ref().join(CONFIG_FILE);

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self {
                data: ConfigData::default(),
                path: config_path,
            })
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let data = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(Self {
            data,
            path: path.to_path_buf(),
        })
    }

    /// Write the default configuration unless one already exists
    pub fn init(project_root: impl AsRef<Path>) -> Result<Self> {
        let project_root = project_root.as_ref();
        fs::create_dir_all(project_root).context("Failed to create project directory")?;

        let config = Self::load_or_default(project_root)?;
        if !config.path.exists() {
            config.save()?;
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(&self.data).context("Failed to serialize config")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        fs::write(&self.path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Dotted keys accepted by `get` and `set`
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = DecoratorKind::ALL
            .iter()
            .map(|kind| format!("decorators.{}", kind))
            .collect();
        keys.extend(
            [
                "hashing.line_hashes",
                "hashing.source_hash",
                "output.pretty",
                "parallel.threads",
            ]
            .map(String::from),
        );
        keys
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
        };

        match key.split_once('.') {
            Some(("decorators", name)) => {
                let kind = decorator_kind(name).ok_or_else(|| unknown_key(key))?;
                let enabled = value.parse().map_err(|_| invalid())?;
                self.data.decorators.set_enabled(kind, enabled);
            }
            Some(("hashing", "line_hashes")) => {
                self.data.hashing.line_hashes = value.parse().map_err(|_| invalid())?;
            }
            Some(("hashing", "source_hash")) => {
                self.data.hashing.source_hash = value.parse().map_err(|_| invalid())?;
            }
            Some(("output", "pretty")) => {
                self.data.output.pretty = value.parse().map_err(|_| invalid())?;
            }
            Some(("parallel", "threads")) => {
                self.data.parallel.threads = value.parse().map_err(|_| invalid())?;
            }
            _ => return Err(unknown_key(key).into()),
        }

        self.save()?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key.split_once('.') {
            Some(("decorators", name)) => {
                let kind = decorator_kind(name).ok_or_else(|| unknown_key(key))?;
                self.data.decorators.is_enabled(kind).to_string()
            }
            Some(("hashing", "line_hashes")) => self.data.hashing.line_hashes.to_string(),
            Some(("hashing", "source_hash")) => self.data.hashing.source_hash.to_string(),
            Some(("output", "pretty")) => self.data.output.pretty.to_string(),
            Some(("parallel", "threads")) => self.data.parallel.threads.to_string(),
            _ => return Err(unknown_key(key).into()),
        };

        Ok(value)
    }
}

fn decorator_kind(name: &str) -> Option<DecoratorKind> {
    DecoratorKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == name)
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::UnknownKey {
        key: key.to_string(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: ConfigData::default(),
            path: PathBuf::from(CONFIG_FILE),
        }
    }
}
