pub mod project;

pub use project::Config;

use serde::{Deserialize, Serialize};

use crate::decorator::DecoratorKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigData {
    pub version: String,
    #[serde(default)]
    pub decorators: DecoratorConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parallel: ParallelConfig,
}

/// Which decorators run. Disabled ones are never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    pub is_new: bool,
    pub scm: bool,
    pub coverage: bool,
    pub duplication: bool,
    pub highlighting: bool,
    pub symbols: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    pub line_hashes: bool,
    pub source_hash: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Worker threads for batch decoration, 0 for the rayon default
    pub threads: usize,
}

impl DecoratorConfig {
    pub fn is_enabled(&self, kind: DecoratorKind) -> bool {
        match kind {
            DecoratorKind::IsNew => self.is_new,
            DecoratorKind::Scm => self.scm,
            DecoratorKind::Coverage => self.coverage,
            DecoratorKind::Duplication => self.duplication,
            DecoratorKind::Highlighting => self.highlighting,
            DecoratorKind::Symbols => self.symbols,
        }
    }

    pub fn set_enabled(&mut self, kind: DecoratorKind, enabled: bool) {
        let flag = match kind {
            DecoratorKind::IsNew => &mut self.is_new,
            DecoratorKind::Scm => &mut self.scm,
            DecoratorKind::Coverage => &mut self.coverage,
            DecoratorKind::Duplication => &mut self.duplication,
            DecoratorKind::Highlighting => &mut self.highlighting,
            DecoratorKind::Symbols => &mut self.symbols,
        };
        *flag = enabled;
    }
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            is_new: true,
            scm: true,
            coverage: true,
            duplication: true,
            highlighting: true,
            symbols: true,
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            line_hashes: true,
            source_hash: true,
        }
    }
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            decorators: DecoratorConfig::default(),
            hashing: HashingConfig::default(),
            output: OutputConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}
