use std::path::Path;

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};

const DEFAULT_CONFIG_PATH: &str = "taskbook.toml";
const DEFAULT_TASK_FILE: &str = "tasks.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub file: String,
}

impl Config {
    /// Resolve configuration: CLI flags win over the config file, which wins
    /// over defaults. An explicitly passed `--config` path must exist; the
    /// default path merely being absent is fine.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config {
            Some(ref path) => {
                let path = Path::new(path);
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(path)?)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    parse_config(&std::fs::read_to_string(path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        Ok(merge(file_config, cli))
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    Ok(config)
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Config {
    Config {
        file: cli
            .file
            .clone()
            .or(file.file)
            .unwrap_or_else(|| DEFAULT_TASK_FILE.to_string()),
    }
}
