use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ServerConfig;

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub type ClientConfigManager =
    ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager() -> ClientConfigManager {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.server.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                address: "127.0.0.1:9999".to_string(),
            },
        }
    }
}
