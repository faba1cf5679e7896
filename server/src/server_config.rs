use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::SessionRng;
use common::games::tictactoe::{Board, SEARCH_DEPTH, Side, Turn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "tictactoe_server_config.yaml";
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:9999";

pub fn get_config_manager(
    path: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or(CONFIG_FILE_NAME))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FirstPlayerMode {
    #[default]
    Random,
    Player,
    Computer,
}

impl FirstPlayerMode {
    pub fn apply(self, board: &mut Board, rng: &mut SessionRng) {
        match self {
            FirstPlayerMode::Random => board.choose_first_player(rng),
            FirstPlayerMode::Player => board.set_first_turn(Turn::from(Side::Player)),
            FirstPlayerMode::Computer => board.set_first_turn(Turn::from(Side::Computer)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub search_depth: usize,
    #[serde(default)]
    pub first_player: FirstPlayerMode,
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.address.is_empty() {
            return Err("server address must not be empty".to_string());
        }
        if self.search_depth > SEARCH_DEPTH {
            return Err(format!(
                "search_depth must be between 0 and {}, got {}",
                SEARCH_DEPTH, self.search_depth
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            search_depth: SEARCH_DEPTH,
            first_player: FirstPlayerMode::Random,
        }
    }
}
