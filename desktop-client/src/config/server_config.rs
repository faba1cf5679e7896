use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub address: String,
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("server address must not be empty".to_string());
        }
        Ok(())
    }
}
