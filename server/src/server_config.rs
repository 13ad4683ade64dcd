use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::{DEFAULT_SEARCH_WORKERS, SearchStrategy};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "tictactoe_server.yaml";
pub const DEFAULT_MAX_USERNAME_LENGTH: usize = 50;

pub fn get_config_manager(
    path: &str,
) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub parallel: bool,
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            workers: DEFAULT_SEARCH_WORKERS,
        }
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<(), String> {
        // One worker per top-level candidate is the most that can be busy.
        if self.workers == 0 || self.workers > 9 {
            return Err(format!(
                "Search workers must be between 1 and 9, got {}",
                self.workers
            ));
        }
        Ok(())
    }
}

impl SearchConfig {
    pub fn to_strategy(&self) -> Result<SearchStrategy, String> {
        if !self.parallel {
            return Ok(SearchStrategy::Sequential);
        }
        SearchStrategy::parallel(self.workers).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub max_username_length: usize,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            max_username_length: DEFAULT_MAX_USERNAME_LENGTH,
            search: SearchConfig::default(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("Invalid bind address '{}'", self.bind_address));
        }
        if self.max_username_length == 0 {
            return Err("Max username length must be positive".to_string());
        }
        self.search.validate()?;
        Ok(())
    }
}
