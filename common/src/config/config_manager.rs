use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer)
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    /// Loads and validates the stored config, falling back to `Default` when
    /// nothing is stored. The result is cached.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let config = match self.config_content_provider.get_config_content()? {
            Some(content) => self.config_serializer.deserialize(&content)?,
            None => TConfig::default(),
        };

        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }

    /// Writes the default config unless one is already stored. Returns whether
    /// anything was written.
    pub fn write_default_if_missing(&self) -> Result<bool, String> {
        if self.config_content_provider.get_config_content()?.is_some() {
            return Ok(false);
        }
        self.set_config(&TConfig::default())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct SampleConfig {
        workers: usize,
        name: String,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self {
                workers: 5,
                name: "sample".to_string(),
            }
        }
    }

    impl Validate for SampleConfig {
        fn validate(&self) -> Result<(), String> {
            if self.workers == 0 {
                return Err("workers must be positive".to_string());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryProvider {
        content: Mutex<Option<String>>,
    }

    impl ConfigContentProvider for MemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.lock().unwrap().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.lock().unwrap() = Some(content.to_string());
            Ok(())
        }
    }

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_tictactoe_config_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_config_falls_back_to_default() {
        let manager: ConfigManager<_, SampleConfig> =
            ConfigManager::new(MemoryProvider::default(), YamlConfigSerializer);
        assert_eq!(manager.get_config().unwrap(), SampleConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let provider = MemoryProvider::default();
        provider.set_config_content("workers: 0\nname: bad\n").unwrap();
        let manager: ConfigManager<_, SampleConfig> =
            ConfigManager::new(provider, YamlConfigSerializer);

        let result = manager.get_config();
        assert!(result.unwrap_err().contains("workers must be positive"));

        let bad = SampleConfig {
            workers: 0,
            name: "bad".to_string(),
        };
        assert!(manager.set_config(&bad).is_err());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let provider = MemoryProvider::default();
        provider.set_config_content("workers: [not a number").unwrap();
        let manager: ConfigManager<_, SampleConfig> =
            ConfigManager::new(provider, YamlConfigSerializer);
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_config_round_trips_through_file() {
        let file_path = get_temp_file_path();
        let manager: ConfigManager<_, SampleConfig> = ConfigManager::from_yaml_file(&file_path);

        assert!(manager.write_default_if_missing().unwrap());
        assert!(!manager.write_default_if_missing().unwrap());

        let custom = SampleConfig {
            workers: 3,
            name: "custom".to_string(),
        };
        manager.set_config(&custom).unwrap();

        let reloaded: ConfigManager<_, SampleConfig> = ConfigManager::from_yaml_file(&file_path);
        assert_eq!(reloaded.get_config().unwrap(), custom);

        let _ = std::fs::remove_file(&file_path);
    }
}
