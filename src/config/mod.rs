use crate::models::UserConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the user settings inside the configuration directory.
pub const USER_CONFIG_FILE: &str = "Compare Settings.yaml";

/// Configuration manager for loading and saving the YAML settings file.
///
/// Manages `Compare Settings.yaml`: default widget selections, placeholder
/// content, the raw-file marker and logging options.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    user_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "imgcompare Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            user_config_path: config_dir.join(USER_CONFIG_FILE),
            config_dir,
        })
    }

    /// Load the user configuration file.
    ///
    /// # Returns
    /// The loaded UserConfig, or default if file doesn't exist
    pub fn load_user_config(&self) -> Result<UserConfig> {
        if !self.user_config_path.exists() {
            tracing::warn!(
                "User config file not found at {}, using defaults",
                self.user_config_path
            );
            return Ok(UserConfig::default());
        }

        let file_contents = fs::read_to_string(&self.user_config_path)
            .with_context(|| format!("Failed to read user config: {}", self.user_config_path))?;

        // An empty file deserializes to unit, not a mapping
        if file_contents.trim().is_empty() {
            tracing::warn!("User config {} is empty, using defaults", self.user_config_path);
            return Ok(UserConfig::default());
        }

        let config: UserConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse user config: {}", self.user_config_path))?;

        tracing::info!("Loaded user config from {}", self.user_config_path);
        Ok(config)
    }

    /// Save the user configuration file.
    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize user config to YAML")?;

        fs::write(&self.user_config_path, yaml_string)
            .with_context(|| format!("Failed to write user config: {}", self.user_config_path))?;

        tracing::info!("Saved user config to {}", self.user_config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn user_config_path(&self) -> &Utf8Path {
        &self.user_config_path
    }
}
