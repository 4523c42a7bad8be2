use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FabsenseError, Result};

/// Top-level configuration for the Fabsense assistant.
///
/// Loaded from `~/.fabsense/config.toml` by default. Every section falls back
/// to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FabsenseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl FabsenseConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FabsenseConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.chat.reply_delay_min_ms > self.chat.reply_delay_max_ms {
            return Err(FabsenseError::Config(format!(
                "chat.reply_delay_min_ms ({}) exceeds chat.reply_delay_max_ms ({})",
                self.chat.reply_delay_min_ms, self.chat.reply_delay_max_ms
            )));
        }
        if self.chat.user_label.trim().is_empty() {
            return Err(FabsenseError::Config(
                "chat.user_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Assistant conversation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Lower bound of the simulated "thinking" delay before a reply.
    pub reply_delay_min_ms: u64,
    /// Upper bound (inclusive) of the simulated reply delay.
    pub reply_delay_max_ms: u64,
    /// User name recorded in conversation exports.
    pub user_label: String,
    /// Prefix for generated session identifiers.
    pub session_prefix: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: 1500,
            reply_delay_max_ms: 2500,
            user_label: "Engineer Chen".to_string(),
            session_prefix: "demo-session-".to_string(),
        }
    }
}

/// Conversation export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory that receives `chat-export-*.json` files.
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}
