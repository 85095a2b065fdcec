//! @acp:module "Configuration"
//! @acp:summary "Wizard configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".erdf.config.json";

fn default_latency_ms() -> u64 {
    crate::wizard::DEFAULT_LATENCY.as_millis() as u64
}

fn default_user() -> String {
    "guest@example.com".to_string()
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".erdf/session.json")
}

fn default_export_path() -> PathBuf {
    PathBuf::from(crate::document::EXPORT_FILE_NAME)
}

/// @acp:summary "Main wizard configuration structure"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Simulated generation latency in milliseconds
    #[serde(default = "default_latency_ms")]
    pub generation_latency_ms: u64,

    /// User identity shown in headers (email-like)
    #[serde(default = "default_user")]
    pub user: String,

    /// Where the CLI keeps the session snapshot between runs
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,

    /// Default export target
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation_latency_ms: default_latency_ms(),
            user: default_user(),
            session_path: default_session_path(),
            export_path: default_export_path(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load config from a file, or defaults when the file does not exist"
    pub fn load_or_default<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn generation_latency(&self) -> Duration {
        Duration::from_millis(self.generation_latency_ms)
    }
}
