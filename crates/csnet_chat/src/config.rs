//! Simulation configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChatError, ChatResult};

pub const DEFAULT_GREETING: &str =
    "Hello! I'm your AI Customer Service Network. How can I help you today?";

/// Timing and presentation settings for a conversation session.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// analysis_delay_ms = 250
/// agent_delay_ms = 400
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Wait between the routing agent's running and completed records
    pub analysis_delay_ms: u64,
    /// Wait between each specialized agent's running and completed records
    pub agent_delay_ms: u64,
    /// Entries shown by the recent activity view
    pub recent_activity_limit: usize,
    /// Opening agent message; empty disables it
    pub greeting: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 1000,
            agent_delay_ms: 1500,
            recent_activity_limit: 5,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl SimulationConfig {
    /// Default configuration with every delay set to zero
    pub fn instant() -> Self {
        Self::default().analysis_delay(0).agent_delay(0)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ChatResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ChatError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ChatError::Serialization(message) => ChatError::ConfigParse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        debug!("Loaded simulation config from {:?}", path);
        Ok(config)
    }

    /// Parse from TOML text
    pub fn from_toml(content: &str) -> ChatResult<Self> {
        toml::from_str(content).map_err(|e| ChatError::Serialization(e.to_string()))
    }

    pub fn analysis_delay(mut self, ms: u64) -> Self {
        self.analysis_delay_ms = ms;
        self
    }

    pub fn agent_delay(mut self, ms: u64) -> Self {
        self.agent_delay_ms = ms;
        self
    }

    pub fn recent_activity_limit(mut self, limit: usize) -> Self {
        self.recent_activity_limit = limit;
        self
    }

    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn analysis_duration(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn agent_duration(&self) -> Duration {
        Duration::from_millis(self.agent_delay_ms)
    }
}
