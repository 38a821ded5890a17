use serde::{Deserialize, Serialize};
use tracing::debug;

use carom_core::table::{TABLE_HEIGHT, TABLE_WIDTH, Table};

/// Runtime settings for the session loop.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaromConfig {
    /// Playfield width in pixels.
    pub table_width: f32,
    /// Playfield height in pixels.
    pub table_height: f32,
    /// Target simulation frames per second.
    pub frame_rate: u32,
}

impl Default for CaromConfig {
    fn default() -> Self {
        Self {
            table_width: TABLE_WIDTH,
            table_height: TABLE_HEIGHT,
            frame_rate: 60,
        }
    }
}

impl CaromConfig {
    /// Load configuration from the path in `CAROM_CONFIG`, falling back
    /// to `config/carom.toml`, falling back to built-in defaults.
    pub fn load() -> Self {
        let path =
            std::env::var("CAROM_CONFIG").unwrap_or_else(|_| "config/carom.toml".to_string());

        if let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            debug!(path = %path, "loaded configuration");
            return config;
        }

        debug!("using default configuration");
        Self::default()
    }

    pub fn table(&self) -> Table {
        Table::new(self.table_width, self.table_height)
    }
}
