use crate::errors::EditorError;
use pagecraft_template::{FormatEnv, Locale};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Rapid prop/style edits on one node within this window share an undo step
pub const DEFAULT_BATCH_WINDOW_MS: u64 = 500;

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undo levels (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_batch_window_ms")]
    pub batch_window_ms: u64,

    /// Namespace hashed into the seed of generated ids
    #[serde(default = "default_id_namespace")]
    pub id_namespace: String,

    /// Column count used when projecting a container onto a grid
    #[serde(default = "default_grid_columns")]
    pub default_grid_columns: u32,

    #[serde(default)]
    pub locale: Locale,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_batch_window_ms() -> u64 {
    DEFAULT_BATCH_WINDOW_MS
}

fn default_id_namespace() -> String {
    "pagecraft".to_string()
}

fn default_grid_columns() -> u32 {
    2
}

impl EditorConfig {
    /// Load config from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Load `pagecraft.config.json` from a directory
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        Self::load(dir.as_ref().join(DEFAULT_CONFIG_NAME))
    }

    pub fn batch_window(&self) -> Duration {
        Duration::from_millis(self.batch_window_ms)
    }

    /// Formatting environment for template previews
    pub fn format_env(&self) -> FormatEnv {
        FormatEnv::new(self.locale)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            batch_window_ms: default_batch_window_ms(),
            id_namespace: default_id_namespace(),
            default_grid_columns: default_grid_columns(),
            locale: Locale::default(),
        }
    }
}
