use serde::{Deserialize, Serialize};
use sprout_layout::LayoutOptions;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "sprout.config.json";

/// Sprout configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source directory containing serialized `.json` documents
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Targets to emit (e.g., "js", "html", "python")
    #[serde(default = "default_emit")]
    pub emit: Vec<String>,

    /// Overrides for the visual layout constants
    #[serde(default)]
    pub layout: LayoutOptions,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_emit() -> Vec<String> {
    vec!["js".to_string(), "html".to_string(), "python".to_string()]
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn emits(&self, target: &str) -> bool {
        self.emit.iter().any(|t| t == target)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            emit: default_emit(),
            layout: LayoutOptions::default(),
        }
    }
}
