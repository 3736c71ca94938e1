use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the finished unit is installed into
    #[serde(default = "default_unit_dir")]
    pub unit_dir: PathBuf,

    /// Default delay offered for RestartSec
    #[serde(default = "default_restart_sec")]
    pub default_restart_sec: u32,

    /// Interpreter overrides by script extension, e.g. `py = "/opt/python3"`
    #[serde(default)]
    pub interpreters: HashMap<String, String>,
}

fn default_unit_dir() -> PathBuf {
    PathBuf::from(crate::constants::unit::SYSTEM_DIR)
}

fn default_restart_sec() -> u32 {
    crate::constants::restart::DEFAULT_SEC
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_dir: default_unit_dir(),
            default_restart_sec: default_restart_sec(),
            interpreters: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("unitsmith").join("config.toml");
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path)?;
                let config: Config = toml::from_str(&content)?;
                return Ok(config);
            }
        }
        Ok(Config::default())
    }
}
