use std::fs;
use std::path::{Path, PathBuf};

use dashboard_app::MonitorSettings;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "buffer-dashboard";
const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_PORT: u16 = 8111;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    pub port: u16,
    /// Overrides `OPENCLAW_HOME` and `~/.openclaw`.
    pub openclaw_home: Option<String>,
    #[serde(flatten)]
    pub monitor: MonitorSettings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            openclaw_home: None,
            monitor: MonitorSettings::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    /// File the config was read from; `None` when defaults were used.
    pub file: Option<PathBuf>,
}

/// Reads the config file if one exists. An explicit `--config` path must exist.
pub fn load(explicit: Option<&Path>) -> Result<ConfigLoad, String> {
    let file = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(format!("config file not found: {}", path.display()));
            }
            path.to_path_buf()
        }
        None => match default_config_file() {
            Some(path) if path.exists() => path,
            _ => {
                return Ok(ConfigLoad {
                    config: CliConfig::default(),
                    file: None,
                });
            }
        },
    };

    let contents = fs::read_to_string(&file)
        .map_err(|err| format!("read config {}: {}", file.display(), err))?;
    let config = parse(&contents).map_err(|err| format!("parse config {}: {}", file.display(), err))?;
    Ok(ConfigLoad {
        config,
        file: Some(file),
    })
}

pub fn parse(contents: &str) -> Result<CliConfig, toml::de::Error> {
    toml::from_str(contents)
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
