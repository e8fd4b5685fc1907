use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::{env, fs};

const DEFAULT_MAX_POOL_SIZE: u32 = 4;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Where exports are written. The user's Downloads directory when unset.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: default_database_path(),
            export_dir: None,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(&path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        Config::from_toml(&config)
    }

    pub fn from_toml(config: &str) -> Result<Config, anyhow::Error> {
        let config: Config = toml::from_str(config).context("Unable to parse config")?;
        Ok(config)
    }

    /// Starts from the defaults and overrides whatever is set in the environment.
    pub fn from_env() -> Result<Config, anyhow::Error> {
        let mut config = Config::default();
        if let Some(database_path) = read_env("FINANCE_TRACKER_DATABASE") {
            config.database_path = PathBuf::from(database_path);
        }
        if let Some(export_dir) = read_env("FINANCE_TRACKER_EXPORT_DIR") {
            config.export_dir = Some(PathBuf::from(export_dir));
        }
        if let Some(max_pool_size) = read_env("FINANCE_TRACKER_POOL_SIZE") {
            config.max_pool_size = max_pool_size
                .parse()
                .context("Unable to parse FINANCE_TRACKER_POOL_SIZE value")?;
        }
        Ok(config)
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn default_database_path() -> PathBuf {
    state_dir().join("finance.db")
}

fn default_max_pool_size() -> u32 {
    DEFAULT_MAX_POOL_SIZE
}

fn state_dir() -> PathBuf {
    if let Ok(state_env) = env::var("STATE_DIRECTORY") {
        return PathBuf::from(state_env);
    }

    PathBuf::from("data")
}
