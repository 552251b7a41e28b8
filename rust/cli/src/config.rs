//! Layered configuration: built-in defaults, then a TOML file named by
//! `RINKSIDE_CONFIG`, then `RINKSIDE_*` environment variables. Command-line
//! flags are applied last by each command.

use serde::{Deserialize, Serialize};
use std::fs;

use rinkside_engine::rules::DEFAULT_GAME_LENGTH;
use rinkside_teams::{MAX_RATING, MIN_RATING};

pub const CONFIG_ENV: &str = "RINKSIDE_CONFIG";
pub const SEED_ENV: &str = "RINKSIDE_SEED";
pub const GAME_LENGTH_ENV: &str = "RINKSIDE_GAME_LENGTH";
pub const HOME_STRENGTH_ENV: &str = "RINKSIDE_HOME_STRENGTH";
pub const AWAY_STRENGTH_ENV: &str = "RINKSIDE_AWAY_STRENGTH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub game_length: u32,
    pub home_strength: u8,
    pub away_strength: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            game_length: DEFAULT_GAME_LENGTH,
            home_strength: 77,
            away_strength: 73,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub game_length: ValueSource,
    pub home_strength: ValueSource,
    pub away_strength: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            game_length: ValueSource::Default,
            home_strength: ValueSource::Default,
            away_strength: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.game_length {
            cfg.game_length = v;
            sources.game_length = ValueSource::File;
        }
        if let Some(v) = f.home_strength {
            cfg.home_strength = v;
            sources.home_strength = ValueSource::File;
        }
        if let Some(v) = f.away_strength {
            cfg.away_strength = v;
            sources.away_strength = ValueSource::File;
        }
    }

    if let Some(seed) = env_value(SEED_ENV) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(len) = env_value(GAME_LENGTH_ENV) {
        cfg.game_length = len
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid game length '{}'", len)))?;
        sources.game_length = ValueSource::Env;
    }
    if let Some(v) = env_value(HOME_STRENGTH_ENV) {
        cfg.home_strength = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid home strength '{}'", v)))?;
        sources.home_strength = ValueSource::Env;
    }
    if let Some(v) = env_value(AWAY_STRENGTH_ENV) {
        cfg.away_strength = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid away strength '{}'", v)))?;
        sources.away_strength = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    game_length: Option<u32>,
    #[serde(default)]
    home_strength: Option<u8>,
    #[serde(default)]
    away_strength: Option<u8>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.game_length == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: game_length must be >0".into(),
        ));
    }
    for (name, v) in [
        ("home_strength", cfg.home_strength),
        ("away_strength", cfg.away_strength),
    ] {
        if !(MIN_RATING..=MAX_RATING).contains(&v) {
            return Err(ConfigError::Invalid(format!(
                "Invalid configuration: {} must be within {}..={}",
                name, MIN_RATING, MAX_RATING
            )));
        }
    }
    Ok(())
}
