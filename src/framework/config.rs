use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::games::ppt::{
    daily::{BeforeStart, DailySelector, DEFAULT_TIMEZONE},
    AttemptPolicy,
};

pub const CONFIG_PATH_VAR: &str = "PPT_TOML";
pub const DEFAULT_CONFIG_PATH: &str = "./ppt.toml";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file read error: {0}")]
    Read(::config::ConfigError),

    #[error("parsing error: {0}")]
    Parse(::config::ConfigError),

    #[error("unknown timezone `{0}`")]
    Timezone(String),
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub puzzles: PuzzlesConfig,
    pub daily: DailyConfig,
    pub game: GameConfig,
    pub store: StoreConfig,
    pub share: ShareConfig,
}

impl Config {
    /// Reads `path`, or whatever `PPT_TOML` names, or `./ppt.toml`.
    ///
    /// A missing file leaves every key at its default. `PPT_*` variables
    /// override the file, with `__` between section and key.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        dotenvy::dotenv().ok();

        let path = if let Some(path) = path {
            info!(path = %path.display(), "using config file from command line");
            path.to_owned()
        } else if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            info!(path, "using config file from {CONFIG_PATH_VAR}");
            PathBuf::from(path)
        } else {
            warn!(
                path = DEFAULT_CONFIG_PATH,
                "{CONFIG_PATH_VAR} env unset, using default path"
            );
            PathBuf::from(DEFAULT_CONFIG_PATH)
        };

        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let config: Self = ::config::Config::builder()
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("PPT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)?;

        config.daily.timezone()?;
        info!("config loaded");

        Ok(config)
    }

    pub fn selector(&self, start: NaiveDate) -> Result<DailySelector, Error> {
        Ok(DailySelector::new(start)
            .timezone(self.daily.timezone()?)
            .before_start(self.daily.before_start))
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PuzzlesConfig {
    pub path: PathBuf,
}

impl Default for PuzzlesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./puzzles.json"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DailyConfig {
    timezone: String,
    pub before_start: BeforeStart,
}

impl DailyConfig {
    pub fn timezone(&self) -> Result<Tz, Error> {
        self.timezone
            .parse()
            .map_err(|_| Error::Timezone(self.timezone.clone()))
    }
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.name().to_owned(),
            before_start: BeforeStart::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GameConfig {
    pub attempts: AttemptPolicy,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./ppt-session.json"),
            key: crate::framework::store::DEFAULT_KEY.to_owned(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ShareConfig {
    pub url: Option<String>,
}
