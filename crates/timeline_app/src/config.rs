//! Layered settings: built-in defaults, then an optional RON file, then flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use timeline_core::{Site, SiteError, DEFAULT_SITE};
use timeline_engine::{
    FetchSettings, PostSelectors, SelectorError, DEFAULT_BODY_SELECTOR, DEFAULT_POST_SELECTOR,
    DEFAULT_TIMESTAMP_SELECTOR,
};
use timeline_logging::timeline_info;

use crate::cli::Cli;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub site: String,
    pub fetch: FetchConfig,
    pub selectors: SelectorConfig,
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
            fetch: FetchConfig::default(),
            selectors: SelectorConfig::default(),
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            redirect_limit: defaults.redirect_limit,
            max_bytes: defaults.max_bytes,
            user_agent: defaults.user_agent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub post: String,
    pub timestamp: String,
    pub body: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            post: DEFAULT_POST_SELECTOR.to_string(),
            timestamp: DEFAULT_TIMESTAMP_SELECTOR.to_string(),
            body: DEFAULT_BODY_SELECTOR.to_string(),
        }
    }
}

/// Validated settings, ready to build the engine from.
#[derive(Debug, Clone)]
pub struct Settings {
    pub site: Site,
    pub fetch: FetchSettings,
    pub selectors: PostSelectors,
    pub pretty: bool,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        timeline_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reads `--config` if given, then lets the other flags override it.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match cli.config.as_deref() {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(site) = &cli.site {
            self.site = site.clone();
        }
        if let Some(secs) = cli.timeout {
            self.fetch.request_timeout_secs = secs;
        }
        if cli.pretty {
            self.pretty = true;
        }
    }

    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let site = Site::parse(&self.site)?;
        let selectors = PostSelectors::parse(
            &self.selectors.post,
            &self.selectors.timestamp,
            &self.selectors.body,
        )?;
        let fetch = FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            redirect_limit: self.fetch.redirect_limit,
            max_bytes: self.fetch.max_bytes,
            user_agent: self.fetch.user_agent.clone(),
            ..FetchSettings::default()
        };

        Ok(Settings {
            site,
            fetch,
            selectors,
            pretty: self.pretty,
        })
    }
}
