//! Configuration Module
//! Resolves where the directory CSV lives from the public-asset base path.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Asset name of the directory CSV under the public base path.
pub const DATA_FILE: &str = "fakeDataBase.csv";

/// Base path used when `PUBLIC_URL` is unset.
pub const DEFAULT_PUBLIC_URL: &str = "public";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PUBLIC_URL is not valid unicode")]
    NotUnicode,
}

/// Where the directory CSV lives once the base path is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    Url(String),
    File(PathBuf),
}

impl std::fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceLocation::Url(url) => write!(f, "{}", url),
            ResourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub public_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_URL)
    }
}

impl Config {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into(),
        }
    }

    /// Read `PUBLIC_URL`. Call `dotenvy::dotenv()` first to honor `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("PUBLIC_URL") {
            Ok(public_url) => Ok(Self::new(public_url)),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode),
        }
    }

    pub fn resource_location(&self) -> ResourceLocation {
        let base = self.public_url.trim_end_matches('/');

        if base.starts_with("http://") || base.starts_with("https://") {
            ResourceLocation::Url(format!("{}/{}", base, DATA_FILE))
        } else if base.is_empty() {
            ResourceLocation::File(PathBuf::from(DATA_FILE))
        } else {
            ResourceLocation::File(PathBuf::from(base).join(DATA_FILE))
        }
    }
}
