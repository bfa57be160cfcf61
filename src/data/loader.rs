//! Business Data Loader Module
//! Fetches the directory CSV and normalizes it, substituting the built-in
//! dataset on any failure.

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::fallback::fallback_businesses;
use super::processor::{ProcessorError, RowProcessor};
use super::record::BusinessRecord;
use crate::config::{Config, ResourceLocation};

/// Every way a load can fail. Absorbed by [`BusinessDataLoader::load`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] ProcessorError),
}

/// Transport for the raw CSV text.
#[async_trait]
pub trait CsvSource: Send + Sync {
    async fn fetch_text(&self) -> Result<String, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileSource {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn build_client() -> Client {
    Client::builder()
        .user_agent(concat!("bizdir/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build http client")
}

pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(build_client(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CsvSource for HttpSource {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        let res = self.client.get(&self.url).send().await?;
        debug!("Fetch response: {} for {}", res.status(), self.url);

        if !res.status().is_success() {
            return Err(LoadError::Status {
                status: res.status().as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(res.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// In-memory CSV text.
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl CsvSource for StaticSource {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "<static>".to_string()
    }
}

/// Pick the transport matching the configured resource location.
pub fn source_for(config: &Config) -> Box<dyn CsvSource> {
    match config.resource_location() {
        ResourceLocation::Url(url) => Box::new(HttpSource::new(url)),
        ResourceLocation::File(path) => Box::new(FileSource::new(path)),
    }
}

/// Loads business records from a CSV source.
///
/// Each call to [`load`](Self::load) fetches and parses from scratch; there
/// is no caching and no de-duplication of concurrent loads.
pub struct BusinessDataLoader {
    source: Box<dyn CsvSource>,
}

impl BusinessDataLoader {
    pub fn new(source: impl CsvSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            source: source_for(config),
        }
    }

    /// Load all records, or the fallback dataset if anything fails.
    ///
    /// Never returns an empty list. Callers cannot tell whether the result
    /// came from the CSV or from the fallback.
    pub async fn load(&self) -> Vec<BusinessRecord> {
        let result = match self.fetch().await {
            Ok(text) => normalize(&text),
            Err(e) => Err(e),
        };
        self.settle(result)
    }

    /// Same as [`load`](Self::load) with a caller-supplied generator for the
    /// `verified` flag.
    pub async fn load_with_rng<R: Rng>(&self, rng: &mut R) -> Vec<BusinessRecord> {
        let result = match self.fetch().await {
            Ok(text) => RowProcessor::process(&text, rng).map_err(LoadError::from),
            Err(e) => Err(e),
        };
        self.settle(result)
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        debug!("Fetching CSV from {}", self.source.describe());
        let text = self.source.fetch_text().await?;
        debug!(
            "CSV data first 100 chars: {}",
            text.chars().take(100).collect::<String>()
        );
        Ok(text)
    }

    fn settle(&self, result: Result<Vec<BusinessRecord>, LoadError>) -> Vec<BusinessRecord> {
        match result {
            Ok(records) => {
                info!("Loaded {} businesses from {}", records.len(), self.source.describe());
                records
            }
            Err(e) => {
                warn!(
                    "Error loading business data from {}: {}; using fallback data",
                    self.source.describe(),
                    e
                );
                fallback_businesses()
            }
        }
    }
}

fn normalize(text: &str) -> Result<Vec<BusinessRecord>, LoadError> {
    Ok(RowProcessor::process(text, &mut rand::rng())?)
}
