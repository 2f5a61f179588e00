//! Where the card list comes from.

use std::future::Future;
use std::path::PathBuf;
use log::{debug, info};
use crate::deck::types::models::CardRecord;
use super::error::Result;

/// Fetches the complete card list in one go.
pub trait CardSource {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<CardRecord>>> + Send;

    /// Short description for log output.
    fn describe(&self) -> String;
}

/// Card list served as a JSON array over HTTP (the HearthstoneJSON API).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl CardSource for HttpSource {
    async fn fetch_all(&self) -> Result<Vec<CardRecord>> {
        info!("Fetching card data from {}", self.url);
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let cards: Vec<CardRecord> = response.json().await?;
        debug!("Card API returned {} entries", cards.len());
        Ok(cards)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Card list read from a local JSON snapshot of the card API.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CardSource for FileSource {
    async fn fetch_all(&self) -> Result<Vec<CardRecord>> {
        info!("Loading card data from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        let cards: Vec<CardRecord> = serde_json::from_slice(&bytes)?;
        Ok(cards)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed in-memory card list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    cards: Vec<CardRecord>,
}

impl StaticSource {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self { cards }
    }
}

impl CardSource for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<CardRecord>> {
        Ok(self.cards.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory cards", self.cards.len())
    }
}

/// Either network or file backed, picked from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpSource),
    File(FileSource),
}

impl CardSource for ConfiguredSource {
    async fn fetch_all(&self) -> Result<Vec<CardRecord>> {
        match self {
            ConfiguredSource::Http(source) => source.fetch_all().await,
            ConfiguredSource::File(source) => source.fetch_all().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            ConfiguredSource::Http(source) => source.describe(),
            ConfiguredSource::File(source) => source.describe(),
        }
    }
}
