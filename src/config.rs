//! Runtime configuration.
//!
//! Every setting can come from a command-line flag or its environment
//! variable; the flag wins.

use std::path::PathBuf;
use std::time::Duration;
use clap::Args;

use crate::catalog::{image::DEFAULT_IMAGE_URL_TEMPLATE, ConfiguredSource, FileSource, HttpSource, ImageTemplate};

/// HearthstoneJSON card list, simplified Chinese locale.
pub const DEFAULT_CARD_API_URL: &str = "https://api.hearthstonejson.com/v1/latest/zhCN/cards.json";

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Card list endpoint
    #[arg(long, env = "CARD_API_URL", default_value = DEFAULT_CARD_API_URL, global = true)]
    pub card_api_url: String,

    /// Read cards from a local JSON snapshot instead of the card API
    #[arg(long, env = "CARDS_FILE", global = true)]
    pub cards_file: Option<PathBuf>,

    /// Card image URL template; `{CARD_ID}` is replaced by the card id
    #[arg(long, env = "CARD_IMAGE_URL_TEMPLATE", default_value = DEFAULT_IMAGE_URL_TEMPLATE, global = true)]
    pub image_template: String,

    /// Hours before the cached card list is fetched again
    #[arg(long = "cache-ttl-hours", env = "CARD_DATA_TTL", default_value_t = 24, global = true)]
    pub cache_ttl_hours: u64,

    /// Log filter, e.g. `info` or `hearthstone_decks=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

impl Config {
    pub fn card_source(&self) -> ConfiguredSource {
        match &self.cards_file {
            Some(path) => ConfiguredSource::File(FileSource::new(path.clone())),
            None => ConfiguredSource::Http(HttpSource::new(self.card_api_url.clone())),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.saturating_mul(60 * 60))
    }

    pub fn image_template(&self) -> ImageTemplate {
        ImageTemplate::new(self.image_template.clone())
    }
}
