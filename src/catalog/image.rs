//! Card image references.

use crate::deck::enrich::ImageReference;

/// Default render template: zhCN card art, 512px wide.
pub const DEFAULT_IMAGE_URL_TEMPLATE: &str =
    "https://art.hearthstonejson.com/v1/render/latest/zhCN/512x/{CARD_ID}.png";

/// Placeholder substituted with the card's stable id.
pub const CARD_ID_PLACEHOLDER: &str = "{CARD_ID}";

/// URL template with a single `{CARD_ID}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTemplate {
    template: String,
}

impl ImageTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into() }
    }

    pub fn url_for(&self, card_id: &str) -> String {
        self.template.replacen(CARD_ID_PLACEHOLDER, card_id, 1)
    }
}

impl Default for ImageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_URL_TEMPLATE)
    }
}

impl ImageReference for ImageTemplate {
    fn image_reference_for(&self, stable_id: &str) -> String {
        self.url_for(stable_id)
    }
}
