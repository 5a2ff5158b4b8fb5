use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

/// The subset of `/settings` the front end displays.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SiteSettings {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl SiteSettings {
    /// Stand-in used when the settings endpoint is unreachable or requires
    /// authentication.
    pub fn fallback(site: &SiteConfig) -> Self {
        SiteSettings {
            title: site.title.clone(),
            description: site.description.clone(),
            url: site.url.to_string(),
        }
    }

    /// Fills blank fields from `fallback`.
    pub fn or(mut self, fallback: SiteSettings) -> Self {
        if self.title.trim().is_empty() {
            self.title = fallback.title;
        }
        if self.description.trim().is_empty() {
            self.description = fallback.description;
        }
        if self.url.trim().is_empty() {
            self.url = fallback.url;
        }
        self
    }
}
