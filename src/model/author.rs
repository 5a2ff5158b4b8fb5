use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Author {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub description: String,
    pub link: String,
    pub slug: String,
    /// Avatar urls keyed by pixel size ("24", "48", "96").
    pub avatar_urls: IndexMap<String, String>,
}

impl Author {
    /// Largest avatar not wider than `max_px`.
    pub fn avatar_url(&self, max_px: u32) -> Option<&str> {
        self.avatar_urls
            .iter()
            .filter_map(|(size, url)| Some((size.parse::<u32>().ok()?, url)))
            .filter(|(size, _)| *size <= max_px)
            .max_by_key(|(size, _)| *size)
            .map(|(_, url)| url.as_str())
    }
}
