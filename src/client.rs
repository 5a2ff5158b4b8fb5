//! Content API client.
//!
//! Every call issues one GET (one per upstream page for [`CmsClient::list_all`])
//! and deserializes the body into the requested type. Failures propagate,
//! except through [`CmsClient::fetch_or`] which substitutes a fallback.

mod query;

pub use query::{
    FetchOptions, Order, OrderBy, Resource, StatusFilter, DEFAULT_PER_PAGE, MAX_PER_PAGE,
};

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::config::{ApiUrl, CmsConfig};
use crate::error::{Error, Result};
use crate::model::{Category, Media, Page, Post, SiteSettings, Tag};

/// Response header carrying the number of pages of a collection.
const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Single-resource lookups only need related entities inlined.
const EMBED_QUERY: &str = "_embed=true";

#[derive(Clone, Debug)]
pub struct CmsClient {
    http: reqwest::Client,
    api_url: ApiUrl,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| Error::Transport {
                url: config.api_url.to_string(),
                source,
            })?;

        Ok(CmsClient {
            http,
            api_url: config.api_url.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, endpoint: &str, query: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        if query.is_empty() {
            format!("{}/{}", self.api_url, endpoint)
        } else {
            format!("{}/{}?{}", self.api_url, endpoint, query)
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url, "fetching from content API");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| {
                error!(url, error = %source, "content API request failed");
                Error::Transport {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
        let body = response.bytes().await.map_err(|source| {
            error!(url, error = %source, "reading content API response failed");
            Error::Transport {
                url: url.to_string(),
                source,
            }
        })?;

        serde_json::from_slice(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// GET `{api_url}/{endpoint}?{query}` and deserialize the body as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, query: &str) -> Result<T> {
        let url = self.url(endpoint, query);
        let response = self.get(&url).await?;
        Self::read_json(&url, response).await
    }

    /// Like [`fetch`](Self::fetch), but any failure is logged and replaced
    /// by `fallback`. Only for data a page can render without.
    pub async fn fetch_or<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
        fallback: T,
    ) -> T {
        match self.fetch(endpoint, query).await {
            Ok(value) => value,
            Err(err) => {
                warn!(endpoint, error = %err, "content API unavailable, using fallback");
                fallback
            }
        }
    }

    /// One page of `R`.
    pub async fn list<R: Resource>(&self, options: &FetchOptions) -> Result<Vec<R>> {
        let query = options.query_string::<R>()?;
        self.fetch(R::PATH, &query).await
    }

    /// Every page of `R`, starting at `options.page`.
    ///
    /// Stops at the page count the API reports, or at the first short page
    /// when it reports none. Any failed page fails the whole listing.
    pub async fn list_all<R: Resource>(&self, options: &FetchOptions) -> Result<Vec<R>> {
        let per_page = options
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let mut page = options.page.unwrap_or(1).max(1);
        let mut items = Vec::new();

        loop {
            let query = options
                .clone()
                .per_page(per_page)
                .page(page)
                .query_string::<R>()?;
            let url = self.url(R::PATH, &query);

            let response = self.get(&url).await?;
            let total_pages = total_pages(&response);
            let batch: Vec<R> = Self::read_json(&url, response).await?;
            let short = batch.len() < per_page as usize;
            items.extend(batch);

            match total_pages {
                Some(total) if page >= total => break,
                None if short => break,
                _ => page += 1,
            }
        }

        debug!(resource = R::PATH, count = items.len(), "fetched all pages");
        Ok(items)
    }

    /// First item with `slug`, or `None` when nothing matches.
    pub async fn by_slug<R: Resource>(&self, slug: &str) -> Result<Option<R>> {
        let options = FetchOptions::new().slug(slug).embed(true);
        Ok(self.list::<R>(&options).await?.into_iter().next())
    }

    pub async fn by_id<R: Resource>(&self, id: u64) -> Result<R> {
        self.fetch(&format!("{}/{}", R::PATH, id), EMBED_QUERY).await
    }

    pub async fn get_pages(&self, options: &FetchOptions) -> Result<Vec<Page>> {
        self.list(options).await
    }

    pub async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        self.by_slug(slug).await
    }

    pub async fn get_page_by_id(&self, id: u64) -> Result<Page> {
        self.by_id(id).await
    }

    pub async fn get_posts(&self, options: &FetchOptions) -> Result<Vec<Post>> {
        self.list(options).await
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        self.by_slug(slug).await
    }

    pub async fn get_post_by_id(&self, id: u64) -> Result<Post> {
        self.by_id(id).await
    }

    pub async fn get_media_by_id(&self, id: u64) -> Result<Media> {
        self.by_id(id).await
    }

    pub async fn get_categories(&self, options: &FetchOptions) -> Result<Vec<Category>> {
        self.list(options).await
    }

    pub async fn get_tags(&self, options: &FetchOptions) -> Result<Vec<Tag>> {
        self.list(options).await
    }

    /// Site settings, or `fallback` when the endpoint fails (it usually
    /// requires authentication). Blank fetched fields are filled from
    /// `fallback` too.
    pub async fn get_settings(&self, fallback: SiteSettings) -> SiteSettings {
        self.fetch_or::<SiteSettings>("settings", "", fallback.clone())
            .await
            .or(fallback)
    }
}

fn total_pages(response: &reqwest::Response) -> Option<u32> {
    response
        .headers()
        .get(TOTAL_PAGES_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
