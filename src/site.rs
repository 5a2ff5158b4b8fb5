//! Fetches what each generated document needs and renders it.

use futures_util::future::{join, try_join};
use time::OffsetDateTime;

use crate::client::{CmsClient, FetchOptions, MAX_PER_PAGE};
use crate::config::{Config, SiteConfig};
use crate::error::Result;
use crate::feed::{self, Templates};
use crate::model::{Page, Post, SiteSettings};

#[derive(Debug)]
pub struct Site {
    client: CmsClient,
    config: SiteConfig,
    templates: Templates,
}

impl Site {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Site {
            client: CmsClient::new(&config.cms)?,
            config: config.site.clone(),
            templates: Templates::new()?,
        })
    }

    pub fn client(&self) -> &CmsClient {
        &self.client
    }

    pub fn robots_txt(&self) -> String {
        feed::robots(&self.config)
    }

    /// The newest `feed_items` posts. Channel title and description come
    /// from the CMS settings when readable, from the config otherwise.
    pub async fn rss(&self) -> Result<String> {
        let options = FetchOptions::new().per_page(self.config.feed_items.clamp(1, MAX_PER_PAGE));
        let fallback = SiteSettings::fallback(&self.config);

        let (posts, settings) = join(
            self.client.get_posts(&options),
            self.client.get_settings(fallback),
        )
        .await;

        feed::rss(
            &self.templates,
            &self.config,
            &settings,
            &posts?,
            OffsetDateTime::now_utc(),
        )
    }

    /// Every published page and post, fetched concurrently.
    pub async fn sitemap(&self) -> Result<String> {
        let options = FetchOptions::new().embed(false);
        let (pages, posts) = try_join(
            self.client.list_all::<Page>(&options),
            self.client.list_all::<Post>(&options),
        )
        .await?;

        feed::sitemap(
            &self.templates,
            &self.config,
            &pages,
            &posts,
            OffsetDateTime::now_utc(),
        )
    }
}
