use serde::{de::Visitor, Deserialize};
use std::{
    net::SocketAddr,
    ops::Deref,
    path::{Path, PathBuf},
};
use url::Url;

/// Environment variable that overrides `cms.api_url`.
pub const API_URL_ENV: &str = "CMS_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid content API url {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("content API url is not set (cms.api_url or CMS_API_URL)")]
    MissingApiUrl,
}

#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub api_url: ApiUrl,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SiteConfig {
    /// Public origin of the generated site, e.g. `https://example.com`.
    pub url: Url,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_blog_path")]
    pub blog_path: String,
    #[serde(default = "default_feed_items")]
    pub feed_items: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NetConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub cms: CmsConfig,
    pub site: SiteConfig,
    pub net: NetConfig,
}

#[derive(Deserialize, Default)]
struct RawCmsConfig {
    api_url: Option<ApiUrl>,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    cms: RawCmsConfig,
    site: SiteConfig,
    #[serde(default)]
    net: NetConfig,
}

fn default_language() -> String {
    "en".into()
}

fn default_blog_path() -> String {
    "blog".into()
}

fn default_feed_items() -> u32 {
    20
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4321))
}

impl Config {
    /// Reads the config file, applying the `CMS_API_URL` override.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, std::env::var(API_URL_ENV).ok())
    }

    pub fn from_toml(text: &str, api_url_override: Option<String>) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;

        let api_url = match api_url_override.filter(|url| !url.trim().is_empty()) {
            Some(url) => ApiUrl::parse(&url)?,
            None => raw.cms.api_url.ok_or(ConfigError::MissingApiUrl)?,
        };

        Ok(Config {
            cms: CmsConfig { api_url },
            site: raw.site,
            net: raw.net,
        })
    }
}

impl SiteConfig {
    /// Joins a site-relative path onto the public origin.
    pub fn absolute(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn blog_url(&self) -> String {
        self.absolute(self.blog_path.trim_matches('/'))
    }

    pub fn post_url(&self, slug: &str) -> String {
        self.absolute(&format!("{}/{}", self.blog_path.trim_matches('/'), slug))
    }

    pub fn page_url(&self, slug: &str) -> String {
        self.absolute(slug)
    }
}

/// Base url of the content API, e.g. `https://cms.example.com/wp-json/wp/v2`.
///
/// Only http(s) urls are accepted, and the trailing slash is dropped so
/// endpoints can be appended with a single `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl(String);

impl ApiUrl {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: value.to_string(),
            reason,
        };

        let url = Url::parse(value.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if url.query().is_some() {
            return Err(invalid("must not carry a query string".into()));
        }

        Ok(ApiUrl(url.as_str().trim_end_matches('/').to_string()))
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ApiUrlVisitor;
        impl Visitor<'_> for ApiUrlVisitor {
            type Value = ApiUrl;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "an http(s) url")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ApiUrl::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ApiUrlVisitor)
    }
}

impl Deref for ApiUrl {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl std::fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
