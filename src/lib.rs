//! Front end for a headless WordPress-style content API.
//!
//! - [`client`]: typed, single-request access to the REST API
//! - [`model`]: pages, posts, media, terms, authors and settings
//! - [`text`]: markup stripping, truncation and excerpts
//! - [`feed`]: RSS, sitemap and robots.txt generation
//! - [`server`] and [`export`]: serve the generated documents or write them
//!   to disk

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod feed;
pub mod model;
pub mod server;
pub mod site;
pub mod text;

pub use client::CmsClient;
pub use config::Config;
pub use error::{Error, Result};
pub use site::Site;
