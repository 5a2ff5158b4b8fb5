use futures_util::future::try_join;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::site::Site;

pub const ROBOTS_FILE: &str = "robots.txt";
pub const RSS_FILE: &str = "rss.xml";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Writes robots.txt, rss.xml and sitemap.xml into `out_dir`, creating it
/// if needed. Nothing is written unless every document rendered.
pub async fn export(site: &Site, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let (rss, sitemap) = try_join(site.rss(), site.sitemap()).await?;
    let documents = [
        (ROBOTS_FILE, site.robots_txt()),
        (RSS_FILE, rss),
        (SITEMAP_FILE, sitemap),
    ];

    tokio::fs::create_dir_all(out_dir).await?;

    let mut written = Vec::with_capacity(documents.len());
    for (name, body) in documents {
        let path = out_dir.join(name);
        tokio::fs::write(&path, body).await?;
        info!(path = %path.display(), "wrote document");
        written.push(path);
    }

    Ok(written)
}
