//! RSS, sitemap and robots.txt documents.
//!
//! Everything here is a pure function of the fetched content, the site
//! configuration and the generation instant.

use serde::Serialize;
use tera::{Context, Tera};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::model::{ContentItem, ImageSize, Page, Post, SiteSettings};

/// Excerpt length for feed item descriptions.
pub const FEED_EXCERPT_LENGTH: usize = 300;

const RSS_TEMPLATE: &str = "rss.xml";
const SITEMAP_TEMPLATE: &str = "sitemap.xml";

/// The document templates, compiled once at startup.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // values are escaped explicitly with `escape_xml`, CDATA sections must stay raw
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            (RSS_TEMPLATE, include_str!("../templates/rss.xml")),
            (SITEMAP_TEMPLATE, include_str!("../templates/sitemap.xml")),
        ])?;
        Ok(Templates { tera })
    }

    fn render(&self, name: &str, view: &impl Serialize) -> Result<String> {
        let context = Context::from_serialize(view)?;
        Ok(self.tera.render(name, &context)?)
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

/// Makes `text` safe to place inside a CDATA section.
fn cdata(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}

fn rfc2822(instant: OffsetDateTime) -> Result<String> {
    Ok(instant.format(&Rfc2822)?)
}

fn rfc3339(instant: OffsetDateTime) -> Result<String> {
    Ok(instant.format(&Rfc3339)?)
}

fn utc(datetime: PrimitiveDateTime) -> OffsetDateTime {
    datetime.assume_utc()
}

#[derive(Serialize)]
struct RssView<'a> {
    channel: ChannelView<'a>,
    items: Vec<ItemView<'a>>,
}

#[derive(Serialize)]
struct ChannelView<'a> {
    title: &'a str,
    description: &'a str,
    link: String,
    self_link: String,
    language: &'a str,
    last_build_date: String,
}

#[derive(Serialize)]
struct ItemView<'a> {
    title: String,
    description: String,
    link: String,
    guid: String,
    pub_date: String,
    enclosure: Option<EnclosureView<'a>>,
}

#[derive(Serialize)]
struct EnclosureView<'a> {
    url: &'a str,
    mime_type: &'a str,
}

/// RSS 2.0 feed with one item per post, in the order given.
pub fn rss(
    templates: &Templates,
    site: &SiteConfig,
    settings: &SiteSettings,
    posts: &[Post],
    generated_at: OffsetDateTime,
) -> Result<String> {
    let items = posts
        .iter()
        .map(|post| rss_item(site, post))
        .collect::<Result<Vec<_>>>()?;

    let view = RssView {
        channel: ChannelView {
            title: &settings.title,
            description: &settings.description,
            link: site.blog_url(),
            self_link: site.absolute("rss.xml"),
            language: &site.language,
            last_build_date: rfc2822(generated_at)?,
        },
        items,
    };

    templates.render(RSS_TEMPLATE, &view)
}

fn rss_item<'a>(site: &SiteConfig, post: &'a Post) -> Result<ItemView<'a>> {
    let link = site.post_url(&post.slug);
    let enclosure = post.featured_media().and_then(|media| {
        Some(EnclosureView {
            url: media.url_for(ImageSize::Full)?,
            mime_type: media.mime_type_or_default(),
        })
    });

    Ok(ItemView {
        title: cdata(&post.title.rendered),
        description: cdata(&post.excerpt_with_length(FEED_EXCERPT_LENGTH)),
        guid: link.clone(),
        link,
        pub_date: rfc2822(utc(post.published_gmt()))?,
        enclosure,
    })
}

/// Kind of sitemap entry, which fixes its priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Home,
    BlogIndex,
    Page,
    Post,
}

impl EntryKind {
    pub fn priority(self) -> &'static str {
        match self {
            EntryKind::Home => "1.0",
            EntryKind::Page => "0.9",
            EntryKind::BlogIndex => "0.8",
            EntryKind::Post => "0.6",
        }
    }
}

#[derive(Serialize)]
struct SitemapView {
    entries: Vec<EntryView>,
}

#[derive(Serialize)]
struct EntryView {
    loc: String,
    lastmod: String,
    priority: &'static str,
}

impl EntryView {
    fn new(kind: EntryKind, loc: String, lastmod: OffsetDateTime) -> Result<Self> {
        Ok(EntryView {
            loc,
            lastmod: rfc3339(lastmod)?,
            priority: kind.priority(),
        })
    }
}

/// Sitemap with the home page, the blog index, every page and every post.
pub fn sitemap(
    templates: &Templates,
    site: &SiteConfig,
    pages: &[Page],
    posts: &[Post],
    generated_at: OffsetDateTime,
) -> Result<String> {
    let now = generated_at.replace_nanosecond(0).unwrap_or(generated_at);

    let mut entries = Vec::with_capacity(pages.len() + posts.len() + 2);
    entries.push(EntryView::new(EntryKind::Home, site.absolute("/"), now)?);
    entries.push(EntryView::new(EntryKind::BlogIndex, site.blog_url(), now)?);
    for page in pages {
        entries.push(EntryView::new(
            EntryKind::Page,
            site.page_url(&page.slug),
            utc(page.modified_gmt()),
        )?);
    }
    for post in posts {
        entries.push(EntryView::new(
            EntryKind::Post,
            site.post_url(&post.slug),
            utc(post.modified_gmt()),
        )?);
    }

    templates.render(SITEMAP_TEMPLATE, &SitemapView { entries })
}

/// Allows everything and points at the sitemap. No trailing newline.
pub fn robots(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}",
        site.absolute("sitemap.xml")
    )
}
