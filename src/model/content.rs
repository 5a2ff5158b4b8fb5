use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use super::{Author, Media, Rendered, Taxonomy, Term};
use crate::text;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Future,
    Draft,
    Pending,
    Private,
    #[serde(other)]
    Other,
}

/// Related entities inlined by `_embed`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Embedded {
    #[serde(rename = "wp:featuredmedia", default)]
    pub featured_media: Vec<Media>,
    #[serde(default)]
    pub author: Vec<Author>,
    /// One list per taxonomy, in the order the API returns them.
    #[serde(rename = "wp:term", default)]
    pub terms: Vec<Vec<Term>>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Page {
    pub id: u64,
    #[serde(with = "super::wp_datetime")]
    pub date: PrimitiveDateTime,
    #[serde(default, with = "super::wp_datetime::option")]
    pub date_gmt: Option<PrimitiveDateTime>,
    #[serde(with = "super::wp_datetime")]
    pub modified: PrimitiveDateTime,
    #[serde(with = "super::wp_datetime")]
    pub modified_gmt: PrimitiveDateTime,
    pub slug: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub link: String,
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub author: u64,
    #[serde(default)]
    pub featured_media: u64,
    #[serde(default)]
    pub parent: u64,
    #[serde(default)]
    pub menu_order: i64,
    #[serde(default)]
    pub template: String,
    /// Custom fields, passed through untouched.
    #[serde(default)]
    pub acf: Option<serde_json::Value>,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Post {
    pub id: u64,
    #[serde(with = "super::wp_datetime")]
    pub date: PrimitiveDateTime,
    #[serde(default, with = "super::wp_datetime::option")]
    pub date_gmt: Option<PrimitiveDateTime>,
    #[serde(with = "super::wp_datetime")]
    pub modified: PrimitiveDateTime,
    #[serde(with = "super::wp_datetime")]
    pub modified_gmt: PrimitiveDateTime,
    pub slug: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub link: String,
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub author: u64,
    #[serde(default)]
    pub featured_media: u64,
    #[serde(default)]
    pub sticky: bool,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub categories: Vec<u64>,
    #[serde(default)]
    pub tags: Vec<u64>,
    #[serde(default)]
    pub acf: Option<serde_json::Value>,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

/// Behaviour shared by pages and posts.
pub trait ContentItem {
    fn id(&self) -> u64;
    fn slug(&self) -> &str;
    fn title(&self) -> &Rendered;
    fn content(&self) -> &Rendered;
    fn rendered_excerpt(&self) -> &Rendered;
    fn embedded(&self) -> Option<&Embedded>;
    fn featured_media_id(&self) -> Option<u64>;

    /// Publication time in UTC. Drafts have no GMT date, so the local
    /// date is used as is.
    fn published_gmt(&self) -> PrimitiveDateTime;
    fn modified_gmt(&self) -> PrimitiveDateTime;

    fn plain_title(&self) -> String {
        text::strip_html(&self.title().rendered)
    }

    fn excerpt(&self) -> String {
        self.excerpt_with_length(text::DEFAULT_EXCERPT_LENGTH)
    }

    fn excerpt_with_length(&self, max_len: usize) -> String {
        text::excerpt(
            &self.rendered_excerpt().rendered,
            &self.content().rendered,
            max_len,
        )
    }

    fn featured_media(&self) -> Option<&Media> {
        self.embedded()?.featured_media.first()
    }

    fn featured_image_url(&self, size: super::ImageSize) -> Option<&str> {
        self.featured_media()?.url_for(size)
    }

    fn embedded_author(&self) -> Option<&Author> {
        self.embedded()?.author.first()
    }
}

macro_rules! impl_content_item {
    ($ty:ty) => {
        impl ContentItem for $ty {
            fn id(&self) -> u64 {
                self.id
            }

            fn slug(&self) -> &str {
                &self.slug
            }

            fn title(&self) -> &Rendered {
                &self.title
            }

            fn content(&self) -> &Rendered {
                &self.content
            }

            fn rendered_excerpt(&self) -> &Rendered {
                &self.excerpt
            }

            fn embedded(&self) -> Option<&Embedded> {
                self.embedded.as_ref()
            }

            fn featured_media_id(&self) -> Option<u64> {
                // 0 means "no featured media" upstream
                (self.featured_media != 0).then_some(self.featured_media)
            }

            fn published_gmt(&self) -> PrimitiveDateTime {
                self.date_gmt.unwrap_or(self.date)
            }

            fn modified_gmt(&self) -> PrimitiveDateTime {
                self.modified_gmt
            }
        }
    };
}

impl_content_item!(Page);
impl_content_item!(Post);

impl Post {
    /// Embedded terms of one taxonomy.
    pub fn terms(&self, taxonomy: Taxonomy) -> impl Iterator<Item = &Term> {
        self.embedded
            .iter()
            .flat_map(|embedded| embedded.terms.iter().flatten())
            .filter(move |term| term.taxonomy == taxonomy)
    }

    pub fn category_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms(Taxonomy::Category)
    }

    pub fn tag_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms(Taxonomy::PostTag)
    }
}
