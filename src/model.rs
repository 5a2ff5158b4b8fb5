//! Shapes of the entities returned by the content API.
//!
//! These are read-only snapshots: every field the front end reads is
//! declared, unknown fields are ignored.

mod author;
mod content;
mod markup;
mod media;
mod settings;
mod taxonomy;

pub use author::Author;
pub use content::{ContentItem, Embedded, Page, Post, PostStatus};
pub use markup::{Html, Rendered};
pub use media::{ImageSize, Media, MediaDetails, MediaSize};
pub use settings::SiteSettings;
pub use taxonomy::{Category, Tag, Taxonomy, Term};

// The API emits local and GMT timestamps without an offset.
time::serde::format_description!(
    wp_datetime,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);
