use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use super::Rendered;

/// An attachment. Embedded media the visitor may not see (private, deleted)
/// comes back as an error object, which deserializes to an empty `Media`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Media {
    pub id: u64,
    #[serde(with = "super::wp_datetime::option")]
    pub date: Option<PrimitiveDateTime>,
    pub slug: String,
    pub link: String,
    pub title: Rendered,
    pub caption: Rendered,
    pub alt_text: String,
    pub author: u64,
    pub media_type: String,
    pub mime_type: String,
    pub media_details: MediaDetails,
    pub source_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct MediaDetails {
    pub width: u32,
    pub height: u32,
    pub file: String,
    pub sizes: IndexMap<String, MediaSize>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct MediaSize {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
    pub source_url: String,
}

/// Image sizes registered by a stock install.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageSize {
    Thumbnail,
    Medium,
    MediumLarge,
    Large,
    #[default]
    Full,
}

impl ImageSize {
    pub fn key(self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "thumbnail",
            ImageSize::Medium => "medium",
            ImageSize::MediumLarge => "medium_large",
            ImageSize::Large => "large",
            ImageSize::Full => "full",
        }
    }
}

impl Media {
    /// Url for `size`. `Full`, and any size the attachment lacks, resolve to
    /// the original upload.
    pub fn url_for(&self, size: ImageSize) -> Option<&str> {
        if size != ImageSize::Full {
            if let Some(sized) = self.media_details.sizes.get(size.key()) {
                if !sized.source_url.is_empty() {
                    return Some(&sized.source_url);
                }
            }
        }

        (!self.source_url.is_empty()).then_some(self.source_url.as_str())
    }

    /// MIME type for feed enclosures.
    pub fn mime_type_or_default(&self) -> &str {
        if self.mime_type.is_empty() {
            "image/jpeg"
        } else {
            &self.mime_type
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_object_deserializes_to_empty_media() {
        let media: Media = serde_json::from_str(
            r#"{"code":"rest_forbidden","message":"Sorry.","data":{"status":401}}"#,
        )
        .unwrap();
        assert_eq!(media.url_for(ImageSize::Full), None);
        assert_eq!(media.url_for(ImageSize::Large), None);
    }

    #[test]
    fn sizes_keep_upstream_order() {
        let media: Media = serde_json::from_str(
            r#"{
                "id": 9,
                "mime_type": "image/png",
                "source_url": "https://cms.example.com/a.png",
                "media_details": {
                    "width": 1200, "height": 800, "file": "a.png",
                    "sizes": {
                        "medium": {
                            "source_url": "https://cms.example.com/a-300.png",
                            "width": 300, "height": 200
                        },
                        "thumbnail": {
                            "source_url": "https://cms.example.com/a-150.png",
                            "width": 150, "height": 150
                        }
                    }
                }
            }"#,
        )
        .unwrap();
        let keys: Vec<_> = media.media_details.sizes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["medium", "thumbnail"]);
        assert_eq!(media.url_for(ImageSize::Medium), Some("https://cms.example.com/a-300.png"));
        assert_eq!(media.url_for(ImageSize::Large), Some("https://cms.example.com/a.png"));
        assert_eq!(media.mime_type_or_default(), "image/png");
    }

    #[test]
    fn full_ignores_size_map_entry() {
        let mut media = Media {
            source_url: "https://cms.example.com/original.jpg".into(),
            ..Media::default()
        };
        media.media_details.sizes.insert(
            "full".into(),
            MediaSize {
                source_url: "https://cms.example.com/other.jpg".into(),
                ..MediaSize::default()
            },
        );
        assert_eq!(
            media.url_for(ImageSize::Full),
            Some("https://cms.example.com/original.jpg")
        );
        assert_eq!(media.mime_type_or_default(), "image/jpeg");
    }
}
