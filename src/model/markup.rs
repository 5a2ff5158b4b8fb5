use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Markup as rendered and sanitized by the content system.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Html(pub String);

impl Deref for Html {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl From<&str> for Html {
    fn from(value: &str) -> Self {
        Html(value.to_string())
    }
}

/// A `{ "rendered": ..., "protected": ... }` field.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: Html,
    #[serde(default)]
    pub protected: bool,
}

impl From<&str> for Rendered {
    fn from(value: &str) -> Self {
        Rendered {
            rendered: value.into(),
            protected: false,
        }
    }
}
