//! Error types for content access and document generation.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The content API answered with a non-success status.
    #[error("content API error: {status} {status_text} ({url})")]
    Upstream {
        status: u16,
        status_text: String,
        url: String,
    },

    /// The request never produced a response (DNS, connect, reset, body read).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("date format error: {0}")]
    DateFormat(#[from] time::error::Format),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure came from talking to the content API.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Upstream { .. } | Error::Transport { .. } | Error::Decode { .. }
        )
    }
}
