use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ExtractionError, Result};

/// Marker identifying the shortened `youtu.be/<id>` URL form
const SHORT_DOMAIN: &str = "youtu.be";

/// Opaque identifier of a hosted video
///
/// Derived purely syntactically from a URL. No charset or length checks are made,
/// the only guarantee is that the identifier is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Derive the identifier from a video URL
    ///
    /// Short URLs (`https://youtu.be/<id>?si=...`) yield the text after the last `/`
    /// up to the first `?`. Every other URL is split on `=` and the second piece is
    /// taken up to the first `&`, which assumes a `watch?v=<id>&...` layout. URLs
    /// that put another parameter before `v` (`watch?t=10&v=<id>`) therefore yield
    /// the wrong token.
    pub fn parse(url: &str) -> Result<Self> {
        let id = if url.contains(SHORT_DOMAIN) {
            let tail = url.rsplit('/').next().unwrap_or_default();
            tail.split('?').next().unwrap_or_default()
        } else {
            let value = url.split('=').nth(1).ok_or_else(|| ExtractionError::MalformedUrl {
                url: url.to_string(),
                reason: "no 'v=' query parameter",
            })?;
            value.split('&').next().unwrap_or_default()
        };

        if id.is_empty() {
            return Err(ExtractionError::MalformedUrl {
                url: url.to_string(),
                reason: "empty video identifier",
            });
        }

        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
