use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const PREFIX: &str = "data:";
const MARKER: &str = ";base64,";
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// A `data:<media-type>;base64,<data>` string.
///
/// Self-describing: the embedded media type and base64 body are enough to
/// rebuild a downloadable file without any external lookup.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    /// Encodes raw bytes under the given media type. An empty media type is
    /// stored as `application/octet-stream`.
    #[must_use]
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        let media_type = if media_type.is_empty() {
            DEFAULT_MEDIA_TYPE
        } else {
            media_type
        };
        Self(format!(
            "{PREFIX}{media_type}{MARKER}{}",
            STANDARD.encode(bytes)
        ))
    }

    /// Splits the URL back into its media type and raw bytes.
    /// `None` when the string is not a well-formed base64 data URL.
    #[must_use]
    pub fn decode(&self) -> Option<(String, Vec<u8>)> {
        let rest = self.0.strip_prefix(PREFIX)?;
        let ix = rest.find(MARKER)?;
        let bytes = STANDARD.decode(&rest[ix + MARKER.len()..]).ok()?;
        Some((rest[..ix].to_owned(), bytes))
    }

    /// Raw byte count the embedded base64 stands for, `floor(chars * 3 / 4)`.
    /// Ignores padding correction, acceptable for reported sizes but not
    /// byte-exact.
    #[must_use]
    pub fn effective_len(&self) -> u64 {
        match self.0.find(MARKER) {
            Some(ix) => (self.0.len() - ix - MARKER.len()) as u64 * 3 / 4,
            None => 0,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wraps an already-encoded data URL string, e.g. one read back from storage.
impl From<String> for DataUrl {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
