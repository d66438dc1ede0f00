use thiserror::Error;

/// Failures the store and the reducer can surface.
///
/// All variants are local and non-retryable; callers decide whether to run
/// the whole operation again. A failed reduction never leaves a partial
/// record behind.
#[derive(Debug, Error)]
pub enum Error {
    /// Image payload could not be decoded or re-encoded
    #[error("image could not be decoded: {0}")]
    Decode(String),

    /// Raw input bytes were unreadable
    #[error("input could not be read: {0}")]
    Read(#[from] std::io::Error),

    /// An operation referenced an absent record id
    #[error("file '{0}' not found")]
    NotFound(String),

    /// The stored data URL of a record is malformed
    #[error("malformed payload for file '{0}'")]
    Payload(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
