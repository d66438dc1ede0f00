#![warn(clippy::unwrap_in_result)]
#![warn(clippy::unwrap_used)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod data_url;
pub mod file_type;

pub use data_url::DataUrl;
pub use file_type::file_label;

/// A record describing one user file after size-reduction processing.
///
/// Created exactly once by the reducer and immutable afterwards. The payload
/// carries the transformed content as a self-describing data URL, so a record
/// is sufficient to rebuild a downloadable file without external lookup.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ProcessedFile {
    /// Unique identifier, generated at creation, never reused
    pub id: String,
    /// Original file name, kept verbatim
    pub name: String,
    /// Byte count of the input
    pub original_size: u64,
    /// Reported byte count of the output; may exceed `original_size`
    pub compressed_size: u64,
    /// Human-readable classification derived from the filename extension
    pub file_type: String,
    /// Percentage reduction of `compressed_size` against `original_size`
    pub compression_ratio: f64,
    /// Transformed content as a base64 data URL
    pub payload: DataUrl,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ProcessedFile {
    /// Builds a record from the reducer output, deriving id, classification,
    /// ratio and timestamp.
    #[must_use]
    pub fn new(name: &str, original_size: u64, compressed_size: u64, payload: DataUrl) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            original_size,
            compressed_size,
            file_type: file_label(name),
            compression_ratio: compression_ratio(original_size, compressed_size),
            payload,
            created_at: Utc::now(),
        }
    }
}

/// Represents one upload session holding multiple processed files.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct Session {
    /// Unique identifier for the session
    pub id: String,
    /// Total number of processed files stored in this session
    pub files_count: i64,
}

/// Result of a delete operation showing the number of records removed.
#[derive(Serialize, Deserialize, Default, ToSchema)]
pub struct DeleteResult {
    /// Number of processed file records deleted
    pub files: usize,
}

/// Aggregate statistics over a set of processed files.
///
/// `saved_bytes` and `percent_saved` are signed: already-compressed or tiny
/// inputs may report a compressed size above the original and sizes are never
/// clamped.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq, ToSchema)]
pub struct RegistryStats {
    /// Number of records
    pub count: usize,
    /// Sum of original sizes in bytes
    pub total_original_bytes: u64,
    /// Sum of reported compressed sizes in bytes
    pub total_compressed_bytes: u64,
    /// `total_original_bytes - total_compressed_bytes`
    pub saved_bytes: i64,
    /// Rounded percentage saved, 0 when there are no original bytes
    pub percent_saved: i64,
}

impl RegistryStats {
    #[must_use]
    pub fn from_totals(
        count: usize,
        total_original_bytes: u64,
        total_compressed_bytes: u64,
    ) -> Self {
        let saved_bytes = total_original_bytes as i64 - total_compressed_bytes as i64;
        let percent_saved = if total_original_bytes == 0 {
            0
        } else {
            (saved_bytes as f64 / total_original_bytes as f64 * 100.0).round() as i64
        };
        Self {
            count,
            total_original_bytes,
            total_compressed_bytes,
            saved_bytes,
            percent_saved,
        }
    }

    /// Folds a set of records into aggregate statistics.
    pub fn collect<'a>(files: impl IntoIterator<Item = &'a ProcessedFile>) -> Self {
        let mut count = 0;
        let mut original = 0;
        let mut compressed = 0;
        for file in files {
            count += 1;
            original += file.original_size;
            compressed += file.compressed_size;
        }
        Self::from_totals(count, original, compressed)
    }
}

/// Percentage by which `compressed` is smaller than `original`.
/// Defined as 0 for a zero-byte original.
#[must_use]
pub fn compression_ratio(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        0.0
    } else {
        (original as f64 - compressed as f64) / original as f64 * 100.0
    }
}

/// Formats a byte count as a human-readable size, e.g. `1.5 MB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return String::from("0 Bytes");
    }
    let exp = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exp as i32);
    let mut num = format!("{value:.2}");
    while num.ends_with('0') {
        num.pop();
    }
    if num.ends_with('.') {
        num.pop();
    }
    format!("{num} {}", UNITS[exp])
}
