use std::collections::VecDeque;

use kernel::{ProcessedFile, RegistryStats};

use crate::domain::Payload;
use crate::error::Error;

/// In-memory ordered collection of processed files for one session.
///
/// Newest records come first: insertion prepends in constant time. The
/// registry owns its records exclusively; nothing here touches persistence.
#[derive(Default)]
pub struct LocalRegistry {
    files: VecDeque<ProcessedFile>,
}

impl LocalRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a record. Duplicate names are allowed, records are tracked by
    /// their distinct ids.
    pub fn add(&mut self, file: ProcessedFile) {
        self.files.push_front(file);
    }

    /// Removes the record with the given id. Removing an absent id is a
    /// no-op; the return value is the number of records removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        before - self.files.len()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ProcessedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Current contents, newest first.
    pub fn list(&self) -> impl Iterator<Item = &ProcessedFile> {
        self.files.iter()
    }

    /// Empties the registry, returning the number of records dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.files.len();
        self.files.clear();
        dropped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        RegistryStats::collect(&self.files)
    }

    /// Materializes a record's content for download.
    pub fn download(&self, id: &str) -> Result<Payload, Error> {
        let record = self
            .get(id)
            .ok_or_else(|| Error::NotFound(id.to_owned()))?;
        Payload::from_record(record)
    }
}
