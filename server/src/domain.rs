use kernel::{DeleteResult, ProcessedFile, RegistryStats, Session};

use crate::error::Error;

/// Store contract the REST handlers depend on.
///
/// Records are scoped by session on insert and listing; lookup and removal go
/// by record id, which is unique across sessions. An in-memory implementation
/// satisfies this contract completely; persistence is optional.
pub trait Storage {
    fn sessions(&mut self) -> Result<Vec<Session>, Error>;

    fn add(&mut self, session: &str, file: ProcessedFile) -> Result<String, Error>;

    fn list(&mut self, session: &str) -> Result<Vec<ProcessedFile>, Error>;

    fn stats(&mut self, session: &str) -> Result<RegistryStats, Error>;

    fn clear(&mut self, session: &str) -> Result<DeleteResult, Error>;

    fn get(&mut self, id: &str) -> Result<ProcessedFile, Error>;

    fn remove(&mut self, id: &str) -> Result<DeleteResult, Error>;
}

/// A record's content materialized for download.
pub struct Payload {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Payload {
    pub fn from_record(record: &ProcessedFile) -> Result<Self, Error> {
        let (media_type, bytes) = record
            .payload
            .decode()
            .ok_or_else(|| Error::Payload(record.id.clone()))?;
        Ok(Self {
            name: record.name.clone(),
            media_type,
            bytes,
        })
    }
}
