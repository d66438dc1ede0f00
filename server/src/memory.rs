use std::collections::HashMap;

use kernel::{DeleteResult, ProcessedFile, RegistryStats, Session};

use crate::domain::Storage;
use crate::error::Error;
use crate::registry::LocalRegistry;

/// In-memory store: one [`LocalRegistry`] per session.
///
/// A complete implementation of the store contract; nothing survives a
/// process restart. Sessions disappear when their last record is removed,
/// mirroring how the persistent store derives sessions from rows.
#[derive(Default)]
pub struct Memory {
    sessions: HashMap<String, LocalRegistry>,
}

impl Storage for Memory {
    fn sessions(&mut self) -> Result<Vec<Session>, Error> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .map(|(id, registry)| Session {
                id: id.clone(),
                files_count: registry.len() as i64,
            })
            .collect();
        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(sessions)
    }

    fn add(&mut self, session: &str, file: ProcessedFile) -> Result<String, Error> {
        let id = file.id.clone();
        self.sessions
            .entry(session.to_owned())
            .or_default()
            .add(file);
        Ok(id)
    }

    fn list(&mut self, session: &str) -> Result<Vec<ProcessedFile>, Error> {
        Ok(self
            .sessions
            .get(session)
            .map(|registry| registry.list().cloned().collect())
            .unwrap_or_default())
    }

    fn stats(&mut self, session: &str) -> Result<RegistryStats, Error> {
        Ok(self
            .sessions
            .get(session)
            .map(LocalRegistry::stats)
            .unwrap_or_default())
    }

    fn clear(&mut self, session: &str) -> Result<DeleteResult, Error> {
        let files = self
            .sessions
            .remove(session)
            .map(|mut registry| registry.clear())
            .unwrap_or_default();
        Ok(DeleteResult { files })
    }

    fn get(&mut self, id: &str) -> Result<ProcessedFile, Error> {
        self.sessions
            .values()
            .find_map(|registry| registry.get(id))
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    fn remove(&mut self, id: &str) -> Result<DeleteResult, Error> {
        let mut files = 0;
        for registry in self.sessions.values_mut() {
            files += registry.remove(id);
        }
        self.sessions.retain(|_, registry| !registry.is_empty());
        Ok(DeleteResult { files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::DataUrl;

    fn record(name: &str) -> ProcessedFile {
        ProcessedFile::new(name, 1000, 400, DataUrl::encode("text/plain", b"x"))
    }

    #[test]
    fn add_and_list_scoped_by_session() {
        // Arrange
        let mut store = Memory::default();
        store.add("alice", record("a.txt")).unwrap();
        store.add("bob", record("b.txt")).unwrap();

        // Act
        let alice = store.list("alice").unwrap();
        let bob = store.list("bob").unwrap();

        // Assert
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].name, "a.txt");
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].name, "b.txt");
    }

    #[test]
    fn sessions_report_counts() {
        // Arrange
        let mut store = Memory::default();
        store.add("alice", record("a.txt")).unwrap();
        store.add("alice", record("b.txt")).unwrap();
        store.add("bob", record("c.txt")).unwrap();

        // Act
        let sessions = store.sessions().unwrap();

        // Assert
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, "alice");
        assert_eq!(sessions[0].files_count, 2);
        assert_eq!(sessions[1].id, "bob");
        assert_eq!(sessions[1].files_count, 1);
    }

    #[test]
    fn get_and_remove_by_global_id() {
        // Arrange
        let mut store = Memory::default();
        let id = store.add("alice", record("a.txt")).unwrap();

        // Act
        let found = store.get(&id).unwrap();
        let removed = store.remove(&id).unwrap();

        // Assert
        assert_eq!(found.name, "a.txt");
        assert_eq!(removed.files, 1);
        assert!(matches!(store.get(&id), Err(Error::NotFound(_))));
        assert!(store.sessions().unwrap().is_empty());
    }

    #[test]
    fn remove_absent_id_removes_nothing() {
        // Arrange
        let mut store = Memory::default();
        store.add("alice", record("a.txt")).unwrap();

        // Act
        let removed = store.remove("missing").unwrap();

        // Assert
        assert_eq!(removed.files, 0);
        assert_eq!(store.list("alice").unwrap().len(), 1);
    }

    #[test]
    fn clear_drops_whole_session() {
        // Arrange
        let mut store = Memory::default();
        store.add("alice", record("a.txt")).unwrap();
        store.add("alice", record("b.txt")).unwrap();

        // Act
        let result = store.clear("alice").unwrap();

        // Assert
        assert_eq!(result.files, 2);
        assert!(store.list("alice").unwrap().is_empty());
        assert_eq!(store.stats("alice").unwrap(), RegistryStats::default());
    }
}
