use std::path::Path;

use chrono::{DateTime, Utc};
use kernel::{DeleteResult, ProcessedFile, RegistryStats, Session};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};

use crate::domain::Storage;
use crate::error::Error;

const CACHE_SIZE: &str = "4096";

pub enum Mode {
    ReadWrite,
    ReadOnly,
}

/// Persistent store over a single SQLite database.
///
/// One row per processed file; the payload is kept as its data-URL text in
/// the row, so a record round-trips without a separate blob table.
pub struct Sqlite {
    conn: Connection,
}

impl Sqlite {
    pub fn open<P: AsRef<Path>>(path: P, mode: Mode) -> Result<Self, rusqlite::Error> {
        let c = match mode {
            Mode::ReadWrite => Connection::open(path),
            Mode::ReadOnly => Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY),
        };
        Ok(Self { conn: c? })
    }

    pub fn new_database(&self) -> Result<(), rusqlite::Error> {
        self.pragma_update("encoding", "UTF-8")?;

        self.conn.execute(
            "CREATE TABLE file (
                  id                 TEXT PRIMARY KEY,
                  session_id         TEXT NOT NULL,
                  name               TEXT NOT NULL,
                  original_size      INTEGER NOT NULL,
                  compressed_size    INTEGER NOT NULL,
                  file_type          TEXT NOT NULL,
                  compression_ratio  REAL NOT NULL,
                  payload            TEXT NOT NULL,
                  created_at         TEXT NOT NULL
                  )",
            [],
        )?;

        self.conn
            .execute("CREATE INDEX session_ix ON file(session_id)", [])?;

        Ok(())
    }

    fn assign_cache_size(&self) -> Result<(), rusqlite::Error> {
        self.pragma_update("cache_size", CACHE_SIZE)
    }

    fn pragma_update(&self, name: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.pragma_update(None, name, value)
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<ProcessedFile> {
    Ok(ProcessedFile {
        id: row.get(0)?,
        name: row.get(1)?,
        original_size: row.get::<_, i64>(2)? as u64,
        compressed_size: row.get::<_, i64>(3)? as u64,
        file_type: row.get(4)?,
        compression_ratio: row.get(5)?,
        payload: row.get::<_, String>(6)?.into(),
        created_at: row.get::<_, DateTime<Utc>>(7)?,
    })
}

const RECORD_COLUMNS: &str =
    "id, name, original_size, compressed_size, file_type, compression_ratio, payload, created_at";

impl Storage for Sqlite {
    fn sessions(&mut self) -> Result<Vec<Session>, Error> {
        let mut stmt = self.conn.prepare(
            "SELECT session_id, COUNT(*) FROM file GROUP BY session_id ORDER BY session_id",
        )?;
        let sessions = stmt
            .query_map([], |row| {
                Ok(Session {
                    id: row.get(0)?,
                    files_count: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<Session>>>()?;
        Ok(sessions)
    }

    fn add(&mut self, session: &str, file: ProcessedFile) -> Result<String, Error> {
        self.assign_cache_size()?;
        self.pragma_update("synchronous", "FULL")?;

        let tx = self.conn.transaction()?;
        tx.prepare_cached(
            "INSERT INTO file (id, session_id, name, original_size, compressed_size,
                               file_type, compression_ratio, payload, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?
        .execute(params![
            &file.id,
            session,
            &file.name,
            file.original_size as i64,
            file.compressed_size as i64,
            &file.file_type,
            file.compression_ratio,
            file.payload.as_str(),
            file.created_at,
        ])?;
        tx.commit()?;

        Ok(file.id)
    }

    fn list(&mut self, session: &str) -> Result<Vec<ProcessedFile>, Error> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM file WHERE session_id = ?1
                 ORDER BY created_at DESC, rowid DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let files = stmt
            .query_map(params![session], map_row)?
            .collect::<rusqlite::Result<Vec<ProcessedFile>>>()?;
        Ok(files)
    }

    fn stats(&mut self, session: &str) -> Result<RegistryStats, Error> {
        let (count, original, compressed) = self.conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(original_size), 0),
                    COALESCE(SUM(compressed_size), 0)
                 FROM file WHERE session_id = ?1",
            params![session],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;
        Ok(RegistryStats::from_totals(
            count as usize,
            original as u64,
            compressed as u64,
        ))
    }

    fn clear(&mut self, session: &str) -> Result<DeleteResult, Error> {
        let files = self
            .conn
            .execute("DELETE FROM file WHERE session_id = ?1", params![session])?;
        Ok(DeleteResult { files })
    }

    fn get(&mut self, id: &str) -> Result<ProcessedFile, Error> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM file WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], map_row)
            .optional()?
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    fn remove(&mut self, id: &str) -> Result<DeleteResult, Error> {
        let files = self
            .conn
            .execute("DELETE FROM file WHERE id = ?1", params![id])?;
        Ok(DeleteResult { files })
    }
}
