use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

pub const X_DIMENSION_KEY: &str = "x-dimension";
pub const Y_DIMENSION_KEY: &str = "y-dimension";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed session file {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A small string key/value store that outlives a single run of the field.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Store every `(key, value)` pair, or none of them if the store can't be written.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), SessionError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.set_many(&[(key, value)])
    }
}

/// Session that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    entries: BTreeMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), SessionError> {
        for &(key, value) in entries {
            self.entries.insert(key.to_string(), value.to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Session persisted as a JSON document. Every write rewrites the whole file, and the in-memory
/// entries only change once that succeeded.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    file: SessionFile,
}

impl FileSession {
    /// Open the session at `path`. A file that doesn't exist yet is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();

        let file: SessionFile = match File::open(&path) {
            Ok(f) => serde_json::from_reader(BufReader::new(f)).map_err(|source| {
                SessionError::Json {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "no session file yet");
                SessionFile::default()
            }
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `file` to a sibling temporary file, then move it over the session file.
    fn save(&self, file: &SessionFile) -> Result<(), SessionError> {
        let io_err = |source: io::Error| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());

            serde_json::to_writer_pretty(&mut writer, file).map_err(|source| {
                SessionError::Json {
                    path: self.path.clone(),
                    source,
                }
            })?;

            writer.flush().map_err(io_err)?;
        }

        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        Ok(())
    }
}

impl SessionStore for FileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.file.entries.get(key).cloned()
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), SessionError> {
        let mut next = self.file.clone();

        for &(key, value) in entries {
            next.entries.insert(key.to_string(), value.to_string());
        }

        self.save(&next)?;
        self.file = next;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::FileSession;
    use super::MemorySession;
    use super::SessionError;
    use super::SessionStore;


    #[test]
    fn memory_session_round_trip() {
        let mut store = MemorySession::new();

        assert_eq!(store.get("x-dimension"), None);

        store.set("x-dimension", "12").unwrap();
        assert_eq!(store.get("x-dimension").as_deref(), Some("12"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let store = FileSession::open(&path).unwrap();

        assert_eq!(store.get("x-dimension"), None);
        assert!(!path.exists());
    }

    #[test]
    fn file_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reopen.json");

        {
            let mut store = FileSession::open(&path).unwrap();
            store.set("x-dimension", "3").unwrap();
            store.set("y-dimension", "9").unwrap();
        }

        let store = FileSession::open(&path).unwrap();

        assert_eq!(store.get("x-dimension").as_deref(), Some("3"));
        assert_eq!(store.get("y-dimension").as_deref(), Some("9"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("malformed.json");
        std::fs::write(&path, "not json").unwrap();

        let res = FileSession::open(&path);

        assert!(matches!(res, Err(SessionError::Json { .. })));
    }

    #[test]
    fn save_leaves_no_stray_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = FileSession::open(&path).unwrap();
        store
            .set_many(&[("x-dimension", "3"), ("y-dimension", "9")])
            .unwrap();
        store.set("x-dimension", "4").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
    }

    #[test]
    fn failed_write_keeps_previous_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("session.json");

        let mut store = FileSession::open(&path).unwrap();

        let res = store.set_many(&[("x-dimension", "3"), ("y-dimension", "9")]);

        assert!(matches!(res, Err(SessionError::Io { .. })));
        assert_eq!(store.get("x-dimension"), None);
        assert_eq!(store.get("y-dimension"), None);

        assert!(store.set("x-dimension", "3").is_err());
        assert_eq!(store.get("x-dimension"), None);
    }
}
