use async_trait::async_trait;
use querylog_shipper_application::events::{InternalEvent, LastRowUpdated};
use querylog_shipper_application::ports::CursorStore;
use querylog_shipper_domain::{Cursor, DomainError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cursor persisted as a single decimal number in a text file.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// state file, so a crash mid-write leaves the previous value intact.
pub struct FileCursorStore {
    path: PathBuf,
}

impl FileCursorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "cursor".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CursorStore for FileCursorStore {
    async fn get(&self) -> Cursor {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => match Cursor::parse(&contents) {
                Some(cursor) => cursor,
                None => {
                    warn!(
                        path = %self.path.display(),
                        "State file does not hold a row number; starting from row 0"
                    );
                    Cursor::ZERO
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet; starting from row 0");
                Cursor::ZERO
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read state file; starting from row 0"
                );
                Cursor::ZERO
            }
        }
    }

    async fn set(&self, cursor: Cursor) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to create state directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, cursor.to_string())
            .await
            .map_err(|e| {
                DomainError::IoError(format!("Failed to write {}: {}", temp.display(), e))
            })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to replace state file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        LastRowUpdated {
            row: cursor.value(),
        }
        .emit();
        debug!(cursor = %cursor, "Cursor persisted");
        Ok(())
    }
}
