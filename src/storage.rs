use crate::errors::AppError;
use crate::models::JournalFile;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

/// Reads and writes the whole journal file. Every call hits the disk; nothing
/// is cached between requests.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

/// Result of a load. `recovery` is set when the file existed but could not be
/// parsed and an empty journal was substituted.
#[derive(Debug, Default)]
pub struct Loaded {
    pub journal: JournalFile,
    pub recovery: Option<Recovery>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub detail: String,
}

impl Recovery {
    pub fn message(&self) -> String {
        format!(
            "Error reading introspection data ({}). The file might be corrupted; starting fresh.",
            self.detail
        )
    }
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Loaded, AppError> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<JournalFile>(&bytes) {
                Ok(journal) => Ok(Loaded {
                    journal,
                    recovery: None,
                }),
                Err(err) => {
                    warn!(
                        path = %self.path.display(),
                        "journal file is not valid, starting fresh: {err}"
                    );
                    Ok(Loaded {
                        journal: JournalFile::default(),
                        recovery: Some(Recovery {
                            detail: err.to_string(),
                        }),
                    })
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Loaded::default()),
            Err(err) => {
                error!(path = %self.path.display(), "failed to read journal file: {err}");
                Err(AppError::internal(err))
            }
        }
    }

    /// Overwrites the file with the full journal. Not atomic.
    pub async fn save(&self, journal: &JournalFile) -> Result<(), AppError> {
        let payload = to_json(journal).map_err(AppError::internal)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, payload).await.map_err(|err| {
            error!(path = %self.path.display(), "failed to write journal file: {err}");
            AppError::internal(err)
        })?;
        Ok(())
    }
}

fn to_json(journal: &JournalFile) -> Result<Vec<u8>, serde_json::Error> {
    let mut payload = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut payload, formatter);
    journal.serialize(&mut serializer)?;
    Ok(payload)
}
