// File Operations for key records
// Reads and writes the JSON key files kept in the local key directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::rsa::{PrivateKeyRecord, PublicKeyRecord};

/// Errors that can occur during file operations
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Key file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Malformed key file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Configuration for the local key directory
#[derive(Clone, Debug)]
pub struct KeyStoreConfig {
    pub dir: PathBuf,
    pub public_file: String,
    pub private_file: String,
}

impl Default for KeyStoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            public_file: "public.key".to_string(),
            private_file: "private.key".to_string(),
        }
    }
}

impl KeyStoreConfig {
    pub fn with_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.dir = dir.into();
        self
    }
}

/// Read a JSON document from `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> FileResult<T> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FileError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&data).map_err(|source| FileError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` to `path` as indented JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> FileResult<()> {
    let data = serde_json::to_vec_pretty(value).map_err(|source| FileError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, data)?;
    debug!("wrote {}", path.display());
    Ok(())
}

/// The local key directory
#[derive(Clone, Debug)]
pub struct KeyStore {
    config: KeyStoreConfig,
}

impl KeyStore {
    pub fn new(config: KeyStoreConfig) -> Self {
        Self { config }
    }

    pub fn public_path(&self) -> PathBuf {
        self.config.dir.join(&self.config.public_file)
    }

    pub fn private_path(&self) -> PathBuf {
        self.config.dir.join(&self.config.private_file)
    }

    /// Path of the public key stored for a peer
    pub fn peer_path(&self, email: &str) -> PathBuf {
        self.config.dir.join(format!("{}.key", email))
    }

    pub fn load_public(&self) -> FileResult<PublicKeyRecord> {
        read_json(&self.public_path())
    }

    pub fn save_public(&self, record: &PublicKeyRecord) -> FileResult<()> {
        write_json(&self.public_path(), record)
    }

    pub fn load_private(&self) -> FileResult<PrivateKeyRecord> {
        read_json(&self.private_path())
    }

    pub fn save_private(&self, record: &PrivateKeyRecord) -> FileResult<()> {
        write_json(&self.private_path(), record)
    }

    pub fn load_peer(&self, email: &str) -> FileResult<PublicKeyRecord> {
        read_json(&self.peer_path(email))
    }

    pub fn save_peer(&self, record: &PublicKeyRecord) -> FileResult<()> {
        write_json(&self.peer_path(&record.email), record)
    }
}
