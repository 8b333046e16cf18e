// Utilities outside the RSA engine

pub mod file_ops;

pub use file_ops::{FileError, FileResult, KeyStore, KeyStoreConfig};
