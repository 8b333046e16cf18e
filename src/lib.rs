//! Textbook RSA: parallel prime search, key generation, length-prefixed
//! key blobs and single-block encryption.

pub mod rsa;
pub mod util;
