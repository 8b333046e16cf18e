// RSA Error Types
// Every failure the RSA engine can report to its caller

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RsaError {
    /// Key blob is truncated, malformed or not valid base64
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// gcd(e, (p-1)(q-1)) != 1
    #[error("Public exponent has no inverse modulo (p-1)(q-1)")]
    ModularInverseUndefined,

    #[error("Message too large: {message_bits}-bit message does not fit a {modulus_bits}-bit modulus")]
    MessageTooLarge { message_bits: u64, modulus_bits: u64 },

    #[error("Ciphertext is not smaller than the modulus")]
    CiphertextOutOfRange,

    #[error("Prime search for {bit_length} bits gave up after {attempts} candidates")]
    PrimeSearchExhausted { bit_length: u32, attempts: u64 },

    #[error("Bit length must be at least {minimum}, got {requested}")]
    InvalidBitLength { requested: u32, minimum: u32 },

    #[error("Modulus must be positive")]
    InvalidModulus,

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to start prime search workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for RSA operations
pub type Result<T> = std::result::Result<T, RsaError>;
