// Key Generation Configuration

use super::primality::DEFAULT_WITNESSES;

/// Default public exponent
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 151;

/// Default modulus size in bits
pub const DEFAULT_KEY_BITS: u32 = 1024;

/// Smallest modulus accepted by key generation
pub const MIN_KEY_BITS: u32 = 64;

/// Candidates sampled per requested bit before a prime search gives up
pub const ATTEMPTS_PER_BIT: u64 = 1024;

/// Configuration for RSA key generation
#[derive(Clone, Debug)]
pub struct KeyGenConfig {
    pub bit_length: u32,
    pub public_exponent: u64,
    pub witnesses: u32,
    /// Parallel prime search workers, `None` means one per CPU
    pub workers: Option<usize>,
    /// Candidate cap per prime search, `None` derives it from the bit length
    pub max_attempts: Option<u64>,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            bit_length: DEFAULT_KEY_BITS,
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            witnesses: DEFAULT_WITNESSES,
            workers: None,
            max_attempts: None,
        }
    }
}

impl KeyGenConfig {
    pub fn new(bit_length: u32) -> Self {
        Self {
            bit_length,
            ..Self::default()
        }
    }

    pub fn with_public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn with_witnesses(mut self, witnesses: u32) -> Self {
        self.witnesses = witnesses;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }

    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Worker count for the prime search
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Candidate cap for a prime of `bit_length` bits
    pub fn attempt_limit(&self, bit_length: u32) -> u64 {
        self.max_attempts
            .unwrap_or_else(|| ATTEMPTS_PER_BIT.saturating_mul(bit_length as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeyGenConfig::default();
        assert_eq!(config.public_exponent, 151);
        assert_eq!(config.witnesses, 10);
        assert!(config.worker_count() >= 1);
        assert_eq!(config.attempt_limit(256), 256 * ATTEMPTS_PER_BIT);
    }

    #[test]
    fn test_builder() {
        let config = KeyGenConfig::new(512)
            .with_public_exponent(65537)
            .with_witnesses(20)
            .with_workers(0)
            .with_max_attempts(7);

        assert_eq!(config.bit_length, 512);
        assert_eq!(config.public_exponent, 65537);
        assert_eq!(config.witnesses, 20);
        assert_eq!(config.worker_count(), 1);
        assert_eq!(config.attempt_limit(256), 7);
    }
}
