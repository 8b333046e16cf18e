// Parallel Probable-Prime Search
// Workers race to find a prime; the first hit cancels the rest

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;

use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;

use super::bigint::{from_bytes, RsaBigInt};
use super::config::KeyGenConfig;
use super::error::{Result, RsaError};
use super::primality::is_probable_prime;

/// A probable prime together with the bit length it was generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prime {
    value: RsaBigInt,
    bit_length: u32,
}

impl Prime {
    pub fn value(&self) -> &RsaBigInt {
        &self.value
    }

    /// Requested size, not necessarily `value().bits()`
    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }

    pub fn into_inner(self) -> RsaBigInt {
        self.value
    }
}

/// Cooperative stop signal shared by the search workers
#[derive(Debug, Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Shared state of one search
struct SearchState {
    token: CancellationToken,
    attempts: AtomicU64,
    accepted: AtomicUsize,
    found: OnceLock<RsaBigInt>,
    max_attempts: u64,
}

impl SearchState {
    fn new(max_attempts: u64) -> Self {
        Self {
            token: CancellationToken::new(),
            attempts: AtomicU64::new(0),
            accepted: AtomicUsize::new(0),
            found: OnceLock::new(),
            max_attempts,
        }
    }
}

/// Generate a probable prime of `bit_length` bits using one worker per CPU
pub fn generate_probable_prime(bit_length: u32) -> Result<Prime> {
    generate_probable_prime_with(bit_length, &KeyGenConfig::default())
}

/// Generate a probable prime of `bit_length` bits
///
/// Worker count, witness rounds and the candidate cap come from `config`.
/// The returned value always has exactly `bit_length` bits.
pub fn generate_probable_prime_with(bit_length: u32, config: &KeyGenConfig) -> Result<Prime> {
    if bit_length < 2 {
        return Err(RsaError::InvalidBitLength {
            requested: bit_length,
            minimum: 2,
        });
    }

    let workers = config.worker_count();
    let witnesses = config.witnesses;
    let state = SearchState::new(config.attempt_limit(bit_length));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("prime-search-{}", i))
        .build()?;

    {
        let state = &state;
        pool.scope(|s| {
            for worker in 0..workers {
                s.spawn(move |_| search_worker(worker, bit_length, witnesses, state));
            }
        });
    }

    let attempts = state.attempts.load(Ordering::Relaxed).min(state.max_attempts);
    match state.found.into_inner() {
        Some(value) => {
            debug!(
                "found {}-bit prime after {} candidates on {} workers",
                bit_length, attempts, workers
            );
            Ok(Prime { value, bit_length })
        }
        None => Err(RsaError::PrimeSearchExhausted {
            bit_length,
            attempts,
        }),
    }
}

fn search_worker(worker: usize, bit_length: u32, witnesses: u32, state: &SearchState) {
    let mut rng = OsRng;

    while !state.token.is_cancelled() {
        let attempt = state.attempts.fetch_add(1, Ordering::Relaxed);
        if attempt >= state.max_attempts {
            state.token.cancel();
            break;
        }

        let candidate = sample_candidate(&mut rng, bit_length);
        if !is_probable_prime(&candidate, witnesses) {
            continue;
        }

        let accepted = state.accepted.fetch_add(1, Ordering::AcqRel) + 1;
        if state.found.set(candidate).is_ok() {
            debug!("worker {} won the prime search at candidate {}", worker, attempt);
        } else {
            debug!("worker {} found a late prime ({} accepted)", worker, accepted);
        }
        state.token.cancel();
    }
}

/// Random odd integer with exactly `bit_length` bits
fn sample_candidate<R: RngCore>(rng: &mut R, bit_length: u32) -> RsaBigInt {
    let byte_len = ((bit_length + 7) / 8) as usize;
    let mut bytes = vec![0u8; byte_len];
    rng.fill_bytes(&mut bytes);

    let excess = byte_len as u32 * 8 - bit_length;
    bytes[0] &= 0xffu8 >> excess;
    bytes[0] |= 0x80u8 >> excess;
    bytes[byte_len - 1] |= 1;

    from_bytes(&bytes)
}
