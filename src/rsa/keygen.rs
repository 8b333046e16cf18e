// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use log::{debug, info};
use num_integer::Integer;
use num_traits::One;

use super::bigint::{from_u64, gcd, mod_inverse, to_bytes, RsaBigInt};
use super::codec::{encode_private_key, encode_public_key};
use super::config::{KeyGenConfig, MIN_KEY_BITS};
use super::error::{Result, RsaError};
use super::prime_gen::generate_probable_prime_with;

/// Primes drawn per factor before key generation gives up
const MAX_PRIME_REDRAWS: usize = 64;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub bit_length: u32,
}

impl RsaPublicKey {
    pub fn new(e: RsaBigInt, n: RsaBigInt) -> Self {
        Self { n, e }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a message using this public key
    /// Returns ciphertext as bytes
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        use super::encrypt::encrypt_bytes;
        encrypt_bytes(plaintext, self)
    }

    /// Length-prefixed `(e, n)` blob
    pub fn encode(&self) -> Vec<u8> {
        encode_public_key(self)
    }
}

impl RsaPrivateKey {
    pub fn new(d: RsaBigInt, n: RsaBigInt) -> Self {
        Self { n, d }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt a ciphertext using this private key
    /// Returns plaintext as bytes
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        use super::decrypt::decrypt_bytes;
        decrypt_bytes(ciphertext, self)
    }

    /// Length-prefixed `(d, n)` blob
    pub fn encode(&self) -> Vec<u8> {
        encode_private_key(self)
    }
}

impl RsaKeyPair {
    /// Get the bit length of the key
    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }
}

/// Generate RSA key pair with the default public exponent (151)
/// bit_length: Size of the modulus in bits
pub fn generate_keypair(bit_length: u32) -> Result<RsaKeyPair> {
    generate_keypair_with(&KeyGenConfig::new(bit_length))
}

/// Generate RSA key pair as described by `config`
///
/// The modulus is split into `bit_length / 2` and `bit_length - bit_length / 2`
/// bit primes. Primes `p` with `gcd(e, p - 1) != 1` are redrawn, so the
/// public exponent always has an inverse.
pub fn generate_keypair_with(config: &KeyGenConfig) -> Result<RsaKeyPair> {
    let bit_length = config.bit_length;
    if bit_length < MIN_KEY_BITS {
        return Err(RsaError::InvalidBitLength {
            requested: bit_length,
            minimum: MIN_KEY_BITS,
        });
    }

    let e = from_u64(config.public_exponent);
    if e < from_u64(3) || e.is_even() {
        return Err(RsaError::ModularInverseUndefined);
    }

    let p_bits = bit_length / 2;
    let q_bits = bit_length - p_bits;

    // Step 1: Generate two distinct primes p and q
    let p = generate_factor(p_bits, &e, config, None)?;
    let q = generate_factor(q_bits, &e, config, Some(&p))?;

    // Step 2: Derive n and d
    let mut keypair = build_keypair(&p, &q, &e)?;
    keypair.bit_length = bit_length;

    let fingerprint = to_bytes(&keypair.public_key.n);
    info!(
        "generated {}-bit RSA key pair (e = {}, n = {}...)",
        keypair.public_key.bit_length(),
        keypair.public_key.e,
        hex::encode(&fingerprint[..fingerprint.len().min(8)])
    );

    Ok(keypair)
}

/// Build a key pair from two primes and a public exponent
///
/// n = p * q, d = e^(-1) mod (p-1)(q-1)
pub fn build_keypair(p: &RsaBigInt, q: &RsaBigInt, e: &RsaBigInt) -> Result<RsaKeyPair> {
    let two = from_u64(2);
    if p < &two || q < &two {
        return Err(RsaError::InvalidModulus);
    }

    let n = p * q;
    let r = (p - 1u8) * (q - 1u8);

    let d = mod_inverse(e, &r).ok_or(RsaError::ModularInverseUndefined)?;
    let bit_length = n.bits() as u32;

    Ok(RsaKeyPair {
        public_key: RsaPublicKey::new(e.clone(), n.clone()),
        private_key: RsaPrivateKey::new(d, n),
        bit_length,
    })
}

fn generate_factor(
    bits: u32,
    e: &RsaBigInt,
    config: &KeyGenConfig,
    other: Option<&RsaBigInt>,
) -> Result<RsaBigInt> {
    for _ in 0..MAX_PRIME_REDRAWS {
        let prime = generate_probable_prime_with(bits, config)?.into_inner();

        if other == Some(&prime) {
            debug!("discarding {}-bit prime equal to the other factor", bits);
            continue;
        }
        if !gcd(e, &(&prime - 1u8)).is_one() {
            debug!("discarding {}-bit prime p with gcd(e, p - 1) != 1", bits);
            continue;
        }

        return Ok(prime);
    }

    Err(RsaError::ModularInverseUndefined)
}
