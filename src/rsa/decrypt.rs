// RSA Decryption Implementation

use num_traits::Zero;

use super::bigint::{from_bytes, mod_pow, RsaBigInt};
use super::error::{Result, RsaError};
use super::keygen::RsaPrivateKey;

/// Decrypt `ciphertext` with exponent `d` and modulus `n`
///
/// Returns `c^d mod n` as minimal big-endian bytes; a zero plaintext
/// comes back as the empty message.
pub fn decrypt(ciphertext: &[u8], d: &RsaBigInt, n: &RsaBigInt) -> Result<Vec<u8>> {
    if n.is_zero() {
        return Err(RsaError::InvalidModulus);
    }

    let c = from_bytes(ciphertext);
    if &c >= n {
        return Err(RsaError::CiphertextOutOfRange);
    }

    // Compute m = c^d mod n
    let m = mod_pow(&c, d, n);

    if m.is_zero() {
        return Ok(Vec::new());
    }
    Ok(m.to_bytes_be())
}

/// Decrypt ciphertext bytes using RSA private key
/// Returns plaintext as bytes
pub fn decrypt_bytes(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    decrypt(ciphertext, &private_key.d, &private_key.n)
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<String> {
    let plaintext = decrypt_bytes(ciphertext, private_key)?;
    Ok(String::from_utf8(plaintext)?)
}
