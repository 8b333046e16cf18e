// RSA Encryption Implementation
// Textbook RSA: the whole message is one integer below the modulus

use num_traits::Zero;

use super::bigint::{from_bytes, mod_pow, to_bytes, RsaBigInt};
use super::error::{Result, RsaError};
use super::keygen::RsaPublicKey;

/// Encrypt `message` with exponent `e` and modulus `n`
///
/// The message is read as an unsigned big-endian integer `m`, which must
/// be smaller than `n`. Returns `m^e mod n` as big-endian bytes.
pub fn encrypt(message: &[u8], e: &RsaBigInt, n: &RsaBigInt) -> Result<Vec<u8>> {
    if n.is_zero() {
        return Err(RsaError::InvalidModulus);
    }

    let m = from_bytes(message);
    if &m >= n {
        return Err(RsaError::MessageTooLarge {
            message_bits: m.bits(),
            modulus_bits: n.bits(),
        });
    }

    // Compute c = m^e mod n
    let c = mod_pow(&m, e, n);

    Ok(to_bytes(&c))
}

/// Encrypt bytes using RSA public key
/// Returns ciphertext as bytes
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    encrypt(plaintext, &public_key.e, &public_key.n)
}

/// Encrypt a string using RSA public key
pub fn encrypt_string(plaintext: &str, public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    encrypt_bytes(plaintext.as_bytes(), public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::generate_keypair;

    #[test]
    fn test_encrypt_bytes() {
        let keypair = generate_keypair(512).unwrap();
        let message = b"Hello, RSA!";

        let ciphertext = encrypt_bytes(message, &keypair.public_key).unwrap();
        assert!(ciphertext.len() <= 64); // 512 bits = 64 bytes

        // Verify it's not the same as plaintext
        assert_ne!(ciphertext, message);
    }

    #[test]
    fn test_encrypt_string() {
        let keypair = generate_keypair(512).unwrap();
        let ciphertext = encrypt_string("Test message", &keypair.public_key).unwrap();
        assert!(!ciphertext.is_empty());
    }

    #[test]
    fn test_textbook_vector() {
        // n = 61 * 53, e = 17: 65^17 mod 3233 = 2790
        let ciphertext = encrypt(&[65], &from_u64(17), &from_u64(3233)).unwrap();
        assert_eq!(ciphertext, to_bytes(&from_u64(2790)));
    }

    #[test]
    fn test_encrypt_too_large() {
        let keypair = generate_keypair(512).unwrap();
        // 65 bytes can never be below a 512-bit modulus
        let message = vec![0xffu8; 65];

        let result = encrypt_bytes(&message, &keypair.public_key);
        assert!(matches!(
            result,
            Err(RsaError::MessageTooLarge { message_bits: 520, .. })
        ));
    }

    #[test]
    fn test_encrypt_equal_to_modulus() {
        let n = from_u64(3233);
        let result = encrypt(&to_bytes(&n), &from_u64(17), &n);
        assert!(matches!(result, Err(RsaError::MessageTooLarge { .. })));
    }

    #[test]
    fn test_encrypt_zero_modulus() {
        let result = encrypt(b"hi", &from_u64(3), &from_u64(0));
        assert!(matches!(result, Err(RsaError::InvalidModulus)));
    }

    #[test]
    fn test_encrypt_empty() {
        // Empty message is the integer zero
        let ciphertext = encrypt(b"", &from_u64(17), &from_u64(3233)).unwrap();
        assert_eq!(ciphertext, vec![0]);
    }
}
