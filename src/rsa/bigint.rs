// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from unsigned big-endian bytes
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to unsigned big-endian bytes, zero is `[0]`
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Minimal big-endian two's-complement bytes of a non-negative value.
/// A `0x00` byte is prepended when the top bit of the leading byte is set.
pub fn to_signed_bytes(n: &RsaBigInt) -> Vec<u8> {
    BigInt::from_biguint(Sign::Plus, n.clone()).to_signed_bytes_be()
}

/// Parse big-endian two's-complement bytes, `None` for negative values
pub fn from_signed_bytes(bytes: &[u8]) -> Option<RsaBigInt> {
    let value = BigInt::from_signed_bytes_be(bytes);
    if value.is_negative() {
        return None;
    }
    value.to_biguint()
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm. `modulus` must be non-zero.
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Compute modular inverse: a^(-1) mod m
/// Iterative extended Euclid, returns None if gcd(a, m) != 1
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    let modulus = BigInt::from(m.clone());
    let mut a = BigInt::from(a % m);
    let mut i = modulus.clone();
    let mut v = BigInt::zero();
    let mut d = BigInt::one();

    while a.is_positive() {
        let t = &i / &a;
        let prev_a = a;
        a = &i % &prev_a;
        i = prev_a;
        let prev_d = d;
        d = &v - &t * &prev_d;
        v = prev_d;
    }

    // i now holds gcd(a, m)
    if !i.is_one() {
        return None;
    }

    let mut inverse = v % &modulus;
    if inverse.is_negative() {
        inverse += &modulus;
    }
    inverse.to_biguint()
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let base = from_u64(3);
        let exp = from_u64(5);
        let modulus = from_u64(7);
        let result = mod_pow(&base, &exp, &modulus);
        assert_eq!(result, from_u64(5));
    }

    #[test]
    fn test_mod_pow_matches_library() {
        let base = from_bytes(b"some fairly long base value");
        let exp = from_u64(65537);
        let modulus = from_bytes(b"an odd modulus of some length!!") | from_u64(1);
        assert_eq!(mod_pow(&base, &exp, &modulus), base.modpow(&exp, &modulus));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = from_u64(3);
        let m = from_u64(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, from_u64(5));

        // Verify: 3 * 5 = 15 ≡ 1 (mod 7)
        assert_eq!((a * inv) % m, from_u64(1));
    }

    #[test]
    fn test_mod_inverse_of_151() {
        // 151 * 31 = 4681 = 4 * 1170 + 1
        let inv = mod_inverse(&from_u64(151), &from_u64(1170)).unwrap();
        assert_eq!(inv, from_u64(31));
    }

    #[test]
    fn test_mod_inverse_undefined() {
        assert_eq!(mod_inverse(&from_u64(6), &from_u64(9)), None);
        assert_eq!(mod_inverse(&from_u64(151), &from_u64(302)), None);
        assert_eq!(mod_inverse(&from_u64(5), &from_u64(0)), None);
    }

    #[test]
    fn test_signed_bytes() {
        assert_eq!(to_signed_bytes(&from_u64(0)), vec![0x00]);
        assert_eq!(to_signed_bytes(&from_u64(127)), vec![0x7f]);
        assert_eq!(to_signed_bytes(&from_u64(151)), vec![0x00, 0x97]);
        assert_eq!(to_signed_bytes(&from_u64(0x0100)), vec![0x01, 0x00]);
        assert_eq!(to_signed_bytes(&from_u64(0x8000)), vec![0x00, 0x80, 0x00]);

        assert_eq!(from_signed_bytes(&[0x00, 0x97]), Some(from_u64(151)));
        assert_eq!(from_signed_bytes(&[0x97]), None);
        assert_eq!(from_signed_bytes(&[]), Some(from_u64(0)));
    }

    proptest! {
        #[test]
        fn mod_inverse_is_inverse(a in 1u64.., m in 2u64..) {
            let (a, m) = (from_u64(a), from_u64(m));
            match mod_inverse(&a, &m) {
                Some(inv) => {
                    prop_assert!(inv < m);
                    prop_assert_eq!((&a * &inv) % &m, from_u64(1));
                }
                None => prop_assert_ne!(gcd(&a, &m), from_u64(1)),
            }
        }

        #[test]
        fn mod_inverse_large_values(a in proptest::collection::vec(any::<u8>(), 1..64),
                                    m in proptest::collection::vec(any::<u8>(), 1..64)) {
            let a = from_bytes(&a);
            let m = from_bytes(&m) + from_u64(2);
            if gcd(&a, &m) == from_u64(1) {
                let inv = mod_inverse(&a, &m).unwrap();
                prop_assert_eq!((&a * &inv) % &m, from_u64(1));
            }
        }

        #[test]
        fn signed_bytes_have_no_sign_bit(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let n = from_bytes(&bytes);
            let encoded = to_signed_bytes(&n);
            prop_assert!(encoded[0] & 0x80 == 0);
            prop_assert_eq!(from_signed_bytes(&encoded), Some(n));
        }
    }
}
