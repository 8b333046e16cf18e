// Miller-Rabin Primality Test

use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::One;
use rand::thread_rng;

use super::bigint::{mod_pow, RsaBigInt};

/// Witness rounds used when the caller does not ask for a specific count
pub const DEFAULT_WITNESSES: u32 = 10;

/// Miller-Rabin primality test
/// Returns true if n is probably prime. A composite survives with
/// probability at most 4^-witnesses; `witnesses == 0` uses the default.
pub fn is_probable_prime(n: &RsaBigInt, witnesses: u32) -> bool {
    let two = RsaBigInt::from(2u8);
    if n < &two {
        return false;
    }
    if n == &two || n == &RsaBigInt::from(3u8) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    let witnesses = if witnesses == 0 { DEFAULT_WITNESSES } else { witnesses };

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let mut rng = thread_rng();

    'witness: for _ in 0..witnesses {
        // Random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);

        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                return false;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}
