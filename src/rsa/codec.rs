// RSA Key Encoding
// Length-prefixed binary key blobs and their base64 transport form
//
// Layout (all length prefixes are big-endian u32):
//   [len(exponent)][exponent][len(modulus)][modulus]
// Exponent and modulus are minimal big-endian two's-complement integers.

use base64::{engine::general_purpose, Engine as _};
use num_traits::Zero;

use super::bigint::{from_signed_bytes, to_signed_bytes, RsaBigInt};
use super::error::{Result, RsaError};
use super::keygen::{RsaPrivateKey, RsaPublicKey};

const LENGTH_PREFIX: usize = 4;

/// Bounds-checked cursor over a key blob
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Consume exactly `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(RsaError::InvalidKeyEncoding(format!(
                "need {} bytes at offset {}, only {} left",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(LENGTH_PREFIX)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a length-prefixed non-negative integer
    pub fn read_integer(&mut self, field: &str) -> Result<RsaBigInt> {
        let len = self.read_u32_be()? as usize;
        let bytes = self.read_bytes(len)?;
        from_signed_bytes(bytes)
            .ok_or_else(|| RsaError::InvalidKeyEncoding(format!("{} is negative", field)))
    }
}

fn write_integer(out: &mut Vec<u8>, value: &RsaBigInt) {
    let bytes = to_signed_bytes(value);
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(&bytes);
}

/// Encode an `(exponent, modulus)` pair
pub fn encode_key(exponent: &RsaBigInt, modulus: &RsaBigInt) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * LENGTH_PREFIX + (exponent.bits() + modulus.bits()) as usize / 8 + 2);
    write_integer(&mut out, exponent);
    write_integer(&mut out, modulus);
    out
}

/// Decode an `(exponent, modulus)` pair
pub fn decode_key(blob: &[u8]) -> Result<(RsaBigInt, RsaBigInt)> {
    let mut reader = ByteReader::new(blob);
    let exponent = reader.read_integer("exponent")?;
    let modulus = reader.read_integer("modulus")?;

    if reader.remaining() != 0 {
        return Err(RsaError::InvalidKeyEncoding(format!(
            "{} trailing bytes after modulus",
            reader.remaining()
        )));
    }
    if modulus.is_zero() {
        return Err(RsaError::InvalidKeyEncoding("modulus is zero".to_string()));
    }

    Ok((exponent, modulus))
}

pub fn encode_public_key(key: &RsaPublicKey) -> Vec<u8> {
    encode_key(&key.e, &key.n)
}

pub fn encode_private_key(key: &RsaPrivateKey) -> Vec<u8> {
    encode_key(&key.d, &key.n)
}

pub fn decode_public_key(blob: &[u8]) -> Result<RsaPublicKey> {
    let (e, n) = decode_key(blob)?;
    Ok(RsaPublicKey::new(e, n))
}

pub fn decode_private_key(blob: &[u8]) -> Result<RsaPrivateKey> {
    let (d, n) = decode_key(blob)?;
    Ok(RsaPrivateKey::new(d, n))
}

/// Standard base64 text of a blob
pub fn to_base64(blob: &[u8]) -> String {
    general_purpose::STANDARD.encode(blob)
}

pub fn from_base64(text: &str) -> Result<Vec<u8>> {
    general_purpose::STANDARD
        .decode(text.trim())
        .map_err(|e| RsaError::InvalidKeyEncoding(format!("base64: {}", e)))
}
