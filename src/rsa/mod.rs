// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod codec;
pub mod config;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod primality;
pub mod prime_gen;
pub mod records;

pub use codec::{
    decode_key, decode_private_key, decode_public_key, encode_key, encode_private_key,
    encode_public_key, from_base64, to_base64, ByteReader,
};
pub use config::KeyGenConfig;
pub use decrypt::{decrypt, decrypt_bytes, decrypt_to_string};
pub use encrypt::{encrypt, encrypt_bytes, encrypt_string};
pub use error::{Result, RsaError};
pub use keygen::{
    build_keypair, generate_keypair, generate_keypair_with, RsaKeyPair, RsaPrivateKey,
    RsaPublicKey,
};
pub use primality::is_probable_prime;
pub use prime_gen::{generate_probable_prime, generate_probable_prime_with, CancellationToken, Prime};
pub use records::{PrivateKeyRecord, PublicKeyRecord};
