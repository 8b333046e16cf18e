// Key Records
// JSON-serializable wrappers around base64 key blobs

use serde::{Deserialize, Serialize};

use super::codec::{decode_private_key, decode_public_key, from_base64, to_base64};
use super::error::Result;
use super::keygen::{RsaPrivateKey, RsaPublicKey};

/// A public key `(e, n)` and the identity that owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyRecord {
    #[serde(default)]
    pub email: String,
    pub key: String,
}

/// A private key `(d, n)` and the identities it may decrypt for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKeyRecord {
    #[serde(default)]
    pub emails: Vec<String>,
    pub key: String,
}

impl PublicKeyRecord {
    /// Unowned record for a freshly generated key
    pub fn new(key: &RsaPublicKey) -> Self {
        Self {
            email: String::new(),
            key: to_base64(&key.encode()),
        }
    }

    pub fn with_owner(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn public_key(&self) -> Result<RsaPublicKey> {
        decode_public_key(&from_base64(&self.key)?)
    }
}

impl PrivateKeyRecord {
    pub fn new(key: &RsaPrivateKey) -> Self {
        Self {
            emails: Vec::new(),
            key: to_base64(&key.encode()),
        }
    }

    pub fn private_key(&self) -> Result<RsaPrivateKey> {
        decode_private_key(&from_base64(&self.key)?)
    }

    /// Register `email` as an identity this key decrypts for.
    /// Returns false if it was already registered.
    pub fn authorize(&mut self, email: &str) -> bool {
        if self.can_decrypt_for(email) {
            return false;
        }
        self.emails.push(email.to_string());
        true
    }

    pub fn can_decrypt_for(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::error::RsaError;
    use crate::rsa::keygen::build_keypair;

    fn small_keypair() -> (RsaPublicKey, RsaPrivateKey) {
        let keypair = build_keypair(&from_u64(61), &from_u64(53), &from_u64(17)).unwrap();
        (keypair.public_key, keypair.private_key)
    }

    #[test]
    fn test_public_record() {
        let (public_key, _) = small_keypair();
        let record = PublicKeyRecord::new(&public_key).with_owner("alice@example.com");

        assert_eq!(record.email, "alice@example.com");
        assert_eq!(record.public_key().unwrap(), public_key);
    }

    #[test]
    fn test_private_record_authorization() {
        let (_, private_key) = small_keypair();
        let mut record = PrivateKeyRecord::new(&private_key);

        assert!(!record.can_decrypt_for("bob@example.com"));
        assert!(record.authorize("bob@example.com"));
        assert!(!record.authorize("bob@example.com"));
        assert!(record.can_decrypt_for("bob@example.com"));
        assert_eq!(record.emails.len(), 1);
        assert_eq!(record.private_key().unwrap(), private_key);
    }

    #[test]
    fn test_json_layout() {
        let (public_key, private_key) = small_keypair();
        let public = PublicKeyRecord::new(&public_key).with_owner("a@b.c");
        let private = PrivateKeyRecord::new(&private_key);

        let public_json: serde_json::Value = serde_json::to_value(&public).unwrap();
        assert_eq!(public_json["email"], "a@b.c");
        assert_eq!(public_json["key"], public.key.as_str());

        let private_json = serde_json::to_string(&private).unwrap();
        let parsed: PrivateKeyRecord = serde_json::from_str(&private_json).unwrap();
        assert_eq!(parsed, private);
    }

    #[test]
    fn test_missing_identity_fields() {
        let parsed: PublicKeyRecord = serde_json::from_str(r#"{"key": "AAAAAQMAAAABIQ=="}"#).unwrap();
        assert_eq!(parsed.email, "");
        assert_eq!(parsed.public_key().unwrap(), RsaPublicKey::new(from_u64(3), from_u64(33)));
    }

    #[test]
    fn test_corrupt_key() {
        let record = PublicKeyRecord {
            email: String::new(),
            key: "AAAA".to_string(),
        };
        assert!(matches!(record.public_key(), Err(RsaError::InvalidKeyEncoding(_))));
    }
}
