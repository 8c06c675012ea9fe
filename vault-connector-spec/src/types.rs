use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validate that a name component is non-empty and contains only supported
/// characters. Components never contain `/`; namespacing is expressed through
/// [`crate::storage::StorageKey`] instead of string concatenation.
pub fn validate_component(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VaultError::EmptyComponent { field });
    }

    if !value
        .chars()
        .all(|c| matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.'))
    {
        return Err(VaultError::InvalidCharacters {
            field,
            value: value.to_string(),
        });
    }

    Ok(())
}

/// Algorithm family of a vault key.
///
/// Determines whether the key is asymmetric (has a distinct public key) or
/// symmetric (private key only; operations that return a "public key" for
/// symmetric types return the raw key so the API shape stays uniform).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaultKeyType {
    #[serde(rename = "ed25519")]
    Ed25519,
    #[serde(rename = "secp256k1")]
    Secp256k1,
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl VaultKeyType {
    pub const fn is_asymmetric(self) -> bool {
        match self {
            Self::Ed25519 | Self::Secp256k1 => true,
            Self::ChaCha20Poly1305 => false,
        }
    }

    /// Private key size in bytes.
    pub const fn private_key_len(self) -> usize {
        32
    }

    /// Public key size in bytes, `None` for symmetric types.
    pub const fn public_key_len(self) -> Option<usize> {
        match self {
            Self::Ed25519 => Some(32),
            // SEC1 compressed point.
            Self::Secp256k1 => Some(33),
            Self::ChaCha20Poly1305 => None,
        }
    }

    pub const fn supports_signing(self) -> bool {
        self.is_asymmetric()
    }

    pub const fn supports_encryption(self) -> bool {
        matches!(self, Self::ChaCha20Poly1305)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }
}

impl fmt::Display for VaultKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaultKeyType {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            "secp256k1" => Ok(Self::Secp256k1),
            "chacha20-poly1305" | "chacha20poly1305" => Ok(Self::ChaCha20Poly1305),
            other => Err(VaultError::UnsupportedKeyType(other.into())),
        }
    }
}

/// Supported envelope encryption algorithms for `encrypt`/`decrypt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum VaultEncryptionType {
    #[default]
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl VaultEncryptionType {
    pub const fn nonce_len(self) -> usize {
        match self {
            Self::ChaCha20Poly1305 => 12,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }
}

impl fmt::Display for VaultEncryptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaultEncryptionType {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chacha20-poly1305" | "chacha20poly1305" => Ok(Self::ChaCha20Poly1305),
            other => Err(VaultError::UnsupportedEncryptionType(other.into())),
        }
    }
}

/// Key material returned by `get_key`.
///
/// `public_key` is `None` for symmetric types.
#[derive(Clone, PartialEq, Eq)]
pub struct VaultKey {
    pub key_type: VaultKeyType,
    pub private_key: Vec<u8>,
    pub public_key: Option<Vec<u8>>,
}

impl VaultKey {
    pub fn new(key_type: VaultKeyType, private_key: Vec<u8>, public_key: Option<Vec<u8>>) -> Self {
        Self {
            key_type,
            private_key,
            public_key,
        }
    }
}

// Private key material must never leak through logs.
impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultKey")
            .field("key_type", &self.key_type)
            .field("private_key", &format_args!("[{} bytes]", self.private_key.len()))
            .field("public_key", &self.public_key.as_ref().map(|k| k.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_validation() {
        assert!(validate_component("my-key_1.sig", "name").is_ok());
        assert!(matches!(
            validate_component("", "name"),
            Err(VaultError::EmptyComponent { field: "name" })
        ));
        assert!(matches!(
            validate_component("   ", "name"),
            Err(VaultError::EmptyComponent { .. })
        ));
        assert!(matches!(
            validate_component("tenant/key", "name"),
            Err(VaultError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn key_type_round_trip() {
        for kt in [
            VaultKeyType::Ed25519,
            VaultKeyType::Secp256k1,
            VaultKeyType::ChaCha20Poly1305,
        ] {
            assert_eq!(kt.as_str().parse::<VaultKeyType>().unwrap(), kt);
        }
        assert!(matches!(
            "rsa-4096".parse::<VaultKeyType>(),
            Err(VaultError::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn key_type_shape() {
        assert!(VaultKeyType::Ed25519.is_asymmetric());
        assert!(VaultKeyType::Secp256k1.is_asymmetric());
        assert!(!VaultKeyType::ChaCha20Poly1305.is_asymmetric());
        assert_eq!(VaultKeyType::Secp256k1.public_key_len(), Some(33));
        assert_eq!(VaultKeyType::ChaCha20Poly1305.public_key_len(), None);
        assert!(VaultKeyType::ChaCha20Poly1305.supports_encryption());
        assert!(!VaultKeyType::Ed25519.supports_encryption());
    }

    #[test]
    fn debug_redacts_private_key() {
        let key = VaultKey::new(VaultKeyType::Ed25519, vec![0xAB; 32], Some(vec![1; 32]));
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("171"), "private bytes leaked: {rendered}");
        assert!(rendered.contains("[32 bytes]"));
    }
}
