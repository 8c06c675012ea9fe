//! Entity-storage backed vault connector.
//!
//! Keys and secrets live in a [`VaultRecordStore`] as JSON records with
//! base64-encoded key material; all cryptographic operations run locally.
//! Key generation derives entropy from a fresh BIP-39 mnemonic seed, and the
//! encryption envelope is `nonce || ciphertext` with a 12-byte
//! ChaCha20-Poly1305 nonce so records can be decrypted without any backend
//! assistance.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bip39::Mnemonic;
use chacha20poly1305::{aead::Aead, ChaCha20Poly1305, KeyInit, Nonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use vault_connector_spec::{
    Result, StorageKey, VaultConnector, VaultEncryptionType, VaultError, VaultKey, VaultKeyType,
    VaultRecordStore,
};

mod memory;

pub use memory::MemoryVaultRecordStore;

/// Vault connector holding key material in a local record store.
///
/// An optional partition scopes every record to a tenant/identity; two
/// connectors with different partitions never see each other's records even
/// when they share one store.
pub struct EntityStorageVaultConnector<S>
where
    S: VaultRecordStore,
{
    store: S,
    partition: Option<String>,
}

impl<S> EntityStorageVaultConnector<S>
where
    S: VaultRecordStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            partition: None,
        }
    }

    pub fn with_partition(store: S, partition: impl Into<String>) -> Self {
        Self {
            store,
            partition: Some(partition.into()),
        }
    }

    fn key_id(&self, name: &str) -> Result<StorageKey> {
        StorageKey::keys(self.partition.as_deref(), name)
    }

    fn secret_id(&self, name: &str) -> Result<StorageKey> {
        StorageKey::secrets(self.partition.as_deref(), name)
    }

    async fn load_key(&self, name: &str) -> Result<VaultKey> {
        let id = self.key_id(name)?;
        let bytes = self
            .store
            .get(&id)
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: format!("key {name}"),
            })?;
        let record: StoredKeyRecord = serde_json::from_slice(&bytes)
            .map_err(|err| VaultError::Storage(format!("corrupted key record {id}: {err}")))?;
        record.into_key()
    }

    async fn store_key(&self, name: &str, key: &VaultKey) -> Result<()> {
        let id = self.key_id(name)?;
        let record = StoredKeyRecord::from_key(&id.to_string(), key);
        let bytes = serde_json::to_vec(&record)
            .map_err(|err| VaultError::Storage(format!("failed to encode key record: {err}")))?;
        self.store.set(&id, bytes).await
    }
}

#[async_trait]
impl<S> VaultConnector for EntityStorageVaultConnector<S>
where
    S: VaultRecordStore,
{
    async fn bootstrap(&self) -> bool {
        // Local storage has nothing to probe.
        debug!(partition = ?self.partition, "entity-storage vault connector ready");
        true
    }

    async fn create_key(&self, name: &str, key_type: VaultKeyType) -> Result<Vec<u8>> {
        let id = self.key_id(name)?;
        if self.store.get(&id).await?.is_some() {
            return Err(VaultError::AlreadyExists {
                entity: format!("key {name}"),
            });
        }

        let (private_key, public_key) = generate_key_material(key_type)?;
        let key = VaultKey::new(key_type, private_key, public_key);
        self.store_key(name, &key).await?;

        debug!(name = %name, key_type = %key_type, "created vault key");

        // Symmetric types have no separate public component; return the raw
        // key so the return shape stays uniform.
        Ok(key.public_key.unwrap_or(key.private_key))
    }

    async fn add_key(
        &self,
        name: &str,
        key_type: VaultKeyType,
        private_key: &[u8],
        public_key: Option<&[u8]>,
    ) -> Result<()> {
        let id = self.key_id(name)?;
        validate_key_material(key_type, private_key, public_key)?;

        if self.store.get(&id).await?.is_some() {
            return Err(VaultError::AlreadyExists {
                entity: format!("key {name}"),
            });
        }

        let key = VaultKey::new(
            key_type,
            private_key.to_vec(),
            public_key.map(<[u8]>::to_vec),
        );
        self.store_key(name, &key).await?;

        debug!(name = %name, key_type = %key_type, "added vault key");
        Ok(())
    }

    async fn get_key(&self, name: &str) -> Result<VaultKey> {
        self.load_key(name).await
    }

    async fn rename_key(&self, name: &str, new_name: &str) -> Result<()> {
        let old_id = self.key_id(name)?;
        let new_id = self.key_id(new_name)?;

        let key = self.load_key(name).await?;

        // Remove-then-insert across two storage calls; not atomic.
        self.store.remove(&old_id).await?;
        let record = StoredKeyRecord::from_key(&new_id.to_string(), &key);
        let bytes = serde_json::to_vec(&record)
            .map_err(|err| VaultError::Storage(format!("failed to encode key record: {err}")))?;
        self.store.set(&new_id, bytes).await?;

        debug!(from = %name, to = %new_name, "renamed vault key");
        Ok(())
    }

    async fn remove_key(&self, name: &str) -> Result<()> {
        let id = self.key_id(name)?;
        if self.store.get(&id).await?.is_none() {
            return Err(VaultError::NotFound {
                entity: format!("key {name}"),
            });
        }
        self.store.remove(&id).await?;

        debug!(name = %name, "removed vault key");
        Ok(())
    }

    async fn sign(&self, name: &str, data: &[u8]) -> Result<Vec<u8>> {
        let key = self.load_key(name).await?;
        match key.key_type {
            VaultKeyType::Ed25519 => sign_ed25519(&key.private_key, data),
            VaultKeyType::Secp256k1 => sign_secp256k1(&key.private_key, data),
            VaultKeyType::ChaCha20Poly1305 => {
                Err(VaultError::UnsupportedKeyType(key.key_type.to_string()))
            }
        }
    }

    async fn verify(&self, name: &str, data: &[u8], signature: &[u8]) -> Result<bool> {
        let key = self.load_key(name).await?;
        let public_key = key
            .public_key
            .as_deref()
            .ok_or_else(|| VaultError::UnsupportedKeyType(key.key_type.to_string()))?;
        match key.key_type {
            VaultKeyType::Ed25519 => verify_ed25519(public_key, data, signature),
            VaultKeyType::Secp256k1 => verify_secp256k1(public_key, data, signature),
            VaultKeyType::ChaCha20Poly1305 => {
                Err(VaultError::UnsupportedKeyType(key.key_type.to_string()))
            }
        }
    }

    async fn encrypt(
        &self,
        name: &str,
        encryption_type: VaultEncryptionType,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        let key = self.load_key(name).await?;
        if !key.key_type.supports_encryption() {
            return Err(VaultError::UnsupportedKeyType(key.key_type.to_string()));
        }
        encrypt_chacha(encryption_type, &key.private_key, data)
    }

    async fn decrypt(
        &self,
        name: &str,
        encryption_type: VaultEncryptionType,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let key = self.load_key(name).await?;
        if !key.key_type.supports_encryption() {
            return Err(VaultError::UnsupportedKeyType(key.key_type.to_string()));
        }
        decrypt_chacha(encryption_type, &key.private_key, ciphertext)
    }

    async fn set_secret(&self, name: &str, value: &Value) -> Result<()> {
        let id = self.secret_id(name)?;
        // Persisted as opaque JSON text.
        self.store.set(&id, value.to_string().into_bytes()).await?;

        debug!(name = %name, "stored secret");
        Ok(())
    }

    async fn get_secret(&self, name: &str) -> Result<Value> {
        let id = self.secret_id(name)?;
        let bytes = self
            .store
            .get(&id)
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: format!("secret {name}"),
            })?;
        serde_json::from_slice(&bytes)
            .map_err(|err| VaultError::Storage(format!("corrupted secret record {id}: {err}")))
    }

    async fn remove_secret(&self, name: &str) -> Result<()> {
        let id = self.secret_id(name)?;
        if self.store.get(&id).await?.is_none() {
            return Err(VaultError::NotFound {
                entity: format!("secret {name}"),
            });
        }
        self.store.remove(&id).await?;

        debug!(name = %name, "removed secret");
        Ok(())
    }
}

/// Stored wire form of a key record; key material is base64.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredKeyRecord {
    id: String,
    #[serde(rename = "type")]
    key_type: VaultKeyType,
    private_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
}

impl StoredKeyRecord {
    fn from_key(id: &str, key: &VaultKey) -> Self {
        Self {
            id: id.to_string(),
            key_type: key.key_type,
            private_key: STANDARD.encode(&key.private_key),
            public_key: key.public_key.as_ref().map(|pk| STANDARD.encode(pk)),
        }
    }

    fn into_key(self) -> Result<VaultKey> {
        let private_key = decode_bytes(&self.private_key)?;
        let public_key = self.public_key.as_deref().map(decode_bytes).transpose()?;
        Ok(VaultKey::new(self.key_type, private_key, public_key))
    }
}

fn decode_bytes(input: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(input.as_bytes())
        .map_err(|err| VaultError::Storage(err.to_string()))
}

/// Generate fresh key material for the given type.
///
/// Entropy comes from a random BIP-39 mnemonic's seed, truncated to the
/// algorithm's private key size; the public component is derived for
/// asymmetric types.
fn generate_key_material(key_type: VaultKeyType) -> Result<(Vec<u8>, Option<Vec<u8>>)> {
    let mut entropy = [0u8; 32];
    rand::rng().fill_bytes(&mut entropy);
    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|err| VaultError::Crypto(format!("mnemonic generation failed: {err}")))?;
    let seed = mnemonic.to_seed("");

    let mut private_key = [0u8; 32];
    private_key.copy_from_slice(&seed[..key_type.private_key_len()]);

    let public_key = match key_type {
        VaultKeyType::Ed25519 => Some(
            ed25519_dalek::SigningKey::from_bytes(&private_key)
                .verifying_key()
                .to_bytes()
                .to_vec(),
        ),
        VaultKeyType::Secp256k1 => {
            use k256::elliptic_curve::sec1::ToEncodedPoint;

            let signing_key = k256::ecdsa::SigningKey::from_slice(&private_key)
                .map_err(|err| VaultError::Crypto(format!("invalid secp256k1 seed: {err}")))?;
            Some(
                signing_key
                    .verifying_key()
                    .to_encoded_point(true)
                    .as_bytes()
                    .to_vec(),
            )
        }
        VaultKeyType::ChaCha20Poly1305 => None,
    };

    Ok((private_key.to_vec(), public_key))
}

fn validate_key_material(
    key_type: VaultKeyType,
    private_key: &[u8],
    public_key: Option<&[u8]>,
) -> Result<()> {
    if private_key.len() != key_type.private_key_len() {
        return Err(VaultError::InvalidKeyMaterial {
            field: "private_key",
            reason: format!(
                "expected {} bytes, got {}",
                key_type.private_key_len(),
                private_key.len()
            ),
        });
    }

    match (key_type.public_key_len(), public_key) {
        (Some(expected), Some(public_key)) if public_key.len() != expected => {
            Err(VaultError::InvalidKeyMaterial {
                field: "public_key",
                reason: format!("expected {} bytes, got {}", expected, public_key.len()),
            })
        }
        (Some(_), None) => Err(VaultError::InvalidKeyMaterial {
            field: "public_key",
            reason: format!("required for {key_type} keys"),
        }),
        (None, Some(_)) => Err(VaultError::InvalidKeyMaterial {
            field: "public_key",
            reason: format!("not applicable to {key_type} keys"),
        }),
        _ => Ok(()),
    }
}

fn sign_ed25519(private_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    use ed25519_dalek::Signer;

    let seed: [u8; 32] = private_key
        .try_into()
        .map_err(|_| VaultError::Crypto("invalid Ed25519 key length".into()))?;
    let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
    Ok(signing_key.sign(data).to_bytes().to_vec())
}

fn verify_ed25519(public_key: &[u8], data: &[u8], signature: &[u8]) -> Result<bool> {
    use ed25519_dalek::Verifier;

    let bytes: [u8; 32] = public_key
        .try_into()
        .map_err(|_| VaultError::Crypto("invalid Ed25519 public key length".into()))?;
    let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&bytes)
        .map_err(|err| VaultError::Crypto(format!("invalid Ed25519 public key: {err}")))?;

    // A malformed signature is simply not valid for the data.
    let signature = match ed25519_dalek::Signature::from_slice(signature) {
        Ok(signature) => signature,
        Err(_) => return Ok(false),
    };

    Ok(verifying_key.verify(data, &signature).is_ok())
}

fn sign_secp256k1(private_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    use k256::ecdsa::signature::Signer;

    let signing_key = k256::ecdsa::SigningKey::from_slice(private_key)
        .map_err(|err| VaultError::Crypto(format!("invalid secp256k1 key: {err}")))?;
    let signature: k256::ecdsa::Signature = signing_key.sign(data);
    Ok(signature.to_bytes().to_vec())
}

fn verify_secp256k1(public_key: &[u8], data: &[u8], signature: &[u8]) -> Result<bool> {
    use k256::ecdsa::signature::Verifier;

    let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|err| VaultError::Crypto(format!("invalid secp256k1 public key: {err}")))?;

    let signature = match k256::ecdsa::Signature::from_slice(signature) {
        Ok(signature) => signature,
        Err(_) => return Ok(false),
    };

    Ok(verifying_key.verify(data, &signature).is_ok())
}

fn encrypt_chacha(
    encryption_type: VaultEncryptionType,
    key: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| VaultError::Crypto("invalid ChaCha20-Poly1305 key".into()))?;

    let mut nonce = vec![0u8; encryption_type.nonce_len()];
    rand::rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| VaultError::Crypto("encryption failed".into()))?;

    // Envelope: nonce || ciphertext.
    let mut out = nonce;
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn decrypt_chacha(
    encryption_type: VaultEncryptionType,
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>> {
    let nonce_len = encryption_type.nonce_len();
    if data.len() < nonce_len {
        return Err(VaultError::InvalidKeyMaterial {
            field: "ciphertext",
            reason: format!("shorter than the {nonce_len}-byte nonce"),
        });
    }
    let (nonce, ciphertext) = data.split_at(nonce_len);

    let cipher = ChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| VaultError::Crypto("invalid ChaCha20-Poly1305 key".into()))?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| VaultError::Crypto("decryption failed".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_material_matches_type_shape() {
        let (private_key, public_key) =
            generate_key_material(VaultKeyType::Ed25519).expect("generate");
        assert_eq!(private_key.len(), 32);
        assert_eq!(public_key.expect("public").len(), 32);

        let (private_key, public_key) =
            generate_key_material(VaultKeyType::Secp256k1).expect("generate");
        assert_eq!(private_key.len(), 32);
        assert_eq!(public_key.expect("public").len(), 33);

        let (private_key, public_key) =
            generate_key_material(VaultKeyType::ChaCha20Poly1305).expect("generate");
        assert_eq!(private_key.len(), 32);
        assert!(public_key.is_none());
    }

    #[test]
    fn envelope_prefixes_fresh_nonce() {
        let key = [7u8; 32];
        let sealed =
            encrypt_chacha(VaultEncryptionType::ChaCha20Poly1305, &key, b"payload").unwrap();
        // 12-byte nonce + ciphertext + 16-byte tag.
        assert_eq!(sealed.len(), 12 + 7 + 16);

        let sealed_again =
            encrypt_chacha(VaultEncryptionType::ChaCha20Poly1305, &key, b"payload").unwrap();
        assert_ne!(sealed[..12], sealed_again[..12], "nonce must be fresh");

        let opened = decrypt_chacha(VaultEncryptionType::ChaCha20Poly1305, &key, &sealed).unwrap();
        assert_eq!(opened, b"payload");
    }

    #[test]
    fn short_ciphertext_is_a_guard_failure() {
        let key = [7u8; 32];
        let err = decrypt_chacha(VaultEncryptionType::ChaCha20Poly1305, &key, &[1, 2, 3])
            .unwrap_err();
        assert!(err.is_validation(), "got {err:?}");
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let key = [7u8; 32];
        let mut sealed =
            encrypt_chacha(VaultEncryptionType::ChaCha20Poly1305, &key, b"payload").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xFF;
        let err =
            decrypt_chacha(VaultEncryptionType::ChaCha20Poly1305, &key, &sealed).unwrap_err();
        assert!(matches!(err, VaultError::Crypto(_)));
    }

    #[test]
    fn material_validation_per_type() {
        assert!(validate_key_material(VaultKeyType::Ed25519, &[0; 32], Some(&[0; 32])).is_ok());
        assert!(validate_key_material(VaultKeyType::ChaCha20Poly1305, &[0; 32], None).is_ok());

        // Wrong private length.
        assert!(matches!(
            validate_key_material(VaultKeyType::Ed25519, &[0; 16], Some(&[0; 32])),
            Err(VaultError::InvalidKeyMaterial {
                field: "private_key",
                ..
            })
        ));
        // Asymmetric without a public key.
        assert!(matches!(
            validate_key_material(VaultKeyType::Secp256k1, &[0; 32], None),
            Err(VaultError::InvalidKeyMaterial {
                field: "public_key",
                ..
            })
        ));
        // Symmetric with a public key.
        assert!(matches!(
            validate_key_material(VaultKeyType::ChaCha20Poly1305, &[0; 32], Some(&[0; 32])),
            Err(VaultError::InvalidKeyMaterial {
                field: "public_key",
                ..
            })
        ));
        // Wrong public length for secp256k1 (expects SEC1 compressed).
        assert!(matches!(
            validate_key_material(VaultKeyType::Secp256k1, &[0; 32], Some(&[0; 32])),
            Err(VaultError::InvalidKeyMaterial {
                field: "public_key",
                ..
            })
        ));
    }

    #[test]
    fn stored_record_round_trip() {
        let key = VaultKey::new(VaultKeyType::Ed25519, vec![1; 32], Some(vec![2; 32]));
        let record = StoredKeyRecord::from_key("keys/signing", &key);
        let encoded = serde_json::to_string(&record).unwrap();
        assert!(encoded.contains("\"type\":\"ed25519\""));
        assert!(encoded.contains("\"privateKey\""));

        let decoded: StoredKeyRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.into_key().unwrap(), key);
    }

    #[test]
    fn symmetric_record_omits_public_key() {
        let key = VaultKey::new(VaultKeyType::ChaCha20Poly1305, vec![1; 32], None);
        let encoded =
            serde_json::to_string(&StoredKeyRecord::from_key("keys/aead", &key)).unwrap();
        assert!(!encoded.contains("publicKey"));
    }
}
