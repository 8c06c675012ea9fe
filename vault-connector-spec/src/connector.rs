use crate::error::{Result, VaultError};
use crate::types::{VaultEncryptionType, VaultKey, VaultKeyType};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Uniform secret/key-management contract implemented by every connector.
///
/// Names are logical identifiers; connectors map them to storage records or
/// backend paths, optionally under a tenant partition fixed at construction
/// time. Concurrent invocations against the same name are not serialized
/// internally: multi-step operations (rename, create pre-check, remove
/// pre-check) are not transactional and callers needing stronger guarantees
/// must serialize access per name externally.
#[async_trait]
pub trait VaultConnector: Send + Sync {
    /// Lightweight health probe. Failures are logged, never raised, so the
    /// caller decides whether to proceed.
    async fn bootstrap(&self) -> bool;

    /// Generate and store a new key, returning the public key bytes.
    ///
    /// For symmetric types there is no separate public component; the raw
    /// symmetric key is returned instead so the shape stays uniform. That
    /// means symmetric key material crosses this boundary by design.
    async fn create_key(&self, name: &str, key_type: VaultKeyType) -> Result<Vec<u8>>;

    /// Store caller-supplied key material under a new name.
    async fn add_key(
        &self,
        name: &str,
        key_type: VaultKeyType,
        private_key: &[u8],
        public_key: Option<&[u8]>,
    ) -> Result<()>;

    /// Fetch stored key material.
    async fn get_key(&self, name: &str) -> Result<VaultKey>;

    /// Move a key to a new name, keeping its material. Not atomic: a crash
    /// mid-way can leave the key present under both names.
    async fn rename_key(&self, name: &str, new_name: &str) -> Result<()>;

    /// Delete a key.
    async fn remove_key(&self, name: &str) -> Result<()>;

    /// Sign `data` with the named key.
    async fn sign(&self, name: &str, data: &[u8]) -> Result<Vec<u8>>;

    /// Verify a signature produced by [`sign`](Self::sign).
    async fn verify(&self, name: &str, data: &[u8], signature: &[u8]) -> Result<bool>;

    /// Encrypt `data` with the named symmetric key.
    async fn encrypt(
        &self,
        name: &str,
        encryption_type: VaultEncryptionType,
        data: &[u8],
    ) -> Result<Vec<u8>>;

    /// Decrypt ciphertext produced by [`encrypt`](Self::encrypt).
    async fn decrypt(
        &self,
        name: &str,
        encryption_type: VaultEncryptionType,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;

    /// Store a secret value, overwriting any existing value.
    async fn set_secret(&self, name: &str, value: &Value) -> Result<()>;

    /// Fetch a secret value.
    async fn get_secret(&self, name: &str) -> Result<Value>;

    /// Delete a secret (all versions, where the backend versions secrets).
    async fn remove_secret(&self, name: &str) -> Result<()>;

    /// All known version numbers of a secret. Only versioned backends
    /// support this.
    async fn get_secret_versions(&self, name: &str) -> Result<Vec<u32>> {
        let _ = name;
        Err(VaultError::NotSupported {
            operation: "get_secret_versions",
        })
    }
}

#[async_trait]
impl<T> VaultConnector for Arc<T>
where
    T: VaultConnector + ?Sized,
{
    async fn bootstrap(&self) -> bool {
        (**self).bootstrap().await
    }

    async fn create_key(&self, name: &str, key_type: VaultKeyType) -> Result<Vec<u8>> {
        (**self).create_key(name, key_type).await
    }

    async fn add_key(
        &self,
        name: &str,
        key_type: VaultKeyType,
        private_key: &[u8],
        public_key: Option<&[u8]>,
    ) -> Result<()> {
        (**self).add_key(name, key_type, private_key, public_key).await
    }

    async fn get_key(&self, name: &str) -> Result<VaultKey> {
        (**self).get_key(name).await
    }

    async fn rename_key(&self, name: &str, new_name: &str) -> Result<()> {
        (**self).rename_key(name, new_name).await
    }

    async fn remove_key(&self, name: &str) -> Result<()> {
        (**self).remove_key(name).await
    }

    async fn sign(&self, name: &str, data: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(name, data).await
    }

    async fn verify(&self, name: &str, data: &[u8], signature: &[u8]) -> Result<bool> {
        (**self).verify(name, data, signature).await
    }

    async fn encrypt(
        &self,
        name: &str,
        encryption_type: VaultEncryptionType,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        (**self).encrypt(name, encryption_type, data).await
    }

    async fn decrypt(
        &self,
        name: &str,
        encryption_type: VaultEncryptionType,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        (**self).decrypt(name, encryption_type, ciphertext).await
    }

    async fn set_secret(&self, name: &str, value: &Value) -> Result<()> {
        (**self).set_secret(name, value).await
    }

    async fn get_secret(&self, name: &str) -> Result<Value> {
        (**self).get_secret(name).await
    }

    async fn remove_secret(&self, name: &str) -> Result<()> {
        (**self).remove_secret(name).await
    }

    async fn get_secret_versions(&self, name: &str) -> Result<Vec<u32>> {
        (**self).get_secret_versions(name).await
    }
}

#[async_trait]
impl<T> VaultConnector for Box<T>
where
    T: VaultConnector + ?Sized,
{
    async fn bootstrap(&self) -> bool {
        (**self).bootstrap().await
    }

    async fn create_key(&self, name: &str, key_type: VaultKeyType) -> Result<Vec<u8>> {
        (**self).create_key(name, key_type).await
    }

    async fn add_key(
        &self,
        name: &str,
        key_type: VaultKeyType,
        private_key: &[u8],
        public_key: Option<&[u8]>,
    ) -> Result<()> {
        (**self).add_key(name, key_type, private_key, public_key).await
    }

    async fn get_key(&self, name: &str) -> Result<VaultKey> {
        (**self).get_key(name).await
    }

    async fn rename_key(&self, name: &str, new_name: &str) -> Result<()> {
        (**self).rename_key(name, new_name).await
    }

    async fn remove_key(&self, name: &str) -> Result<()> {
        (**self).remove_key(name).await
    }

    async fn sign(&self, name: &str, data: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(name, data).await
    }

    async fn verify(&self, name: &str, data: &[u8], signature: &[u8]) -> Result<bool> {
        (**self).verify(name, data, signature).await
    }

    async fn encrypt(
        &self,
        name: &str,
        encryption_type: VaultEncryptionType,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        (**self).encrypt(name, encryption_type, data).await
    }

    async fn decrypt(
        &self,
        name: &str,
        encryption_type: VaultEncryptionType,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        (**self).decrypt(name, encryption_type, ciphertext).await
    }

    async fn set_secret(&self, name: &str, value: &Value) -> Result<()> {
        (**self).set_secret(name, value).await
    }

    async fn get_secret(&self, name: &str) -> Result<Value> {
        (**self).get_secret(name).await
    }

    async fn remove_secret(&self, name: &str) -> Result<()> {
        (**self).remove_secret(name).await
    }

    async fn get_secret_versions(&self, name: &str) -> Result<Vec<u32>> {
        (**self).get_secret_versions(name).await
    }
}
