use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use vault_connector_spec::{Result, StorageKey, VaultRecordStore};

/// In-memory record store, shareable across connector instances.
///
/// Single-key operations are atomic under the lock; nothing spans two keys.
#[derive(Default, Clone)]
pub struct MemoryVaultRecordStore {
    records: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryVaultRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, across all partitions and namespaces.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl VaultRecordStore for MemoryVaultRecordStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<Vec<u8>>> {
        Ok(self.records.read().get(&key.to_string()).cloned())
    }

    async fn set(&self, key: &StorageKey, value: Vec<u8>) -> Result<()> {
        self.records.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &StorageKey) -> Result<()> {
        self.records.write().remove(&key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_and_remove() {
        let store = MemoryVaultRecordStore::new();
        let key = StorageKey::keys(None, "signing").unwrap();

        assert_eq!(store.get(&key).await.unwrap(), None);
        store.set(&key, b"material".to_vec()).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(b"material".to_vec()));

        store.remove(&key).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn partitions_do_not_collide() {
        let store = MemoryVaultRecordStore::new();
        let a = StorageKey::keys(Some("tenant-a"), "signing").unwrap();
        let b = StorageKey::keys(Some("tenant-b"), "signing").unwrap();

        store.set(&a, vec![1]).await.unwrap();
        store.set(&b, vec![2]).await.unwrap();

        assert_eq!(store.get(&a).await.unwrap(), Some(vec![1]));
        assert_eq!(store.get(&b).await.unwrap(), Some(vec![2]));
        assert_eq!(store.len(), 2);
    }
}
