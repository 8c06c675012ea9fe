use crate::error::Result;
use crate::types::validate_component;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Logical namespace within the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordNamespace {
    Keys,
    Secrets,
}

impl RecordNamespace {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keys => "keys",
            Self::Secrets => "secrets",
        }
    }
}

/// Structured storage key: optional tenant partition, namespace, record name.
///
/// Rendered as `[{partition}/]{namespace}/{name}`. Keeping the composite as a
/// type means call sites never concatenate identity strings by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    partition: Option<String>,
    namespace: RecordNamespace,
    name: String,
}

impl StorageKey {
    pub fn new(
        partition: Option<&str>,
        namespace: RecordNamespace,
        name: &str,
    ) -> Result<Self> {
        if let Some(partition) = partition {
            validate_component(partition, "partition")?;
        }
        validate_component(name, "name")?;
        Ok(Self {
            partition: partition.map(str::to_string),
            namespace,
            name: name.to_string(),
        })
    }

    pub fn keys(partition: Option<&str>, name: &str) -> Result<Self> {
        Self::new(partition, RecordNamespace::Keys, name)
    }

    pub fn secrets(partition: Option<&str>, name: &str) -> Result<Self> {
        Self::new(partition, RecordNamespace::Secrets, name)
    }

    pub fn partition(&self) -> Option<&str> {
        self.partition.as_deref()
    }

    pub fn namespace(&self) -> RecordNamespace {
        self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same partition and namespace, different record name.
    pub fn sibling(&self, name: &str) -> Result<Self> {
        Self::new(self.partition.as_deref(), self.namespace, name)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(partition) = &self.partition {
            write!(f, "{partition}/")?;
        }
        write!(f, "{}/{}", self.namespace.as_str(), self.name)
    }
}

/// Keyed byte-record store consumed by the local connector.
///
/// Single-key get/set/remove is the only atomicity this interface offers;
/// multi-step connector operations built on top of it are not transactional.
#[async_trait]
pub trait VaultRecordStore: Send + Sync {
    async fn get(&self, key: &StorageKey) -> Result<Option<Vec<u8>>>;
    async fn set(&self, key: &StorageKey, value: Vec<u8>) -> Result<()>;
    async fn remove(&self, key: &StorageKey) -> Result<()>;
}

#[async_trait]
impl<T> VaultRecordStore for Arc<T>
where
    T: VaultRecordStore + ?Sized,
{
    async fn get(&self, key: &StorageKey) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &StorageKey, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &StorageKey) -> Result<()> {
        (**self).remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;

    #[test]
    fn renders_with_and_without_partition() {
        let plain = StorageKey::keys(None, "signing").unwrap();
        assert_eq!(plain.to_string(), "keys/signing");

        let scoped = StorageKey::secrets(Some("tenant-a"), "api-token").unwrap();
        assert_eq!(scoped.to_string(), "tenant-a/secrets/api-token");
    }

    #[test]
    fn rejects_invalid_components() {
        assert!(matches!(
            StorageKey::keys(None, ""),
            Err(VaultError::EmptyComponent { .. })
        ));
        assert!(matches!(
            StorageKey::keys(Some("a/b"), "name"),
            Err(VaultError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn sibling_keeps_partition_and_namespace() {
        let key = StorageKey::keys(Some("tenant-a"), "old").unwrap();
        let renamed = key.sibling("new").unwrap();
        assert_eq!(renamed.to_string(), "tenant-a/keys/new");
    }
}
