use crate::connector::VaultConnector;
use crate::error::{Result, VaultError};
use crate::types::validate_component;
use std::collections::HashMap;
use std::sync::Arc;

/// Explicit map from logical connector name to a constructed instance.
///
/// Built once at process start and passed down; there is deliberately no
/// global mutable registry.
#[derive(Default, Clone)]
pub struct ConnectorRegistry {
    connectors: HashMap<String, Arc<dyn VaultConnector>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connector under a logical name, replacing any previous
    /// registration for that name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        connector: Arc<dyn VaultConnector>,
    ) -> Result<()> {
        let name = name.into();
        validate_component(&name, "connector name")?;
        self.connectors.insert(name, connector);
        Ok(())
    }

    /// Resolve a connector by name.
    pub fn connector(&self, name: &str) -> Result<Arc<dyn VaultConnector>> {
        self.connectors
            .get(name)
            .cloned()
            .ok_or_else(|| VaultError::NotFound {
                entity: format!("connector {name}"),
            })
    }

    /// Registered connector names, unordered.
    pub fn names(&self) -> Vec<&str> {
        self.connectors.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::types::{VaultEncryptionType, VaultKey, VaultKeyType};
    use async_trait::async_trait;
    use serde_json::Value;

    struct NullConnector;

    #[async_trait]
    impl VaultConnector for NullConnector {
        async fn bootstrap(&self) -> bool {
            true
        }

        async fn create_key(&self, _: &str, _: VaultKeyType) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn add_key(
            &self,
            _: &str,
            _: VaultKeyType,
            _: &[u8],
            _: Option<&[u8]>,
        ) -> Result<()> {
            Ok(())
        }

        async fn get_key(&self, name: &str) -> Result<VaultKey> {
            Err(VaultError::NotFound {
                entity: format!("key {name}"),
            })
        }

        async fn rename_key(&self, _: &str, _: &str) -> Result<()> {
            Ok(())
        }

        async fn remove_key(&self, _: &str) -> Result<()> {
            Ok(())
        }

        async fn sign(&self, _: &str, _: &[u8]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn verify(&self, _: &str, _: &[u8], _: &[u8]) -> Result<bool> {
            Ok(false)
        }

        async fn encrypt(&self, _: &str, _: VaultEncryptionType, _: &[u8]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn decrypt(&self, _: &str, _: VaultEncryptionType, _: &[u8]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn set_secret(&self, _: &str, _: &Value) -> Result<()> {
            Ok(())
        }

        async fn get_secret(&self, name: &str) -> Result<Value> {
            Err(VaultError::NotFound {
                entity: format!("secret {name}"),
            })
        }

        async fn remove_secret(&self, _: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn register_and_resolve() {
        let mut registry = ConnectorRegistry::new();
        registry.register("local", Arc::new(NullConnector)).unwrap();

        assert!(registry.connector("local").is_ok());
        assert!(matches!(
            registry.connector("remote"),
            Err(VaultError::NotFound { .. })
        ));
        assert_eq!(registry.names(), vec!["local"]);
    }

    #[test]
    fn rejects_invalid_names() {
        let mut registry = ConnectorRegistry::new();
        let err = registry.register("", Arc::new(NullConnector)).unwrap_err();
        assert!(matches!(err, VaultError::EmptyComponent { .. }));
    }

    #[tokio::test]
    async fn default_secret_versions_is_not_supported() {
        let connector = NullConnector;
        let err = connector.get_secret_versions("token").await.unwrap_err();
        assert!(matches!(
            err,
            VaultError::NotSupported {
                operation: "get_secret_versions"
            }
        ));
    }
}
