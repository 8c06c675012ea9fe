//! Shared contract for vault connectors.
//!
//! Defines the [`VaultConnector`] trait implemented by the entity-storage and
//! HashiCorp backends, the error taxonomy shared by both, the
//! [`VaultRecordStore`] collaborator interface consumed by the local
//! connector, and the dependency-injected [`ConnectorRegistry`].

pub mod connector;
pub mod error;
pub mod registry;
pub mod storage;
pub mod types;

pub use connector::VaultConnector;
pub use error::{Result, VaultError};
pub use registry::ConnectorRegistry;
pub use storage::{RecordNamespace, StorageKey, VaultRecordStore};
pub use types::{validate_component, VaultEncryptionType, VaultKey, VaultKeyType};
