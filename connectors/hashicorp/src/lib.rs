//! Vault connector backed by the live HashiCorp Vault HTTP API.
//!
//! Keys are managed through the Transit secrets engine and secrets through a
//! KV v2 mount. Transit never exposes key material by default, so every key
//! is created with `exportable` and `allow_plaintext_backup` enabled; reading
//! a symmetric key back goes through the backup endpoint (the only read path
//! Transit offers for raw symmetric material). Signatures and ciphertexts use
//! the backend's versioned `vault:v1:` wire format.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use vault_connector_spec::{
    validate_component, Result, VaultConnector, VaultEncryptionType, VaultError, VaultKey,
    VaultKeyType,
};

const DEFAULT_KV_MOUNT: &str = "secret";
const DEFAULT_TRANSIT_MOUNT: &str = "transit";
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix the backend puts on versioned signatures and ciphertexts.
const VAULT_WIRE_PREFIX: &str = "vault:v1:";

/// Connection settings for a Vault server.
///
/// Endpoint and token are mandatory; mounts, API version and timeout default
/// to the backend's conventions.
#[derive(Clone, Debug)]
pub struct HashicorpVaultConfig {
    pub endpoint: String,
    pub token: String,
    pub kv_mount: String,
    pub transit_mount: String,
    pub api_version: String,
    pub namespace: Option<String>,
    pub timeout: Duration,
}

impl HashicorpVaultConfig {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        let token = token.into();
        if endpoint.trim().is_empty() {
            return Err(VaultError::EmptyComponent { field: "endpoint" });
        }
        if token.trim().is_empty() {
            return Err(VaultError::EmptyComponent { field: "token" });
        }
        Ok(Self {
            endpoint,
            token,
            kv_mount: DEFAULT_KV_MOUNT.to_string(),
            transit_mount: DEFAULT_TRANSIT_MOUNT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            namespace: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read the configuration from the conventional `VAULT_*` environment.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("VAULT_ADDR")
            .map_err(|_| VaultError::EmptyComponent { field: "endpoint" })?;
        let token = std::env::var("VAULT_TOKEN")
            .map_err(|_| VaultError::EmptyComponent { field: "token" })?;
        let mut config = Self::new(endpoint, token)?;
        if let Ok(mount) = std::env::var("VAULT_KV_MOUNT") {
            config.kv_mount = mount;
        }
        if let Ok(mount) = std::env::var("VAULT_TRANSIT_MOUNT") {
            config.transit_mount = mount;
        }
        config.namespace = std::env::var("VAULT_NAMESPACE").ok();
        if let Some(timeout) = std::env::var("VAULT_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
        {
            config.timeout = Duration::from_secs(timeout);
        }
        Ok(config)
    }

    pub fn with_kv_mount(mut self, mount: impl Into<String>) -> Self {
        self.kv_mount = mount.into();
        self
    }

    pub fn with_transit_mount(mut self, mount: impl Into<String>) -> Self {
        self.transit_mount = mount.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.api_version,
            path.trim_start_matches('/')
        )
    }
}

/// Vault connector translating every operation into Transit / KV v2 calls.
pub struct HashicorpVaultConnector {
    config: HashicorpVaultConfig,
    client: Client,
}

impl HashicorpVaultConnector {
    pub fn new(config: HashicorpVaultConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| VaultError::backend("build_client", "hashicorp vault", err))?;
        Ok(Self { config, client })
    }

    // Path construction: deterministic templating from the configured mounts.

    fn kv_data_path(&self, name: &str) -> String {
        format!("{}/data/{}", self.config.kv_mount.trim_matches('/'), name)
    }

    fn kv_metadata_path(&self, name: &str) -> String {
        format!("{}/metadata/{}", self.config.kv_mount.trim_matches('/'), name)
    }

    fn transit_keys_path(&self, name: &str) -> String {
        format!("{}/keys/{}", self.config.transit_mount.trim_matches('/'), name)
    }

    fn transit_config_path(&self, name: &str) -> String {
        format!("{}/config", self.transit_keys_path(name))
    }

    fn transit_op_path(&self, operation: &str, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.transit_mount.trim_matches('/'),
            operation,
            name
        )
    }

    fn transit_export_path(&self, key_type: VaultKeyType, name: &str) -> String {
        format!(
            "{}/export/{}/{}/latest",
            self.config.transit_mount.trim_matches('/'),
            export_kind(key_type),
            name
        )
    }

    /// Issue one API call. `Ok(None)` is the backend's 404; every other
    /// non-success status is wrapped with the operation context.
    async fn call(
        &self,
        operation: &'static str,
        entity: &str,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let url = self.config.api_url(path);
        let mut request = self
            .client
            .request(method, url)
            .header("X-Vault-Token", &self.config.token);
        if let Some(namespace) = &self.config.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response: Response = request
            .send()
            .await
            .map_err(|err| VaultError::backend(operation, entity, err))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(VaultError::Backend {
                operation,
                entity: entity.to_string(),
                message: format!("{status}: {text}"),
            });
        }
        if text.is_empty() {
            return Ok(Some(Value::Null));
        }
        let value = serde_json::from_str(&text)
            .map_err(|err| VaultError::backend(operation, entity, err))?;
        Ok(Some(value))
    }

    /// Read Transit key metadata; `None` means the key does not exist.
    async fn read_key(
        &self,
        operation: &'static str,
        name: &str,
    ) -> Result<Option<TransitKeyData>> {
        let entity = format!("key {name}");
        let response = self
            .call(operation, &entity, Method::GET, &self.transit_keys_path(name), None)
            .await?;
        match response {
            Some(value) => {
                let data = data_field(operation, &entity, &value)?;
                let parsed: TransitKeyData = serde_json::from_value(data.clone())
                    .map_err(|err| VaultError::backend(operation, &entity, err))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Force `deletion_allowed` and delete the key. Used by `remove_key` and
    /// the tail of `rename_key`.
    async fn delete_key(&self, operation: &'static str, name: &str) -> Result<()> {
        let entity = format!("key {name}");
        self.call(
            operation,
            &entity,
            Method::POST,
            &self.transit_config_path(name),
            Some(json!({ "deletion_allowed": true })),
        )
        .await?;
        self.call(
            operation,
            &entity,
            Method::DELETE,
            &self.transit_keys_path(name),
            None,
        )
        .await?;
        Ok(())
    }

    async fn rename_key_inner(&self, name: &str, new_name: &str) -> Result<()> {
        let backup = self.backup_key(name).await?;
        self.restore_key(&backup, new_name).await?;
        self.delete_key("rename_key", name).await
    }

    /// Update the Transit key configuration.
    pub async fn update_key_config(
        &self,
        name: &str,
        deletion_allowed: Option<bool>,
        exportable: Option<bool>,
    ) -> Result<()> {
        validate_component(name, "name")?;
        let entity = format!("key {name}");

        let mut body = serde_json::Map::new();
        if let Some(deletion_allowed) = deletion_allowed {
            body.insert("deletion_allowed".into(), Value::Bool(deletion_allowed));
        }
        if let Some(exportable) = exportable {
            body.insert("exportable".into(), Value::Bool(exportable));
        }

        self.call(
            "update_key_config",
            &entity,
            Method::POST,
            &self.transit_config_path(name),
            Some(Value::Object(body)),
        )
        .await?
        .ok_or(VaultError::NotFound { entity })?;
        Ok(())
    }

    /// Whether the backend will allow the key to be deleted.
    pub async fn get_key_delete_configuration(&self, name: &str) -> Result<bool> {
        validate_component(name, "name")?;
        let key = self
            .read_key("get_key_delete_configuration", name)
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: format!("key {name}"),
            })?;
        Ok(key.deletion_allowed)
    }

    /// Export the key as an opaque base64 backup blob.
    pub async fn backup_key(&self, name: &str) -> Result<String> {
        validate_component(name, "name")?;
        let entity = format!("key {name}");
        let response = self
            .call(
                "backup_key",
                &entity,
                Method::GET,
                &self.transit_op_path("backup", name),
                None,
            )
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: entity.clone(),
            })?;
        Ok(required_str("backup_key", &entity, &response, "/data/backup")?.to_string())
    }

    /// Recreate a key from a backup blob under a new name.
    pub async fn restore_key(&self, backup: &str, name: &str) -> Result<()> {
        validate_component(name, "name")?;
        if backup.trim().is_empty() {
            return Err(VaultError::EmptyComponent { field: "backup" });
        }
        let entity = format!("key {name}");
        self.call(
            "restore_key",
            &entity,
            Method::POST,
            &self.transit_op_path("restore", name),
            Some(json!({ "backup": backup })),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl VaultConnector for HashicorpVaultConnector {
    async fn bootstrap(&self) -> bool {
        let url = self.config.api_url("sys/health");
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(endpoint = %self.config.endpoint, "vault health check passed");
                true
            }
            Ok(response) => {
                warn!(
                    endpoint = %self.config.endpoint,
                    status = %response.status(),
                    "vault health check reported an unhealthy status"
                );
                false
            }
            Err(err) => {
                warn!(
                    endpoint = %self.config.endpoint,
                    error = %err,
                    "vault health check failed"
                );
                false
            }
        }
    }

    async fn create_key(&self, name: &str, key_type: VaultKeyType) -> Result<Vec<u8>> {
        validate_component(name, "name")?;
        let backend_type = transit_key_type(key_type)?;
        let entity = format!("key {name}");

        // A readable key already exists; a 404 here is the expected
        // "does not exist" signal.
        if self.read_key("create_key", name).await?.is_some() {
            return Err(VaultError::AlreadyExists { entity });
        }

        // Non-exportable is the backend's default posture; without these
        // flags the key could never be read back or backed up.
        self.call(
            "create_key",
            &entity,
            Method::POST,
            &self.transit_keys_path(name),
            Some(json!({
                "type": backend_type,
                "exportable": true,
                "allow_plaintext_backup": true,
            })),
        )
        .await?;

        debug!(name = %name, key_type = %key_type, "created transit key");

        if key_type.is_asymmetric() {
            let key = self
                .read_key("create_key", name)
                .await?
                .ok_or_else(|| VaultError::backend(
                    "create_key",
                    &entity,
                    "key unreadable right after creation",
                ))?;
            key.public_key("create_key", &entity)
        } else {
            // Transit has no plain read path for symmetric material, only
            // the backup endpoint.
            let backup = self.backup_key(name).await?;
            symmetric_key_from_backup("create_key", &entity, &backup)
        }
    }

    async fn add_key(
        &self,
        _name: &str,
        _key_type: VaultKeyType,
        _private_key: &[u8],
        _public_key: Option<&[u8]>,
    ) -> Result<()> {
        // Transit generates key material internally; importing caller-supplied
        // keys is intentionally unsupported on this connector.
        Err(VaultError::NotSupported { operation: "add_key" })
    }

    async fn get_key(&self, name: &str) -> Result<VaultKey> {
        validate_component(name, "name")?;
        let entity = format!("key {name}");

        let key = self
            .read_key("get_key", name)
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: entity.clone(),
            })?;
        let key_type = key_type_from_transit(&key.key_type)?;

        let public_key = if key_type.is_asymmetric() {
            Some(key.public_key("get_key", &entity)?)
        } else {
            None
        };

        // Not-found was filtered above; anything wrong with the export step
        // is an unexpected backend failure.
        let export = self
            .call(
                "get_key",
                &entity,
                Method::GET,
                &self.transit_export_path(key_type, name),
                None,
            )
            .await?
            .ok_or_else(|| VaultError::backend("get_key", &entity, "export returned no key"))?;
        let exported: ExportKeyData = serde_json::from_value(
            data_field("get_key", &entity, &export)?.clone(),
        )
        .map_err(|err| VaultError::backend("get_key", &entity, err))?;
        let (_, encoded) = exported
            .keys
            .iter()
            .next_back()
            .ok_or_else(|| VaultError::backend("get_key", &entity, "export held no versions"))?;
        let private_key = decode_b64("get_key", &entity, encoded)?;

        Ok(VaultKey::new(key_type, private_key, public_key))
    }

    async fn rename_key(&self, name: &str, new_name: &str) -> Result<()> {
        validate_component(name, "name")?;
        validate_component(new_name, "new name")?;

        // backup -> restore under the new name -> delete the original.
        // Not atomic: failing after the restore leaves both names live.
        self.rename_key_inner(name, new_name)
            .await
            .map_err(|err| VaultError::Backend {
                operation: "rename_key",
                entity: format!("key {name} -> {new_name}"),
                message: err.to_string(),
            })?;

        debug!(from = %name, to = %new_name, "renamed transit key");
        Ok(())
    }

    async fn remove_key(&self, name: &str) -> Result<()> {
        validate_component(name, "name")?;
        if self.read_key("remove_key", name).await?.is_none() {
            return Err(VaultError::NotFound {
                entity: format!("key {name}"),
            });
        }
        self.delete_key("remove_key", name).await?;

        debug!(name = %name, "removed transit key");
        Ok(())
    }

    async fn sign(&self, name: &str, data: &[u8]) -> Result<Vec<u8>> {
        validate_component(name, "name")?;
        let entity = format!("key {name}");

        let response = self
            .call(
                "sign",
                &entity,
                Method::POST,
                &self.transit_op_path("sign", name),
                Some(json!({ "input": STANDARD.encode(data) })),
            )
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: entity.clone(),
            })?;

        let signature = required_str("sign", &entity, &response, "/data/signature")?;
        let encoded = strip_wire_prefix("sign", &entity, signature)?;
        decode_b64("sign", &entity, encoded)
    }

    async fn verify(&self, name: &str, data: &[u8], signature: &[u8]) -> Result<bool> {
        validate_component(name, "name")?;
        let entity = format!("key {name}");

        let response = self
            .call(
                "verify",
                &entity,
                Method::POST,
                &self.transit_op_path("verify", name),
                Some(json!({
                    "input": STANDARD.encode(data),
                    "signature": add_wire_prefix(signature),
                })),
            )
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: entity.clone(),
            })?;

        response
            .pointer("/data/valid")
            .and_then(Value::as_bool)
            .ok_or_else(|| VaultError::backend("verify", &entity, "response missing data.valid"))
    }

    async fn encrypt(
        &self,
        name: &str,
        _encryption_type: VaultEncryptionType,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        validate_component(name, "name")?;
        let entity = format!("key {name}");

        let response = self
            .call(
                "encrypt",
                &entity,
                Method::POST,
                &self.transit_op_path("encrypt", name),
                Some(json!({ "plaintext": STANDARD.encode(data) })),
            )
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: entity.clone(),
            })?;

        // The backend manages nonces internally; its `vault:v1:...` text is
        // the ciphertext, passed through as UTF-8 bytes.
        let ciphertext = required_str("encrypt", &entity, &response, "/data/ciphertext")?;
        Ok(ciphertext.as_bytes().to_vec())
    }

    async fn decrypt(
        &self,
        name: &str,
        _encryption_type: VaultEncryptionType,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        validate_component(name, "name")?;
        let entity = format!("key {name}");

        let ciphertext =
            std::str::from_utf8(ciphertext).map_err(|_| VaultError::InvalidKeyMaterial {
                field: "ciphertext",
                reason: "not valid UTF-8".into(),
            })?;

        let response = self
            .call(
                "decrypt",
                &entity,
                Method::POST,
                &self.transit_op_path("decrypt", name),
                Some(json!({ "ciphertext": ciphertext })),
            )
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: entity.clone(),
            })?;

        let plaintext = required_str("decrypt", &entity, &response, "/data/plaintext")?;
        decode_b64("decrypt", &entity, plaintext)
    }

    async fn set_secret(&self, name: &str, value: &Value) -> Result<()> {
        validate_component(name, "name")?;
        let entity = format!("secret {name}");

        // KV v2 envelope with the value double-encoded as JSON text.
        self.call(
            "set_secret",
            &entity,
            Method::POST,
            &self.kv_data_path(name),
            Some(json!({ "data": { "data": value.to_string() } })),
        )
        .await?;

        debug!(name = %name, "stored secret");
        Ok(())
    }

    async fn get_secret(&self, name: &str) -> Result<Value> {
        // The version probe turns the backend's raw 404 into a clean
        // not-found before the data call.
        self.get_secret_versions(name).await?;
        let entity = format!("secret {name}");

        let response = self
            .call(
                "get_secret",
                &entity,
                Method::GET,
                &self.kv_data_path(name),
                None,
            )
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: entity.clone(),
            })?;

        let text = required_str("get_secret", &entity, &response, "/data/data/data")?;
        serde_json::from_str(text).map_err(|err| VaultError::backend("get_secret", &entity, err))
    }

    async fn remove_secret(&self, name: &str) -> Result<()> {
        self.get_secret_versions(name).await?;
        let entity = format!("secret {name}");

        // Deleting the metadata purges every version.
        self.call(
            "remove_secret",
            &entity,
            Method::DELETE,
            &self.kv_metadata_path(name),
            None,
        )
        .await?;

        debug!(name = %name, "removed secret");
        Ok(())
    }

    async fn get_secret_versions(&self, name: &str) -> Result<Vec<u32>> {
        validate_component(name, "name")?;
        let entity = format!("secret {name}");

        let response = self
            .call(
                "get_secret_versions",
                &entity,
                Method::GET,
                &self.kv_metadata_path(name),
                None,
            )
            .await?
            .ok_or_else(|| VaultError::NotFound {
                entity: entity.clone(),
            })?;

        let data = data_field("get_secret_versions", &entity, &response)?;
        let metadata: KvMetadata = serde_json::from_value(data.clone())
            .map_err(|err| VaultError::backend("get_secret_versions", &entity, err))?;
        let versions = metadata
            .versions
            .ok_or(VaultError::NotFound { entity })?;
        Ok(versions.into_keys().collect())
    }
}

// Wire mapping between the internal key-type enum and Transit's identifiers.

fn transit_key_type(key_type: VaultKeyType) -> Result<&'static str> {
    match key_type {
        VaultKeyType::Ed25519 => Ok("ed25519"),
        VaultKeyType::ChaCha20Poly1305 => Ok("chacha20-poly1305"),
        // Transit has no secp256k1 key type.
        VaultKeyType::Secp256k1 => Err(VaultError::UnsupportedKeyType(key_type.to_string())),
    }
}

fn key_type_from_transit(value: &str) -> Result<VaultKeyType> {
    match value {
        "ed25519" => Ok(VaultKeyType::Ed25519),
        "chacha20-poly1305" => Ok(VaultKeyType::ChaCha20Poly1305),
        other => Err(VaultError::UnsupportedKeyType(other.to_string())),
    }
}

fn export_kind(key_type: VaultKeyType) -> &'static str {
    if key_type.supports_signing() {
        "signing-key"
    } else {
        "encryption-key"
    }
}

fn strip_wire_prefix<'a>(
    operation: &'static str,
    entity: &str,
    value: &'a str,
) -> Result<&'a str> {
    value.strip_prefix(VAULT_WIRE_PREFIX).ok_or_else(|| {
        VaultError::backend(
            operation,
            entity,
            format!("value missing the {VAULT_WIRE_PREFIX} prefix"),
        )
    })
}

fn add_wire_prefix(data: &[u8]) -> String {
    format!("{VAULT_WIRE_PREFIX}{}", STANDARD.encode(data))
}

fn data_field<'a>(operation: &'static str, entity: &str, value: &'a Value) -> Result<&'a Value> {
    value
        .get("data")
        .ok_or_else(|| VaultError::backend(operation, entity, "response missing data"))
}

fn required_str<'a>(
    operation: &'static str,
    entity: &str,
    value: &'a Value,
    pointer: &str,
) -> Result<&'a str> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            VaultError::backend(operation, entity, format!("response missing {pointer}"))
        })
}

fn decode_b64(operation: &'static str, entity: &str, encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(|err| VaultError::backend(operation, entity, err))
}

/// Extract the raw symmetric key from a plaintext backup blob: base64 over a
/// JSON policy document whose `keys` map holds the base64 material per
/// version.
fn symmetric_key_from_backup(
    operation: &'static str,
    entity: &str,
    backup: &str,
) -> Result<Vec<u8>> {
    let decoded = decode_b64(operation, entity, backup.trim_end())?;
    let policy: Value = serde_json::from_slice(&decoded)
        .map_err(|err| VaultError::backend(operation, entity, err))?;
    let keys = policy
        .pointer("/policy/keys")
        .and_then(Value::as_object)
        .ok_or_else(|| VaultError::backend(operation, entity, "backup missing policy.keys"))?;
    let latest = keys
        .keys()
        .filter_map(|version| version.parse::<u32>().ok())
        .max()
        .ok_or_else(|| VaultError::backend(operation, entity, "backup held no key versions"))?;
    let encoded = keys
        .get(&latest.to_string())
        .and_then(|entry| entry.get("key"))
        .and_then(Value::as_str)
        .ok_or_else(|| VaultError::backend(operation, entity, "backup missing key material"))?;
    decode_b64(operation, entity, encoded)
}

/// Transit `keys/{name}` read response body (`data` only).
#[derive(Debug, Deserialize)]
struct TransitKeyData {
    #[serde(rename = "type")]
    key_type: String,
    #[serde(default)]
    latest_version: u32,
    #[serde(default)]
    deletion_allowed: bool,
    #[serde(default)]
    keys: serde_json::Map<String, Value>,
}

impl TransitKeyData {
    /// Public key of the latest version, for asymmetric key types.
    fn public_key(&self, operation: &'static str, entity: &str) -> Result<Vec<u8>> {
        let encoded = self
            .keys
            .get(&self.latest_version.to_string())
            .and_then(|version| version.get("public_key"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                VaultError::backend(operation, entity, "response missing public_key")
            })?;
        decode_b64(operation, entity, encoded)
    }
}

/// Transit `export/.../latest` response body (`data` only).
#[derive(Debug, Deserialize)]
struct ExportKeyData {
    // serde_json parses the numeric string keys.
    #[serde(default)]
    keys: BTreeMap<u32, String>,
}

/// KV v2 `metadata/{name}` response body (`data` only).
#[derive(Debug, Deserialize)]
struct KvMetadata {
    #[serde(default)]
    versions: Option<BTreeMap<u32, Value>>,
}
