use async_trait::async_trait;
use phase10_types::StoreState;
use thiserror::Error;
use tracing::debug;

/// Key the whole store is written under.
pub const DEFAULT_STORAGE_KEY: &str = "phase10-storage";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot '{key}' could not be decoded: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
    #[error("snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("snapshot storage failed: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Durable key-value storage holding one opaque document per key.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    async fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn save(&self, key: &str, document: &str) -> anyhow::Result<()>;
}

pub fn encode_state(state: &StoreState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

pub fn decode_state(key: &str, document: &str) -> Result<StoreState, SnapshotError> {
    serde_json::from_str(document).map_err(|source| SnapshotError::Corrupt {
        key: key.to_string(),
        source,
    })
}

/// Reads the snapshot under `key`, or an empty store if none was written yet.
pub async fn load_state<S>(storage: &S, key: &str) -> Result<StoreState, SnapshotError>
where
    S: SnapshotStorage + ?Sized,
{
    match storage.load(key).await? {
        Some(document) => decode_state(key, &document),
        None => {
            debug!("No snapshot under '{}', starting empty", key);
            Ok(StoreState::default())
        }
    }
}

pub async fn save_state<S>(storage: &S, key: &str, state: &StoreState) -> Result<(), SnapshotError>
where
    S: SnapshotStorage + ?Sized,
{
    let document = encode_state(state)?;
    storage.save(key, &document).await?;
    Ok(())
}
