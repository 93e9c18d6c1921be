//! Errors raised by the client-side state layer.

/// Failure while reading or writing persisted client state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("stored session is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),
}
