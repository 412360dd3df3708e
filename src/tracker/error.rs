use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't resolve address: {0}")]
    AddressResolution(String),

    #[error("timeout")]
    Timeout,

    #[error("response too short: expected {expected} bytes, got {actual}")]
    ShortResponse { expected: usize, actual: usize },

    #[error("unexpected response {0}")]
    ProtocolMismatch(Mismatch),

    #[error("tracker returned error: {0}")]
    Tracker(String),

    #[error("session uninitialized")]
    Uninitialized,

    #[error("malformed info hash: {0:?}")]
    MalformedHash(String),
}

/// The response field that did not match the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("action: expected {expected}, got {actual}")]
    Action { expected: u32, actual: u32 },

    #[error("transaction id: expected {expected:#010x}, got {actual:#010x}")]
    Transaction { expected: u32, actual: u32 },
}
