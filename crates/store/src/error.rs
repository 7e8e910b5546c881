#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Stored value under '{key}' could not be parsed: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("Store lock poisoned")]
    Poisoned,
}
