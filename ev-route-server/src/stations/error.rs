//! Station inventory error types.

/// Errors that can occur when loading the station inventory.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Inventory file could not be read
    #[error("failed to read inventory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Inventory file is not valid JSON
    #[error("JSON parse error in {path}: {message}")]
    Json { path: String, message: String },
}
