/// Storage-layer errors for snapshot and history files.
///
/// Absence of a prior snapshot is not an error; loads bootstrap empty state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry snapshot at {path} is corrupt: {reason}")]
    SnapshotCorrupt { path: String, reason: String },

    #[error("metrics history at {path} is corrupt: {reason}")]
    HistoryCorrupt { path: String, reason: String },
}
