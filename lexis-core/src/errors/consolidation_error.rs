/// Consolidation-pass errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsolidationError {
    #[error("consolidation already in progress")]
    AlreadyRunning,
}
