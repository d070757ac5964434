//! Error taxonomy: one enum per domain, one umbrella for crate boundaries.

mod collaborator_error;
mod config_error;
mod consolidation_error;
mod registry_error;
mod storage_error;

pub use collaborator_error::CollaboratorError;
pub use config_error::ConfigError;
pub use consolidation_error::ConsolidationError;
pub use registry_error::RegistryError;
pub use storage_error::StorageError;

/// Umbrella error for all lexis subsystems.
#[derive(Debug, thiserror::Error)]
pub enum LexisError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Consolidation(#[from] ConsolidationError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience result alias used across the workspace.
pub type LexisResult<T> = Result<T, LexisError>;
