/// Registry-layer errors for tag and alias operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("empty normalized key is not a usable tag")]
    EmptyKey,

    #[error("variant '{variant}' is already aliased to '{existing}', refusing re-alias to '{requested}'")]
    AliasConflict {
        variant: String,
        existing: String,
        requested: String,
    },
}
