use serde::{Deserialize, Serialize};

use crate::constants;

/// Collaborator endpoints and batching for the sync runner.
///
/// Tokens are normally supplied via `LEXIS_BOOKMARKS_TOKEN` /
/// `LEXIS_SUGGESTER_TOKEN` rather than the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL of the bookmark store API.
    pub bookmarks_url: String,
    /// Bearer token for the bookmark store.
    pub bookmarks_token: String,
    /// Base URL of the tag suggester API.
    pub suggester_url: String,
    /// Bearer token for the tag suggester.
    pub suggester_token: String,
    /// Unique tags per suggester grouping call.
    pub batch_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            bookmarks_url: String::new(),
            bookmarks_token: String::new(),
            suggester_url: String::new(),
            suggester_token: String::new(),
            batch_size: constants::DEFAULT_BATCH_SIZE,
        }
    }
}
