//! HTTP implementations of the collaborator traits.
//!
//! Thin, single-request clients: retry/backoff and pagination policy are
//! deliberately out of scope for the engine and stay with the services.

mod bookmarks;
mod suggester;

pub use bookmarks::HttpBookmarkStore;
pub use suggester::HttpTagSuggester;

use lexis_core::errors::CollaboratorError;

pub(crate) fn network(err: reqwest::Error) -> CollaboratorError {
    CollaboratorError::Network {
        reason: err.to_string(),
    }
}
