//! Collaborator boundary traits. Mocks implement these in tests; the CLI
//! crate provides the HTTP implementations.

mod item_store;
mod suggester;

pub use item_store::IBookmarkStore;
pub use suggester::ITagSuggester;
