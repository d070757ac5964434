use crate::errors::LexisResult;
use crate::models::Bookmark;

/// External bookmark store. Supplies items and accepts tag updates.
pub trait IBookmarkStore: Send + Sync {
    /// Fetch all bookmarks visible to this client.
    fn fetch_all(&self) -> LexisResult<Vec<Bookmark>>;

    /// Replace the tag list of one bookmark.
    fn set_tags(&self, id: &str, tags: &[String]) -> LexisResult<()>;
}
