// SQLite-backed local state
// Bookmarks and reviews live here; everything else is re-fetched per request

pub mod store;

pub use store::{Bookmark, LocalStore, Review, ReviewStats, StoreError};
