// Service exports
pub mod cache;
pub mod listing;
pub mod sessions;

pub use cache::{CacheError, CacheKey, CacheStats, CatalogCache};
pub use listing::{ListingClient, ListingError};
pub use sessions::{QuizSession, SessionStore, SharedSession};
