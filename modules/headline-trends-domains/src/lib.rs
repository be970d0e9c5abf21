pub mod cache;
pub mod headlines;

pub use cache::CachedHeadlineSearch;
pub use headlines::PgHeadlineSearch;
