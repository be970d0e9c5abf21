pub mod error;
pub mod query;
pub mod rate_limit;
pub mod routes;

pub use error::ApiError;
pub use query::QueryParams;
pub use rate_limit::RateLimiter;
pub use routes::{build_router, AppState};
