pub mod calendar;
pub mod config;
pub mod error;
pub mod file_config;
pub mod gap_fill;
pub mod occurrences;
pub mod sampler;
pub mod search;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod types;

pub use calendar::YearMonth;
pub use config::AppConfig;
pub use error::{TrendsError, TrendsResult};
pub use file_config::{CacheConfig, FileConfig, RateLimitConfig, ServerConfig};
pub use gap_fill::gap_fill;
pub use occurrences::build_occurrence_series;
pub use sampler::{sample_headlines, SAMPLE_CAP};
pub use search::HeadlineSearch;
pub use types::*;
