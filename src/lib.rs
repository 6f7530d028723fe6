//! Callibri call statistics loader.
//!
//! Pulls per-site call statistics from the Callibri API for a date range, flattens the
//! per-channel call lists and stores a batch of calls in Postgres inside one transaction.

pub mod callibri_types;
pub mod config;
pub mod db_types;
pub mod error;
pub mod fetcher;
pub mod repository;
pub mod throttle;
pub mod types;
pub mod utils;

pub use callibri_types::{CallRecord, Site};
pub use config::Config;
pub use error::{FetchError, StorageError};
pub use fetcher::StatisticsFetcher;
pub use repository::CallRepository;
pub use throttle::{Sleeper, TokioSleeper};
pub use types::DateRange;

pub mod consts {
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "https://api.callibri.ru";
    pub const GET_SITES_ENDPOINT: &str = "get_sites";
    pub const SITE_STATISTICS_ENDPOINT: &str = "site_get_statistics";
    pub const HTTP_CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Spacing imposed before every "safe" request.
    pub const REQUEST_DELAY: Duration = Duration::from_micros(1_000_000);
    pub const STATUS_OK: i64 = 200;
    /// Longest range the API documents support for.
    pub const MAX_RANGE_DAYS: i64 = 7;
    pub const SAVE_SUCCESS_MESSAGE: &str = "Successfully saved!";
}
