pub mod detail;
pub mod http;
pub mod listing;
pub mod normalize;
pub mod traits;
pub mod types;

pub use http::HttpFetcher;
