//! Web-search provider adapters.

pub mod google;
pub mod mock;

pub use google::{GoogleSearchConfig, GoogleSearchProvider};
pub use mock::StaticSearchProvider;
