//! Client for the RapidAPI "fresh LinkedIn profile data" endpoints.
//!
//! Fetches a creator's profile and recent posts, classifies failures as
//! transient or permanent, and retries transient ones with back-off.

pub mod client;
pub mod error;
pub mod source;
pub mod time;
pub mod types;

pub use client::LinkedinClient;
pub use error::FetchError;
pub use source::CreatorSource;
pub use time::{parse_post_timestamp, parse_relative_time};
