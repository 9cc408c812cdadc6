//! Profile API response envelopes.
//!
//! Both endpoints wrap their payload as `{"data": ...}`. A missing or `null`
//! `data` deserializes to `None`; callers decide whether that is an error.

use serde::Deserialize;

use creatorfit_core::{Post, Profile};

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// `GET /get-linkedin-profile` response.
pub type ProfileResponse = DataEnvelope<Profile>;

/// `GET /get-profile-posts` response.
pub type PostsResponse = DataEnvelope<Vec<Post>>;
