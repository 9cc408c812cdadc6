//! Abstraction over where creator data comes from.

use std::future::Future;

use creatorfit_core::{Post, Profile};

use crate::error::FetchError;

/// A source of creator profiles and posts.
///
/// [`crate::LinkedinClient`] is the production implementation; analysis code
/// takes any `CreatorSource` so it can run against fixtures.
pub trait CreatorSource: Send + Sync {
    /// Fetch the profile for `linkedin_url`.
    fn fetch_profile(
        &self,
        linkedin_url: &str,
    ) -> impl Future<Output = Result<Profile, FetchError>> + Send;

    /// Fetch the creator's recent posts, newest first as the API returns them.
    fn fetch_posts(
        &self,
        linkedin_url: &str,
    ) -> impl Future<Output = Result<Vec<Post>, FetchError>> + Send;
}
