// Where users and their stars come from
pub mod github;

pub use github::GitHubProvider;

use async_trait::async_trait;
use stargazer_api::FetchError;

use crate::models::{Repository, User};

/// The two fetches the engine needs, behind a trait so the session can be
/// driven by GitHub in production and by fakes in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StarsProvider: Send + Sync {
    async fn fetch_user(&self, username: &str) -> Result<User, FetchError>;

    async fn fetch_starred_repositories(&self, username: &str)
        -> Result<Vec<Repository>, FetchError>;
}
