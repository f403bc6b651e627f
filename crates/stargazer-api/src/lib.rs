// GitHub API client for the two endpoints stargazer needs
pub mod error;
pub mod github;
pub mod pagination;

// Re-export common types
pub use error::{FetchError, Result};
pub use github::{ClientOptions, GitHubClient, GitHubRepo, GitHubUser, STARRED_PER_PAGE};
