// GitHub provider implementation - bridges API client with StarsProvider trait
use async_trait::async_trait;
use stargazer_api::{FetchError, GitHubClient, GitHubRepo, GitHubUser};

use crate::{
    config::GitHubConfig,
    models::{Repository, User},
    providers::StarsProvider,
    Result,
};

/// Wrapper around GitHubClient that implements StarsProvider
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        let client = GitHubClient::with_base_url(config.api_url.clone(), config.client_options())?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StarsProvider for GitHubProvider {
    async fn fetch_user(&self, username: &str) -> std::result::Result<User, FetchError> {
        let user = self.client.fetch_user(username).await?;
        Ok(github_to_user(user))
    }

    async fn fetch_starred_repositories(
        &self,
        username: &str,
    ) -> std::result::Result<Vec<Repository>, FetchError> {
        let repos = self.client.fetch_starred_repositories(username).await?;
        Ok(repos.into_iter().map(github_to_repo).collect())
    }
}

/// Convert GitHub API user to our internal User model
fn github_to_user(gh: GitHubUser) -> User {
    User {
        login: gh.login,
        name: gh.name,
        avatar_url: gh.avatar_url,
        bio: gh.bio,
    }
}

/// Convert GitHub API repo to our internal Repository model
fn github_to_repo(gh: GitHubRepo) -> Repository {
    Repository {
        id: gh.id,
        name: gh.name,
        description: gh.description,
        url: gh.html_url,
        language: gh.language,
        stars: gh.stargazers_count,
        topics: gh.topics,
        updated_at: gh.updated_at,
    }
}
