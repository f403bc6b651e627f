use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LINK, USER_AGENT};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::pagination::next_link;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub caps `per_page` at 100, so that is what we ask for
pub const STARRED_PER_PAGE: u32 = 100;

/// Knobs for the client, usually filled in from the config file
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub token: Option<String>,
    pub per_page: u32,
    /// Follow `rel="next"` links instead of stopping at the first page
    pub follow_pagination: bool,
    pub max_pages: u32,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            token: None,
            per_page: STARRED_PER_PAGE,
            follow_pagination: false,
            max_pages: 10,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    options: ClientOptions,
}

/// One decoded response plus where to go next, if anywhere
struct Page<T> {
    body: T,
    next: Option<String>,
}

impl GitHubClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE.to_string(), options)
    }

    /// For GitHub Enterprise or a mock server in tests
    pub fn with_base_url(base_url: String, options: ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Stargazer/0.1.0"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            options,
        })
    }

    /// GET /users/{username}
    pub async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        let url = self.endpoint(username, "")?;
        let page = self.get_json::<GitHubUser>(url).await?;
        Ok(page.body)
    }

    /// GET /users/{username}/starred
    ///
    /// Stops after the first page unless `follow_pagination` is set, in
    /// which case it keeps walking `next` links up to `max_pages`.
    pub async fn fetch_starred_repositories(&self, username: &str) -> Result<Vec<GitHubRepo>> {
        let mut url = self.endpoint(username, "/starred")?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.options.per_page.clamp(1, 100).to_string());

        let mut repos = Vec::new();
        let mut pages = 0;

        loop {
            let page = self.get_json::<Vec<GitHubRepo>>(url).await?;
            pages += 1;
            repos.extend(page.body);

            let Some(next) = page.next else { break };
            if !self.options.follow_pagination {
                debug!("More starred repos available for {}, not following", username);
                break;
            }
            if pages >= self.options.max_pages {
                debug!("Stopping after {} pages for {}", pages, username);
                break;
            }

            url = Url::parse(&next).map_err(|e| FetchError::BadUrl(format!("{}: {}", next, e)))?;
        }

        debug!("Fetched {} starred repos for {} ({} pages)", repos.len(), username, pages);
        Ok(repos)
    }

    fn endpoint(&self, username: &str, suffix: &str) -> Result<Url> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FetchError::BadUrl("empty username".to_string()));
        }

        let raw = format!(
            "{}/users/{}{}",
            self.base_url,
            urlencoding::encode(username),
            suffix
        );
        Url::parse(&raw).map_err(|e| FetchError::BadUrl(format!("{}: {}", raw, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Page<T>> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(ref token) = self.options.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link);

        let text = response.text().await?;
        let body = serde_json::from_str(&text)?;

        Ok(Page { body, next })
    }
}

/// GitHub user profile, as returned by /users/{username}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Starred repository as returned by /users/{username}/starred
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Left as the raw ISO-8601 string; ordering is lexicographic
    pub updated_at: String,
}
