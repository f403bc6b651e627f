// Integration tests for `GitHubClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stargazer_api::{ClientOptions, FetchError, GitHubClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(options: ClientOptions) -> (MockServer, GitHubClient) {
    let server = MockServer::start().await;
    let client = GitHubClient::with_base_url(server.uri(), options).unwrap();
    (server, client)
}

fn repo_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "html_url": format!("https://github.com/someone/{}", name),
        "language": "Rust",
        "stargazers_count": id * 10,
        "topics": ["cli"],
        "updated_at": "2024-05-01T12:00:00Z"
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_user() {
    let (server, client) = setup(ClientOptions::default()).await;

    Mock::given(method("GET"))
        .and(path("/users/torvalds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "torvalds",
            "name": "Linus Torvalds",
            "avatar_url": "https://avatars.githubusercontent.com/u/1024025",
            "bio": null,
            "followers": 200000
        })))
        .mount(&server)
        .await;

    let user = client.fetch_user("torvalds").await.unwrap();

    assert_eq!(user.login, "torvalds");
    assert_eq!(user.name.as_deref(), Some("Linus Torvalds"));
    assert!(user.bio.is_none());
}

#[tokio::test]
async fn test_fetch_starred_requests_a_full_page() {
    let (server, client) = setup(ClientOptions::default()).await;

    Mock::given(method("GET"))
        .and(path("/users/alice/starred"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([repo_json(1, "one"), repo_json(2, "two")])),
        )
        .mount(&server)
        .await;

    let repos = client.fetch_starred_repositories("alice").await.unwrap();

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "one");
    assert_eq!(repos[1].stargazers_count, 20);
    assert_eq!(repos[1].topics, vec!["cli".to_string()]);
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let options = ClientOptions {
        token: Some("ghp_secret".to_string()),
        ..ClientOptions::default()
    };
    let (server, client) = setup(options).await;

    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .and(header("authorization", "Bearer ghp_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "alice",
            "name": null,
            "avatar_url": "https://example.com/a.png"
        })))
        .mount(&server)
        .await;

    let user = client.fetch_user("alice").await.unwrap();
    assert_eq!(user.login, "alice");
}

// ── Pagination ──────────────────────────────────────────────────────

async fn mount_two_pages(server: &MockServer) {
    let next = format!("<{}/users/alice/starred?per_page=100&page=2>; rel=\"next\"", server.uri());

    Mock::given(method("GET"))
        .and(path("/users/alice/starred"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_json(3, "three")])))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/alice/starred"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next.as_str())
                .set_body_json(json!([repo_json(1, "one"), repo_json(2, "two")])),
        )
        .with_priority(2)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_page_by_default() {
    let (server, client) = setup(ClientOptions::default()).await;
    mount_two_pages(&server).await;

    let repos = client.fetch_starred_repositories("alice").await.unwrap();
    assert_eq!(repos.len(), 2);
}

#[tokio::test]
async fn test_follows_next_links_when_enabled() {
    let options = ClientOptions {
        follow_pagination: true,
        ..ClientOptions::default()
    };
    let (server, client) = setup(options).await;
    mount_two_pages(&server).await;

    let repos = client.fetch_starred_repositories("alice").await.unwrap();
    let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_max_pages_caps_the_walk() {
    let options = ClientOptions {
        follow_pagination: true,
        max_pages: 1,
        ..ClientOptions::default()
    };
    let (server, client) = setup(options).await;
    mount_two_pages(&server).await;

    let repos = client.fetch_starred_repositories("alice").await.unwrap();
    assert_eq!(repos.len(), 2);
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_is_bad_status() {
    let (server, client) = setup(ClientOptions::default()).await;

    Mock::given(method("GET"))
        .and(path("/users/ghost/starred"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let err = client.fetch_starred_repositories("ghost").await.unwrap_err();
    assert_eq!(err, FetchError::BadStatus(404));
}

#[tokio::test]
async fn test_malformed_body_is_bad_body() {
    let (server, client) = setup(ClientOptions::default()).await;

    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": 42})))
        .mount(&server)
        .await;

    let err = client.fetch_user("alice").await.unwrap_err();
    assert!(matches!(err, FetchError::BadBody(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let options = ClientOptions {
        timeout: Duration::from_millis(100),
        ..ClientOptions::default()
    };
    let (server, client) = setup(options).await;

    Mock::given(method("GET"))
        .and(path("/users/slowpoke"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({"login": "slowpoke", "avatar_url": "x"})),
        )
        .mount(&server)
        .await;

    let err = client.fetch_user("slowpoke").await.unwrap_err();
    assert_eq!(err, FetchError::Timeout);
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client =
        GitHubClient::with_base_url("http://127.0.0.1:9".to_string(), ClientOptions::default())
            .unwrap();

    let err = client.fetch_user("anyone").await.unwrap_err();
    assert!(matches!(err, FetchError::NetworkError(_)), "got {:?}", err);
}
