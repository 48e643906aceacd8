use crate::config::ProofConfig;
use crate::services::proof_verifier::{ProofChecker, ProofError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
    #[serde(default)]
    includes: Includes,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    #[serde(default)]
    author_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    username: String,
}

impl SearchResponse {
    /// Username of the tweet's author, from the `author_id` expansion
    fn author_of(&self, tweet: &Tweet) -> Option<&str> {
        let author_id = tweet.author_id.as_deref()?;
        self.includes
            .users
            .iter()
            .find(|user| user.id == author_id)
            .map(|user| user.username.as_str())
    }
}

/// Proof checker backed by the X (Twitter) v2 recent search API
pub struct TwitterProofChecker {
    client: Client,
    config: ProofConfig,
}

impl TwitterProofChecker {
    /// Create a new checker
    pub fn new(config: ProofConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn has_token(&self) -> bool {
        self.config.bearer_token.is_some()
    }
}

fn bare_handle(handle: &str) -> &str {
    handle.trim().trim_start_matches('@')
}

/// Search query for posts by `handle` containing every tag
pub fn build_query(handle: &str, tags: &[String]) -> String {
    let mut query = format!("from:{}", bare_handle(handle));
    for tag in tags {
        query.push(' ');
        query.push_str(tag.trim());
    }
    query
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `text` carries every required tag as a whole token (case-insensitive).
/// `#evt1` is not satisfied by `#evt10`.
pub fn post_qualifies(text: &str, tags: &[String]) -> bool {
    let text = text.to_lowercase();
    tags.iter().all(|tag| {
        let tag = tag.trim().to_lowercase();
        !tag.is_empty()
            && text.match_indices(&tag).any(|(start, _)| {
                !text[start + tag.len()..]
                    .chars()
                    .next()
                    .is_some_and(is_tag_char)
            })
    })
}

#[async_trait]
impl ProofChecker for TwitterProofChecker {
    async fn check_proof(&self, handle: &str, required_tags: &[String]) -> Result<bool, ProofError> {
        let token = self.config.bearer_token.as_deref().ok_or_else(|| {
            ProofError::NotConfigured("TWITTER_BEARER_TOKEN is not set".to_string())
        })?;

        let query = build_query(handle, required_tags);
        let max_results = self.config.max_results.to_string();
        debug!("Searching recent posts: {}", query);

        let response = self
            .client
            .get(format!("{}/tweets/search/recent", self.config.api_url))
            .bearer_auth(token)
            .query(&[
                ("query", query.as_str()),
                ("max_results", max_results.as_str()),
                ("tweet.fields", "text,author_id"),
                ("expansions", "author_id"),
                ("user.fields", "username"),
            ])
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .send()
            .await
            .map_err(|e| ProofError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Recent search returned {}: {}", status, body);
            return Err(ProofError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProofError::Malformed(e.to_string()))?;

        let expected_author = bare_handle(handle);
        let qualifying = result.data.iter().find(|tweet| {
            let by_handle = result
                .author_of(tweet)
                .is_some_and(|author| author.eq_ignore_ascii_case(expected_author));
            by_handle && post_qualifies(&tweet.text, required_tags)
        });

        match qualifying {
            Some(tweet) => debug!("Post {} qualifies for {}", tweet.id, handle),
            None => debug!(
                "None of {} post(s) by {} qualifies",
                result.data.len(),
                expected_author
            ),
        }

        Ok(qualifying.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    const TOKEN: &str = "test-token";

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    /// Serve `app` on an ephemeral local port and return its base URL
    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn checker(api_url: String) -> TwitterProofChecker {
        TwitterProofChecker::new(ProofConfig {
            api_url,
            bearer_token: Some(TOKEN.to_string()),
            timeout_ms: 2000,
            max_results: 10,
        })
    }

    /// Search endpoint returning one post by `alice` and one by `mallory`,
    /// both tagged `#evt1`. Requires the bearer token and the author expansion.
    async fn search(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer test-token");
        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "title": "Unauthorized" })));
        }
        if params.get("expansions").map(String::as_str) != Some("author_id") {
            return (StatusCode::OK, Json(json!({ "meta": { "result_count": 0 } })));
        }

        let query = params.get("query").cloned().unwrap_or_default().to_lowercase();
        let data = if query.starts_with("from:alice ") {
            json!([{ "id": "1", "text": "Minting at #evt1 today", "author_id": "100" }])
        } else {
            json!([{ "id": "2", "text": "Not mine but #evt1", "author_id": "200" }])
        };

        (
            StatusCode::OK,
            Json(json!({
                "data": data,
                "includes": { "users": [
                    { "id": "100", "username": "alice" },
                    { "id": "200", "username": "mallory" }
                ]}
            })),
        )
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            build_query("@alice", &tags(&["#evt1", "@sherry"])),
            "from:alice #evt1 @sherry"
        );
        assert_eq!(build_query("alice", &[]), "from:alice");
    }

    #[test]
    fn test_post_qualifies_requires_every_tag() {
        let required = tags(&["#EVT1", "@sherry"]);
        assert!(post_qualifies("Minting at #evt1 with @Sherry!", &required));
        assert!(!post_qualifies("Minting at #evt1", &required));

        assert!(!post_qualifies("join #evt10", &tags(&["#evt1"])));
        assert!(!post_qualifies("hi @sherry_fan", &tags(&["@sherry"])));
        assert!(post_qualifies("#evt10 and then #evt1.", &tags(&["#evt1"])));
    }

    #[test]
    fn test_search_response_without_data() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"meta":{"result_count":0}}"#).unwrap();
        assert!(parsed.data.is_empty());
        assert!(parsed.includes.users.is_empty());
    }

    #[test]
    fn test_missing_token_is_not_configured() {
        let checker = TwitterProofChecker::new(ProofConfig::default());
        assert!(!checker.has_token());

        let result = tokio_test::block_on(checker.check_proof("alice", &tags(&["#evt1"])));
        assert!(matches!(result, Err(ProofError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_check_proof_finds_own_post() {
        let url = serve(Router::new().route("/tweets/search/recent", get(search))).await;

        let verdict = checker(url).check_proof("@Alice", &tags(&["#evt1"])).await;
        assert!(matches!(verdict, Ok(true)));
    }

    #[tokio::test]
    async fn test_check_proof_ignores_posts_by_others() {
        let url = serve(Router::new().route("/tweets/search/recent", get(search))).await;

        let verdict = checker(url).check_proof("bob", &tags(&["#evt1"])).await;
        assert!(matches!(verdict, Ok(false)));
    }

    #[tokio::test]
    async fn test_check_proof_without_tag_match() {
        let url = serve(Router::new().route("/tweets/search/recent", get(search))).await;

        let verdict = checker(url).check_proof("alice", &tags(&["#evt2"])).await;
        assert!(matches!(verdict, Ok(false)));
    }

    #[tokio::test]
    async fn test_check_proof_sends_bearer_token() {
        let url = serve(Router::new().route("/tweets/search/recent", get(search))).await;
        let mut config = checker(url).config;
        config.bearer_token = Some("wrong".to_string());

        let result = TwitterProofChecker::new(config)
            .check_proof("alice", &tags(&["#evt1"]))
            .await;
        assert!(matches!(result, Err(ProofError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_check_proof_error_status() {
        let app = Router::new().route(
            "/tweets/search/recent",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests") }),
        );
        let url = serve(app).await;

        let result = checker(url).check_proof("alice", &tags(&["#evt1"])).await;
        match result {
            Err(ProofError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "Too Many Requests");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_check_proof_malformed_body() {
        let app = Router::new().route("/tweets/search/recent", get(|| async { "not json" }));
        let url = serve(app).await;

        let result = checker(url).check_proof("alice", &tags(&["#evt1"])).await;
        assert!(matches!(result, Err(ProofError::Malformed(_))));
    }
}
