//! Rate-limit-friendly GitHub REST client.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, LINK};
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;
use tracing::{debug, instrument};
use url::Url;

use repolens_shared::{ContributorCount, GithubConfig, RepolensError, Result};

use crate::resolver::RepoRef;
use crate::response::RepoResponse;

/// Maximum number of redirects to follow (renamed repositories answer 301).
const MAX_REDIRECTS: usize = 5;

/// Matches the `rel="last"` target of a `Link` header.
static LAST_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="last""#).expect("last link regex"));

/// A successful response, fully read while the request slot was held.
struct Fetched {
    status: StatusCode,
    link: Option<String>,
    body: String,
}

/// Read-only client for the repository endpoints.
///
/// Every request holds the single permit of `gate` from send until the body
/// is read, so no two requests are ever in flight.
#[derive(Debug)]
pub struct GithubClient {
    client: Client,
    api_base: Url,
    gate: Semaphore,
}

impl GithubClient {
    /// Build a client sending the configured `User-Agent` and `Accept` headers.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base).map_err(|e| {
            RepolensError::config(format!("invalid API base '{}': {e}", config.api_base))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(RepolensError::config(format!(
                "API base '{api_base}' cannot carry a path"
            )));
        }

        if config.timeout_secs == 0 {
            return Err(RepolensError::config("timeout_secs must be at least 1"));
        }

        let accept = HeaderValue::from_str(&config.accept).map_err(|e| {
            RepolensError::config(format!("invalid Accept header '{}': {e}", config.accept))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, accept);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RepolensError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base,
            gate: Semaphore::new(1),
        })
    }

    /// `GET /repos/{owner}/{repo}`.
    #[instrument(skip_all, fields(repo = %repo))]
    pub async fn fetch_repo(&self, repo: &RepoRef) -> Result<RepoResponse> {
        let url = self.endpoint(&["repos", &repo.owner, &repo.repo])?;
        let fetched = self.get(url).await?;

        serde_json::from_str(&fetched.body)
            .map_err(|e| RepolensError::parse(format!("repository payload for {repo}: {e}")))
    }

    /// Contributor count from `GET /repos/{owner}/{repo}/contributors?per_page=1`.
    ///
    /// [`ContributorCount::FirstPage`] returns the length of that page (0 or 1).
    /// [`ContributorCount::Exact`] reads the last page number from the `Link`
    /// header, which equals the total when pages hold one entry.
    #[instrument(skip_all, fields(repo = %repo, mode = %mode))]
    pub async fn fetch_contributor_count(
        &self,
        repo: &RepoRef,
        mode: ContributorCount,
    ) -> Result<u64> {
        let mut url = self.endpoint(&["repos", &repo.owner, &repo.repo, "contributors"])?;
        url.query_pairs_mut().append_pair("per_page", "1");

        let fetched = self.get(url).await?;
        if fetched.status == StatusCode::NO_CONTENT {
            return Ok(0);
        }

        if mode == ContributorCount::Exact {
            if let Some(total) = fetched.link.as_deref().and_then(last_page) {
                return Ok(total);
            }
        }

        let page: serde_json::Value = serde_json::from_str(&fetched.body)
            .map_err(|e| RepolensError::parse(format!("contributors payload for {repo}: {e}")))?;

        Ok(page.as_array().map_or(0, |entries| entries.len() as u64))
    }

    /// `api_base` with `segments` appended as escaped path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RepolensError::config(format!("API base '{}' cannot carry a path", self.api_base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue one GET and read the whole body, failing on non-2xx.
    async fn get(&self, url: Url) -> Result<Fetched> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| RepolensError::Network(format!("request gate closed: {e}")))?;

        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RepolensError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response
            .text()
            .await
            .map_err(|e| RepolensError::Network(format!("{url}: failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(RepolensError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Fetched { status, link, body })
    }
}

/// Page number of the `rel="last"` link, if any.
fn last_page(link_header: &str) -> Option<u64> {
    let caps = LAST_LINK_RE.captures(link_header)?;
    let target = Url::parse(caps.get(1)?.as_str()).ok()?;
    target
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}
