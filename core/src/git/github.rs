use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const ISSUES_PER_PAGE: &str = "20";
const PULLS_PER_PAGE: &str = "5";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub login: String,
}

/// An issue or pull request as returned by the REST API. Only the fields
/// shown on the dashboard are kept.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GithubItem {
    pub number: u64,
    pub title: String,
    pub user: Option<User>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl GithubItem {
    pub fn author(&self) -> &str {
        self.user.as_ref().map(|u| u.login.as_str()).unwrap_or("")
    }
}

pub trait IssueSource {
    /// Most recent issues, without the ones that are pull requests.
    fn issues(&self, owner: &str, repo: &str) -> Result<Vec<GithubItem>>;
    fn pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<GithubItem>>;
}

pub struct GithubClient {
    http: Client,
    token: String,
    base_url: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("termitask/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building github client")?;
        Ok(Self {
            http,
            token: token.into(),
            base_url: DEFAULT_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "github request");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .query(query)
            .send()
            .with_context(|| format!("requesting {}", url))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(anyhow!("{} returned {}: {}", url, status, body.trim()));
        }
        resp.json().with_context(|| format!("decoding response of {}", url))
    }
}

impl IssueSource for GithubClient {
    fn issues(&self, owner: &str, repo: &str) -> Result<Vec<GithubItem>> {
        let items: Vec<GithubItem> = self.get_json(
            &format!("/repos/{}/{}/issues", owner, repo),
            &[("sort", "created"), ("page", "1"), ("per_page", ISSUES_PER_PAGE)],
        )?;
        Ok(without_pull_requests(items))
    }

    fn pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<GithubItem>> {
        self.get_json(
            &format!("/repos/{}/{}/pulls", owner, repo),
            &[("page", "1"), ("per_page", PULLS_PER_PAGE)],
        )
    }
}

pub fn without_pull_requests(items: Vec<GithubItem>) -> Vec<GithubItem> {
    items.into_iter().filter(|i| i.pull_request.is_none()).collect()
}
