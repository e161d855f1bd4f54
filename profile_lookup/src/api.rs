use async_trait::async_trait;
use derive_more::Constructor;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Please enter a GitHub username")]
    EmptyUsername,
    #[error("User not found")]
    UserNotFound,
    #[error("API rate limit exceeded, resets at {}", .reset.as_deref().unwrap_or("an unknown time"))]
    RateLimited { reset: Option<String> },
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
    /// Shown with its whole chain of causes.
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Order of the repository listing, as understood by `GET /users/{username}/repos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RepoSort {
    Created,
    Updated,
    Pushed,
    FullName,
}

impl Default for RepoSort {
    fn default() -> Self {
        RepoSort::Pushed
    }
}

/// Public attributes of a user account. Every field may be missing from the API response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub public_repos: Option<u32>,
    pub followers: Option<u32>,
    pub following: Option<u32>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct RepoSummary {
    pub name: String,
    pub html_url: String,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub language: Option<String>,
}

#[async_trait]
pub trait Client: Send + Sync {
    /// Fetches the profile of `username`.
    async fn user(&self, username: &str) -> Result<UserProfile>;

    /// Fetches the first page (`per_page` items) of repositories owned by `username`.
    async fn repos(&self, username: &str, sort: RepoSort, per_page: u32) -> Result<Vec<RepoSummary>>;
}

#[test]
fn repo_sort_query_values_test() {
    use std::str::FromStr;

    assert_eq!(RepoSort::default(), RepoSort::Pushed);
    assert_eq!(RepoSort::Pushed.to_string(), "pushed");
    assert_eq!(RepoSort::FullName.to_string(), "full_name");
    assert_eq!(RepoSort::from_str("updated").unwrap(), RepoSort::Updated);
    assert!(RepoSort::from_str("stars").is_err());
}

#[test]
fn other_message_keeps_causes_test() {
    use anyhow::Context;

    let err: Error = "12x"
        .parse::<u32>()
        .context("Failed to read count")
        .unwrap_err()
        .into();
    assert_eq!(err.to_string(), "Failed to read count: invalid digit found in string");
}

#[test]
fn rate_limited_message_test() {
    let err = Error::RateLimited {
        reset: Some("12:00:00 UTC".to_string()),
    };
    assert_eq!(err.to_string(), "API rate limit exceeded, resets at 12:00:00 UTC");
    let err = Error::RateLimited { reset: None };
    assert_eq!(err.to_string(), "API rate limit exceeded, resets at an unknown time");
}
