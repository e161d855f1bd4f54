mod builder;
mod payload;
mod ratelimit;

pub use builder::{GithubClientBuilder, DEFAULT_USER_AGENT, GITHUB_API_URL};
pub use ratelimit::RateLimit;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use log::{debug, warn};
use profile_lookup::api::{Error, RepoSort, RepoSummary, Result, UserProfile};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

pub struct GithubClient {
    client: Client,
    github_url: Url,
}

impl GithubClient {
    /// Appends `segments` to the API URL, percent-encoding each of them.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.github_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL {} cannot be a base", self.github_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, query: &[(&str, String)]) -> Result<Response> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;
        debug!("{} answered {}", url, response.status());
        Ok(response)
    }
}

async fn read_response<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    Ok(response
        .json::<T>()
        .await
        .with_context(|| format!("Failed to deserialize {} response", what))?)
}

fn rate_limited(response: &Response) -> Option<Error> {
    ratelimit::exhausted(response.status(), response.headers()).map(|limit| Error::RateLimited {
        reset: limit.reset_time(),
    })
}

#[async_trait]
impl profile_lookup::api::Client for GithubClient {
    async fn user(&self, username: &str) -> Result<UserProfile> {
        let response = self.get(self.endpoint(&["users", username])?, &[]).await?;
        if !response.status().is_success() {
            if let Some(limit) = ratelimit::exhausted(response.status(), response.headers()) {
                warn!(
                    "User {} lookup rate limited until {}",
                    username,
                    limit.reset_time().as_deref().unwrap_or("an unknown time")
                );
            } else {
                warn!("User {} lookup answered {}", username, response.status());
            }
            return Err(Error::UserNotFound);
        }
        let user = read_response::<payload::User>(response, "user").await?;
        Ok(user.into())
    }

    async fn repos(&self, username: &str, sort: RepoSort, per_page: u32) -> Result<Vec<RepoSummary>> {
        let url = self.endpoint(&["users", username, "repos"])?;
        let query = [("sort", sort.to_string()), ("per_page", per_page.to_string())];
        let response = self.get(url, &query).await?;
        if !response.status().is_success() {
            if let Some(err) = rate_limited(&response) {
                return Err(err);
            }
            return Err(Error::UnexpectedStatus {
                status: response.status().as_u16(),
                url: response.url().to_string(),
            });
        }
        let repos = read_response::<Vec<payload::Repo>>(response, "repositories").await?;
        Ok(repos.into_iter().map(RepoSummary::from).collect())
    }
}
