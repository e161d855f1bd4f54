use crate::GithubClient;
use anyhow::Context;
use profile_lookup::api::Result;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use url::Url;

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "profile-lookup";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        Self {
            client_builder: ClientBuilder::default(),
            github_url: GITHUB_API_URL.to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        Ok(self.try_with_header(header::USER_AGENT, user_agent)?)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    fn try_with_header(mut self, key: HeaderName, val: impl AsRef<str>) -> anyhow::Result<GithubClientBuilder> {
        let val = HeaderValue::from_str(val.as_ref()).with_context(|| format!("Invalid {} header value", key))?;
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        let github_url =
            Url::parse(&self.github_url).with_context(|| format!("Invalid API URL {}", self.github_url))?;
        if github_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("API URL {} cannot be a base", github_url).into());
        }
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(GithubClient { client, github_url })
    }
}

#[test]
fn build_rejects_invalid_url_test() {
    let err = GithubClientBuilder::default().with_github_url("not a url").build();
    assert!(err.is_err());
    let err = GithubClientBuilder::default().with_github_url("mailto:octocat@github.com").build();
    assert!(err.is_err());
}

#[test]
fn invalid_user_agent_test() {
    assert!(GithubClientBuilder::default().try_with_user_agent("bad\nagent").is_err());
    assert!(GithubClientBuilder::default().try_with_user_agent("profile-lookup/1.0").is_ok());
}
