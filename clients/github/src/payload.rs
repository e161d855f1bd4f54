use profile_lookup::api::{RepoSummary, UserProfile};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct User {
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

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            login: user.login,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            company: user.company,
            location: user.location,
            bio: user.bio,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub language: Option<String>,
}

impl From<Repo> for RepoSummary {
    fn from(repo: Repo) -> Self {
        RepoSummary {
            name: repo.name,
            html_url: repo.html_url,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            language: repo.language,
        }
    }
}
