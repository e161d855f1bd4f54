use crate::api::{RepoSummary, UserProfile};
use crate::chart::{ChartHandle, ChartSpec};
use crate::histogram::RepoTotals;
use std::fmt::Display;

pub const PLACEHOLDER: &str = "-";
pub const FALLBACK_LINK: &str = "#";
pub const FALLBACK_AVATAR: &str = "https://avatars.githubusercontent.com/u/583231?v=4";

/// Renders `value` if it is present and renders to a non-empty string, `placeholder` otherwise.
pub fn present_or<T: Display>(value: Option<T>, placeholder: &str) -> String {
    value
        .map(|value| value.to_string())
        .filter(|rendered| !rendered.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

/// Display-ready profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub avatar_url: String,
    pub login: String,
    pub public_repos: String,
    pub followers: String,
    pub following: String,
    pub company: String,
    pub location: String,
    pub bio: String,
    pub profile_url: String,
    pub total_stars: String,
    pub total_forks: String,
}

impl ProfileView {
    pub fn new(profile: &UserProfile, totals: &RepoTotals) -> Self {
        ProfileView {
            avatar_url: present_or(profile.avatar_url.as_ref(), FALLBACK_AVATAR),
            login: present_or(profile.login.as_ref(), PLACEHOLDER),
            public_repos: present_or(profile.public_repos, PLACEHOLDER),
            followers: present_or(profile.followers, PLACEHOLDER),
            following: present_or(profile.following, PLACEHOLDER),
            company: present_or(profile.company.as_ref(), PLACEHOLDER),
            location: present_or(profile.location.as_ref(), PLACEHOLDER),
            bio: present_or(profile.bio.as_ref(), PLACEHOLDER),
            profile_url: present_or(profile.html_url.as_ref(), FALLBACK_LINK),
            total_stars: totals.stars.to_string(),
            total_forks: totals.forks.to_string(),
        }
    }

    /// Fields shown after a failed lookup.
    pub fn placeholder() -> Self {
        ProfileView {
            avatar_url: FALLBACK_AVATAR.to_string(),
            login: PLACEHOLDER.to_string(),
            public_repos: PLACEHOLDER.to_string(),
            followers: PLACEHOLDER.to_string(),
            following: PLACEHOLDER.to_string(),
            company: PLACEHOLDER.to_string(),
            location: PLACEHOLDER.to_string(),
            bio: PLACEHOLDER.to_string(),
            profile_url: FALLBACK_LINK.to_string(),
            total_stars: PLACEHOLDER.to_string(),
            total_forks: PLACEHOLDER.to_string(),
        }
    }
}

/// Output surface of a lookup.
pub trait View {
    type Chart: ChartHandle;

    fn set_loading(&mut self, loading: bool);

    /// Enables or disables the username input and its submit action.
    fn set_input_enabled(&mut self, enabled: bool);

    /// `None` hides the profile fields.
    fn set_profile(&mut self, profile: Option<&ProfileView>);

    /// `None` hides the error region.
    fn set_error(&mut self, message: Option<&str>);

    fn set_repo_list(&mut self, repos: &[RepoSummary]);

    fn set_chart(&mut self, chart: &ChartSpec) -> Self::Chart;

    /// Blocking notice, used when no lookup can be started.
    fn alert(&mut self, message: &str);
}

/// Tests

#[test]
fn present_or_test() {
    assert_eq!(present_or(Some("GitHub"), PLACEHOLDER), "GitHub");
    assert_eq!(present_or(Some(""), PLACEHOLDER), "-");
    assert_eq!(present_or(None::<&str>, PLACEHOLDER), "-");
    assert_eq!(present_or(Some(0), PLACEHOLDER), "0");
    assert_eq!(present_or(None::<u32>, FALLBACK_LINK), "#");
}

#[test]
fn profile_view_test() {
    let profile = UserProfile {
        login: Some("octocat".to_string()),
        public_repos: Some(8),
        followers: Some(15000),
        following: Some(0),
        company: Some(String::new()),
        html_url: Some("https://github.com/octocat".to_string()),
        ..UserProfile::default()
    };
    let totals = RepoTotals { stars: 12, forks: 3 };
    let view = ProfileView::new(&profile, &totals);
    assert_eq!(view.login, "octocat");
    assert_eq!(view.public_repos, "8");
    assert_eq!(view.followers, "15000");
    assert_eq!(view.following, "0");
    assert_eq!(view.company, "-");
    assert_eq!(view.location, "-");
    assert_eq!(view.bio, "-");
    assert_eq!(view.avatar_url, FALLBACK_AVATAR);
    assert_eq!(view.profile_url, "https://github.com/octocat");
    assert_eq!(view.total_stars, "12");
    assert_eq!(view.total_forks, "3");
}

#[test]
fn placeholder_test() {
    let view = ProfileView::placeholder();
    assert_eq!(view, ProfileView::new(&UserProfile::default(), &RepoTotals::default()).with_totals_hidden());
}

#[cfg(test)]
impl ProfileView {
    fn with_totals_hidden(mut self) -> Self {
        self.total_stars = PLACEHOLDER.to_string();
        self.total_forks = PLACEHOLDER.to_string();
        self
    }
}
