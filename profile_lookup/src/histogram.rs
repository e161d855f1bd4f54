use crate::api::RepoSummary;

/// Number of repositories per primary language, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageHistogram {
    entries: Vec<(String, u32)>,
}

impl LanguageHistogram {
    /// Tallies `repos` in a single pass. Repositories without a recorded language are skipped.
    pub fn from_repos<'a, I>(repos: I) -> Self
    where
        I: IntoIterator<Item = &'a RepoSummary>,
    {
        let mut histogram = LanguageHistogram::default();
        for language in repos.into_iter().filter_map(|repo| repo.language.as_deref()) {
            if !language.is_empty() {
                histogram.add(language);
            }
        }
        histogram
    }

    fn add(&mut self, language: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((language.to_string(), 1)),
        }
    }

    pub fn get(&self, language: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, count)| *count)
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn counts(&self) -> Vec<u32> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stars and forks summed over exactly the fetched repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepoTotals {
    pub stars: u64,
    pub forks: u64,
}

impl RepoTotals {
    pub fn from_repos<'a, I>(repos: I) -> Self
    where
        I: IntoIterator<Item = &'a RepoSummary>,
    {
        repos.into_iter().fold(RepoTotals::default(), |totals, repo| RepoTotals {
            stars: totals.stars + u64::from(repo.stargazers_count),
            forks: totals.forks + u64::from(repo.forks_count),
        })
    }
}

/// Tests

#[cfg(test)]
fn repo(name: &str, stars: u32, forks: u32, language: Option<&str>) -> RepoSummary {
    RepoSummary::new(
        name.to_string(),
        format!("https://github.com/octocat/{}", name),
        stars,
        forks,
        language.map(str::to_string),
    )
}

#[test]
fn histogram_skips_missing_language_test() {
    let repos = vec![
        repo("a", 1, 0, Some("JavaScript")),
        repo("b", 2, 1, Some("JavaScript")),
        repo("c", 3, 0, Some("Ruby")),
        repo("d", 4, 2, None),
    ];
    let histogram = LanguageHistogram::from_repos(&repos);
    assert_eq!(histogram.len(), 2);
    assert_eq!(histogram.get("JavaScript"), Some(2));
    assert_eq!(histogram.get("Ruby"), Some(1));
    assert_eq!(histogram.total(), 3);
}

#[test]
fn histogram_keeps_first_seen_order_test() {
    let repos = vec![
        repo("a", 0, 0, Some("Rust")),
        repo("b", 0, 0, Some("Go")),
        repo("c", 0, 0, Some("")),
        repo("d", 0, 0, Some("Rust")),
        repo("e", 0, 0, Some("C")),
    ];
    let histogram = LanguageHistogram::from_repos(&repos);
    assert_eq!(histogram.labels(), vec!["Rust", "Go", "C"]);
    assert_eq!(histogram.counts(), vec![2, 1, 1]);
}

#[test]
fn histogram_empty_test() {
    let histogram = LanguageHistogram::from_repos(&Vec::<RepoSummary>::new());
    assert!(histogram.is_empty());
    assert_eq!(histogram.total(), 0);
    assert_eq!(histogram.get("Rust"), None);
}

#[test]
fn totals_sum_every_fetched_repo_test() {
    let repos = vec![
        repo("a", 10, 1, Some("JavaScript")),
        repo("b", 5, 2, Some("JavaScript")),
        repo("c", 0, 0, Some("Ruby")),
        repo("d", u32::MAX, u32::MAX, None),
    ];
    let totals = RepoTotals::from_repos(&repos);
    assert_eq!(totals.stars, 15 + u64::from(u32::MAX));
    assert_eq!(totals.forks, 3 + u64::from(u32::MAX));
}
