use crate::api::{Client, Error, RepoSort, RepoSummary, Result, UserProfile};
use crate::chart::{ChartHandle, ChartSpec};
use crate::histogram::{LanguageHistogram, RepoTotals};
use crate::view::{ProfileView, View};
use log::{debug, error};

pub const REPOS_PER_PAGE: u32 = 10;
pub const REPOS_SHOWN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    pub sort: RepoSort,
    pub per_page: u32,
    /// Number of repositories listed in the view.
    pub shown: usize,
}

impl Default for LookupOptions {
    fn default() -> Self {
        LookupOptions {
            sort: RepoSort::default(),
            per_page: REPOS_PER_PAGE,
            shown: REPOS_SHOWN,
        }
    }
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupReport {
    pub profile: UserProfile,
    pub repos: Vec<RepoSummary>,
    pub totals: RepoTotals,
    pub histogram: LanguageHistogram,
}

/// Drives one lookup at a time against `client` and reflects its progress in `view`.
///
/// Holds at most one chart; it is destroyed before a replacement is drawn and on every failed lookup.
pub struct LookupController<C, V>
where
    C: Client,
    V: View,
{
    client: C,
    view: V,
    options: LookupOptions,
    chart: Option<V::Chart>,
}

impl<C, V> LookupController<C, V>
where
    C: Client,
    V: View,
{
    pub fn new(client: C, view: V, options: LookupOptions) -> Self {
        LookupController {
            client,
            view,
            options,
            chart: None,
        }
    }

    /// Puts the view into its idle state, ready to accept a username.
    pub fn ready(&mut self) {
        self.view.set_loading(false);
        self.view.set_input_enabled(true);
    }

    pub async fn lookup(&mut self, username: &str) -> Result<LookupReport> {
        let username = username.trim();
        if username.is_empty() {
            let err = Error::EmptyUsername;
            self.view.alert(&err.to_string());
            return Err(err);
        }

        self.begin();
        let outcome = match self.fetch(username).await {
            Ok(report) => {
                self.show(&report);
                Ok(report)
            }
            Err(err) => {
                error!("Lookup of {} failed: {:?}", username, err);
                self.show_failure(&err);
                Err(err)
            }
        };
        self.view.set_loading(false);
        self.view.set_input_enabled(true);
        outcome
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn begin(&mut self) {
        self.view.set_loading(true);
        self.view.set_error(None);
        self.view.set_profile(None);
        self.view.set_repo_list(&[]);
        self.view.set_input_enabled(false);
    }

    async fn fetch(&self, username: &str) -> Result<LookupReport> {
        let profile = self.client.user(username).await?;
        let repos = self
            .client
            .repos(username, self.options.sort, self.options.per_page)
            .await?;
        debug!("Found {} repositories of {}", repos.len(), username);
        let totals = RepoTotals::from_repos(&repos);
        let histogram = LanguageHistogram::from_repos(&repos);
        Ok(LookupReport {
            profile,
            repos,
            totals,
            histogram,
        })
    }

    fn show(&mut self, report: &LookupReport) {
        let shown = report.repos.len().min(self.options.shown);
        self.view.set_profile(Some(&ProfileView::new(&report.profile, &report.totals)));
        self.view.set_repo_list(&report.repos[..shown]);
        self.replace_chart(ChartSpec::languages(&report.histogram));
    }

    fn show_failure(&mut self, err: &Error) {
        self.view.set_error(Some(&err.to_string()));
        self.view.set_profile(Some(&ProfileView::placeholder()));
        self.view.set_repo_list(&[]);
        self.discard_chart();
    }

    fn replace_chart(&mut self, spec: ChartSpec) {
        self.discard_chart();
        self.chart = Some(self.view.set_chart(&spec));
    }

    fn discard_chart(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
    }
}

impl<C, V> Drop for LookupController<C, V>
where
    C: Client,
    V: View,
{
    fn drop(&mut self) {
        self.discard_chart();
    }
}
