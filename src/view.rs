use log::warn;
use profile_lookup::api::RepoSummary;
use profile_lookup::chart::{ChartHandle, ChartSpec};
use profile_lookup::view::{ProfileView, View};
use std::cell::Cell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

const BAR_WIDTH: usize = 30;
const PROMPT: &str = "username> ";

/// Plain text rendering of a lookup, written to `out` as the setters are called.
pub struct TerminalView<W: Write> {
    out: W,
    color: bool,
    interactive: bool,
    live_charts: Rc<Cell<usize>>,
}

/// Chart printed by a [`TerminalView`]. Printed text cannot be taken back, so destroying it only releases the slot.
pub struct TerminalChart {
    live_charts: Rc<Cell<usize>>,
}

impl ChartHandle for TerminalChart {
    fn destroy(self) {
        self.live_charts.set(self.live_charts.get().saturating_sub(1));
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, color: bool, interactive: bool) -> Self {
        TerminalView {
            out,
            color,
            interactive,
            live_charts: Rc::new(Cell::new(0)),
        }
    }

    /// Number of charts drawn and not yet destroyed.
    pub fn live_charts(&self) -> usize {
        self.live_charts.get()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments) {
        if let Err(err) = self.out.write_fmt(args).and_then(|_| self.out.flush()) {
            warn!("Failed to write output: {}", err);
        }
    }

    fn swatch(&self, colour: &str, text: &str) -> String {
        match (self.color, rgb(colour)) {
            (true, Some((r, g, b))) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
            _ => text.to_string(),
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    type Chart = TerminalChart;

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.emit(format_args!("Searching...\n"));
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if enabled && self.interactive {
            self.emit(format_args!("{}", PROMPT));
        }
    }

    fn set_profile(&mut self, profile: Option<&ProfileView>) {
        let profile = match profile {
            Some(profile) => profile,
            None => return,
        };
        self.emit(format_args!(
            "\n{}\n  Avatar:    {}\n  Profile:   {}\n  Repos:     {}\n  Followers: {}\n  Following: {}\n  Company:   {}\n  Location:  {}\n  Bio:       {}\n  Stars:     {}\n  Forks:     {}\n",
            profile.login,
            profile.avatar_url,
            profile.profile_url,
            profile.public_repos,
            profile.followers,
            profile.following,
            profile.company,
            profile.location,
            profile.bio,
            profile.total_stars,
            profile.total_forks,
        ));
    }

    fn set_error(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            self.emit(format_args!("Error: {}\n", message));
        }
    }

    fn set_repo_list(&mut self, repos: &[RepoSummary]) {
        if repos.is_empty() {
            return;
        }
        self.emit(format_args!("\nTop repositories\n"));
        for repo in repos {
            self.emit(format_args!(
                "  {} <{}>  ★ {} | ⑂ {}\n",
                repo.name, repo.html_url, repo.stargazers_count, repo.forks_count
            ));
        }
    }

    fn set_chart(&mut self, chart: &ChartSpec) -> TerminalChart {
        self.live_charts.set(self.live_charts.get() + 1);
        let mut lines = format!("\n{} ({})\n", chart.dataset_label, chart.kind);
        if chart.is_empty() {
            lines.push_str("  no language data\n");
        }
        for (index, (label, value)) in chart.labels.iter().zip(&chart.values).enumerate() {
            let share = chart.share(index);
            let width = ((share * BAR_WIDTH as f32).round() as usize).max(1);
            let bar = self.swatch(chart.colour_for(index), &"█".repeat(width));
            let padding = " ".repeat(BAR_WIDTH.saturating_sub(width));
            lines.push_str(&format!("  {}{} {} {} ({:.1}%)\n", bar, padding, label, value, share * 100.0));
        }
        self.emit(format_args!("{}", lines));
        TerminalChart {
            live_charts: self.live_charts.clone(),
        }
    }

    fn alert(&mut self, message: &str) {
        self.emit(format_args!("{}\n", message));
        if self.interactive {
            self.emit(format_args!("{}", PROMPT));
        }
    }
}

/// Parses `#rrggbb`.
fn rgb(colour: &str) -> Option<(u8, u8, u8)> {
    let hex = colour.strip_prefix('#').filter(|hex| hex.len() == 6)?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
