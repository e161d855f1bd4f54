//! GitHub profile lookup
//!
//! # Overview
//!
//! Given a GitHub username, library fetches the public profile record and the most recently pushed repositories of that user.
//! From the fetched repositories it derives the total number of stars and forks and a histogram of primary languages.
//! Results are pushed into a [`view::View`], a small set of setters that a front end implements (terminal, GUI, tests).
//! The language histogram is handed over as a doughnut chart description; the front end returns a handle that is destroyed before the next chart is drawn.
//!
//! Network access goes through [`api::Client`], so the lookup flow can be driven by any implementation of the API.

pub mod api;
pub mod chart;
#[cfg(feature = "controller")]
mod controller;
pub mod histogram;
pub mod view;

#[cfg(feature = "controller")]
pub use controller::{LookupController, LookupOptions, LookupReport};
pub use histogram::{LanguageHistogram, RepoTotals};
