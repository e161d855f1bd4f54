use clap::Parser;
use profile_lookup::api::RepoSort;
use profile_lookup::LookupOptions;
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub username; without it usernames are read from stdin, one per line
    pub username: Option<String>,

    /// Repository API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,

    /// Order of the fetched repositories (created, updated, pushed, full_name)
    #[clap(short, long, env, default_value = "pushed")]
    pub sort: RepoSort,

    /// Number of repositories fetched for the totals and the language chart
    #[clap(short, long, env, default_value_t = 10, parse(try_from_str=per_page_in_range))]
    pub per_page: u32,

    /// Number of repositories listed
    #[clap(long, env, default_value_t = 5, parse(try_from_str=shown_in_range))]
    pub shown: usize,

    /// User-Agent sent with every request
    #[clap(long, env, default_value = "profile-lookup")]
    pub user_agent: String,

    /// Disable coloured chart output
    #[clap(long)]
    pub no_color: bool,
}

impl Args {
    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            sort: self.sort,
            per_page: self.per_page,
            shown: self.shown,
        }
    }
}

fn per_page_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, 100, "per_page".to_string())
}

fn shown_in_range(value: &str) -> clap::Result<usize, String> {
    number_in_range(value, 1, 100, "shown".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}

#[test]
fn defaults_test() {
    let args = Args::try_parse_from(["profile_lookup", "octocat"]).unwrap();
    assert_eq!(args.username.as_deref(), Some("octocat"));
    assert_eq!(args.lookup_options(), LookupOptions::default());
    assert!(!args.no_color);
}

#[test]
fn interactive_test() {
    let args = Args::try_parse_from(["profile_lookup", "--sort", "full_name", "--shown", "3"]).unwrap();
    assert_eq!(args.username, None);
    assert_eq!(args.sort, RepoSort::FullName);
    assert_eq!(args.shown, 3);
}

#[test]
fn out_of_range_test() {
    assert!(Args::try_parse_from(["profile_lookup", "--per-page", "0"]).is_err());
    assert!(Args::try_parse_from(["profile_lookup", "--per-page", "101"]).is_err());
    assert!(Args::try_parse_from(["profile_lookup", "--shown", "x"]).is_err());
    assert!(Args::try_parse_from(["profile_lookup", "--sort", "stars"]).is_err());
}

#[test]
fn number_in_range_test() {
    assert_eq!(number_in_range("7", 1, 10, "n".to_string()), Ok(7));
    assert_eq!(
        number_in_range("11", 1, 10, "n".to_string()),
        Err("n is not in range 1 .. 10.".to_string())
    );
}
