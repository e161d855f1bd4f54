mod args;
mod view;

pub use args::Args;
pub use view::{TerminalChart, TerminalView};

use anyhow::Context;
use github_client::{GithubClient, GithubClientBuilder};
use log::debug;
use profile_lookup::api::Result;
use profile_lookup::LookupController;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub fn github_client(args: &Args) -> Result<GithubClient> {
    GithubClientBuilder::default()
        .with_github_url(&args.api_url)
        .try_with_user_agent(&args.user_agent)?
        .build()
}

/// Looks up `args.username`, or every line of `input` when no username is given.
///
/// A single lookup returns its failure. When reading `input`, failed lookups are shown and the next line is read.
pub async fn run<R, W>(args: Args, input: R, out: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let client = github_client(&args)?;
    let interactive = args.username.is_none();
    let view = TerminalView::new(out, !args.no_color, interactive);
    let mut controller = LookupController::new(client, view, args.lookup_options());

    if let Some(username) = &args.username {
        return controller.lookup(username).await.map(|_| ());
    }

    controller.ready();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read username")? {
        if let Err(err) = controller.lookup(&line).await {
            debug!("Lookup of {:?} failed: {}", line.trim(), err);
        }
    }
    Ok(())
}
