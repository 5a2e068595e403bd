use crate::cli::{
    actions::{Action, server::Args},
    commands::{ARG_CATALOG, ARG_PORT},
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let catalog = matches
        .get_one::<String>(ARG_CATALOG)
        .map(PathBuf::from)
        .context("missing required argument: --catalog")?;

    Ok(Action::Server(Args { port, catalog }))
}
