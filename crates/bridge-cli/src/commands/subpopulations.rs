//! Subpopulations command implementation.

use anyhow::{Context as _, Result};
use bridge_rest::CredentialKey;
use bridge_rest::api::SubpopulationsApi;
use clap::Args;
use colored::Colorize;

use super::Context;
use crate::cli::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SubpopulationsArgs {
    #[command(flatten)]
    pub account: AccountArgs,
}

pub async fn run(args: SubpopulationsArgs, ctx: &Context) -> Result<()> {
    let key = CredentialKey::from(args.account.sign_in());
    let subpopulations = ctx.cache.get_client::<SubpopulationsApi>(&key);

    let groups = subpopulations
        .get_subpopulations()
        .await
        .context("Failed to list subpopulations")?;

    if ctx.json {
        return output::json_pretty(&groups.items);
    }

    if groups.is_empty() {
        output::note("No subpopulations found.");
        return Ok(());
    }

    for group in &groups.items {
        let required = if group.required {
            " (required)".yellow().to_string()
        } else {
            String::new()
        };
        println!("{}  {}{}", group.guid.as_str().bold(), group.name, required);
    }

    Ok(())
}
