//! Studies command implementation.

use anyhow::{Context as _, Result};
use bridge_rest::api::StudiesApi;
use clap::Args;

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct StudiesArgs {}

pub async fn run(_args: StudiesArgs, ctx: &Context) -> Result<()> {
    let studies = ctx.cache.anonymous_client::<StudiesApi>();
    let summaries = studies
        .get_study_summaries()
        .await
        .context("Failed to list studies")?;

    if ctx.json {
        return output::json_pretty(&summaries.items);
    }

    if summaries.is_empty() {
        output::note("No studies found.");
        return Ok(());
    }

    for study in &summaries.items {
        output::field(&study.identifier, &study.name);
    }

    Ok(())
}
