//! Whoami command implementation.

use anyhow::{Context as _, Result};
use bridge_rest::CredentialKey;
use bridge_rest::api::ParticipantsApi;
use clap::Args;

use super::Context;
use crate::cli::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    #[command(flatten)]
    pub account: AccountArgs,
}

pub async fn run(args: WhoamiArgs, ctx: &Context) -> Result<()> {
    let key = CredentialKey::from(args.account.sign_in());
    let participants = ctx.cache.get_client::<ParticipantsApi>(&key);

    let me = participants
        .get_self()
        .await
        .context("Failed to fetch participant record")?;

    if ctx.json {
        return output::json_pretty(&me);
    }

    output::field("ID", &me.id);
    if let Some(email) = &me.email {
        output::field("Email", email);
    }
    let name = [me.first_name.as_deref(), me.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !name.is_empty() {
        output::field("Name", &name);
    }
    if let Some(scope) = me.sharing_scope {
        output::field("Sharing", &scope.to_string());
    }
    if !me.data_groups.is_empty() {
        output::field("Data groups", &me.data_groups.join(", "));
    }

    Ok(())
}
