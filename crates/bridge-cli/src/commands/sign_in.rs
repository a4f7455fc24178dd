//! Sign-in command implementation.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use super::Context;
use crate::cli::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SignInArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Include the session token in the output
    #[arg(long)]
    pub show_token: bool,
}

#[derive(Debug, Serialize)]
struct SessionSummary<'a> {
    study: &'a str,
    email: &'a str,
    user_id: Option<&'a str>,
    authenticated: bool,
    consented: bool,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_token: Option<&'a str>,
}

pub async fn run(args: SignInArgs, ctx: &Context) -> Result<()> {
    let sign_in = args.account.sign_in();
    output::note("Signing in...");

    let session = ctx.cache.session(&sign_in).await.context("Failed to sign in")?;

    let summary = SessionSummary {
        study: sign_in.study(),
        email: sign_in.email(),
        user_id: session.user_id(),
        authenticated: session.is_authenticated(),
        consented: session.is_consented(),
        created_at: session.created_at(),
        session_token: args.show_token.then(|| session.token().as_str()),
    };

    if ctx.json {
        return output::json_pretty(&summary);
    }

    output::success("Signed in successfully");
    println!();
    output::field("Study", summary.study);
    output::field("Email", summary.email);
    if let Some(user_id) = summary.user_id {
        output::field("User ID", user_id);
    }
    output::field("Consented", if summary.consented { "yes" } else { "no" });
    if let Some(token) = summary.session_token {
        output::field("Session", token);
    }

    Ok(())
}
