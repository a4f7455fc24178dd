//! CLI argument definitions.

use bridge_rest::SignIn;
use clap::{Args, Parser, Subcommand};

use crate::commands::{sign_in, studies, subpopulations, whoami};

/// Command-line client for the Bridge REST API.
#[derive(Parser, Debug)]
#[command(name = "bridge")]
#[command(author, version = env!("BRIDGE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Bridge server base URL
    #[arg(
        long,
        global = true,
        env = "BRIDGE_HOST",
        default_value = "https://webservices.sagebridge.org"
    )]
    pub host: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the studies on the server
    Studies(studies::StudiesArgs),

    /// Sign in and show the session
    SignIn(sign_in::SignInArgs),

    /// Show the participant record of the signed-in account
    Whoami(whoami::WhoamiArgs),

    /// List the consent groups visible to the account
    Subpopulations(subpopulations::SubpopulationsArgs),
}

/// Account credentials, shared by every command that signs in.
#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Study identifier
    #[arg(long, env = "BRIDGE_STUDY", default_value = "api")]
    pub study: String,

    /// Account email
    #[arg(long, env = "BRIDGE_EMAIL")]
    pub email: String,

    /// Account password
    #[arg(long, env = "BRIDGE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl AccountArgs {
    pub fn sign_in(&self) -> SignIn {
        SignIn::new(&self.study, &self.email, &self.password)
    }
}
