//! Subcommand implementations.

pub mod sign_in;
pub mod studies;
pub mod subpopulations;
pub mod whoami;

use bridge_rest::ClientCache;

/// What every command runs with.
pub struct Context {
    pub cache: ClientCache,
    /// Print results as JSON instead of labeled fields.
    pub json: bool,
}
