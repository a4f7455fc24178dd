//! Helpers for running the `bridge` binary in tests.

#![allow(dead_code)]

use std::process::{Command, Output};

pub const EMAIL: &str = "alice@example.org";
pub const PASSWORD: &str = "P4ssword";

fn command(args: &[&str], host: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bridge"));
    cmd.args(args);
    cmd.env("BRIDGE_HOST", host);
    cmd.env("BRIDGE_EMAIL", EMAIL);
    cmd.env("BRIDGE_PASSWORD", PASSWORD);
    cmd.env_remove("BRIDGE_STUDY");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the CLI against `host` without blocking the async runtime.
pub async fn run_cli(args: &[&str], host: &str) -> Output {
    let mut cmd = command(args, host);
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute CLI"))
        .await
        .expect("CLI task panicked")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(args: &[&str], host: &str) -> String {
    let output = run_cli(args, host).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
