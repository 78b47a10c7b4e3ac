// SPDX-License-Identifier: GPL-3.0-only

use std::process::ExitCode;

use clap::Parser;
use mountpoint_editor::cli::{Cli, run};

// Single-threaded: edits run to completion in the order they arrive.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    run(Cli::parse()).await
}
