// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use itrs::Cli;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so stdout stays machine-readable.
fn setup_logging() {
    let filter = EnvFilter::try_from_env("IT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    setup_logging();
    let cli = Cli::parse();
    if let Err(e) = itrs::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}
