// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jeeves Bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;

use jeeves_bot::{Config, RuleTable};

#[derive(Debug, Parser)]
struct Cli {
    /// The bot name used until the engine sends one.
    #[clap(long, short, default_value = "Jeeves")]
    name: String,
    /// Enable debug logs.
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Logs go to stderr, stdout is for the engine.
    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let config = Config { name: cli.name };
    jeeves_bot::run(config, RuleTable)
}
