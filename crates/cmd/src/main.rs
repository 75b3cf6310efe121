// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io;

use anyhow::Result;
use clap::Parser;
use cmd::config::{Cli, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    diagnostics::init_diagnostics();

    let cli = Cli::parse();
    let config = Config::load(&cli)?;

    let engine = config.session_builder().get_or_create()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = cmd::run_session(engine.as_ref(), &config, &mut out).await?;

    log::info!(
        "Finished: {} statements executed, {} failed",
        summary.executed,
        summary.failed
    );
    Ok(())
}
