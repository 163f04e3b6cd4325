use std::io;

use anyhow::{Context, Result};
use heapcell::cell::globals::snapshot;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let stdout = io::stdout();
    let value = heapcell::run(&mut stdout.lock()).context("heap cell lesson failed")?;

    let ledger = snapshot();
    log::debug!(
        "reported {value}, {} live allocations after release ({} total)",
        ledger.live,
        ledger.total_allocations
    );

    Ok(())
}
