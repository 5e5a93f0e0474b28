//! The `geoprep clear-logs` command.

use anyhow::Result;

use super::{AppContext, Paths};

pub fn execute(paths: &Paths, admin_code: String, yes: bool) -> Result<()> {
    let ctx = AppContext::load(paths)?;
    ctx.require_admin(admin_code)?;

    let logbook = ctx.logbook();
    let count = logbook.logs()?.len();
    if !yes {
        anyhow::bail!("refusing to delete {count} evaluation logs without --yes");
    }

    logbook.clear()?;
    tracing::info!(count, "evaluation logs cleared");
    println!("Cleared {count} evaluation logs.");
    Ok(())
}
