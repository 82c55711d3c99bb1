//! `check` command.

use anyhow::{Result, bail};

use crate::asset::AssetManager;
use crate::log;
use crate::utils::plural_count;

/// Report every catalog issue, fail if there is any.
pub fn run_check(manager: &AssetManager) -> Result<()> {
    let issues = manager.check();
    if issues.is_empty() {
        log!("check"; "all aliases resolve");
        return Ok(());
    }

    for issue in &issues {
        log!("error"; "{}", issue);
    }
    bail!("found {}", plural_count(issues.len(), "issue"))
}
