use std::env;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, RecentSummary};
use crate::cli::args::RecentCommand;
use crate::config::load_config;
use crate::history::RecentFiles;

pub fn recent(cmd: RecentCommand) -> Result<CommandResult> {
    let config = load_config(&env::current_dir()?)?.config;
    let history = config
        .history_path()
        .map(RecentFiles::new)
        .context("Could not determine the home directory for the file history")?;

    let message = if let Some(file) = &cmd.remove {
        Some(if history.remove(file)? {
            format!("Removed {} from recent files", file.display())
        } else {
            format!("{} is not in recent files", file.display())
        })
    } else if cmd.prune {
        let removed = history.prune_missing()?;
        Some(format!(
            "Pruned {} missing file{}",
            removed,
            if removed == 1 { "" } else { "s" }
        ))
    } else if cmd.clear {
        history.clear()?;
        Some("Cleared recent files".to_string())
    } else {
        None
    };

    Ok(CommandResult::new(CommandSummary::Recent(RecentSummary {
        files: history.load(),
        message,
    })))
}
