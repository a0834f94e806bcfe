//! Dispatches parsed arguments to the matching command handler.
//!
//! # Returns
//! - `Ok(CommandResult)` describing what the command found or changed
//! - `Err` if the command fails (catalog not found, malformed file, refused edit)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, edit, init::init, inspect, recent::recent},
};

pub fn run(Arguments { command, .. }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Stats(cmd)) => inspect::stats(cmd),
        Some(Command::Languages(cmd)) => inspect::languages(cmd),
        Some(Command::Keys(cmd)) => inspect::keys(cmd),
        Some(Command::Show(cmd)) => inspect::show(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::AddLanguage(cmd)) => edit::add_language(cmd),
        Some(Command::RemoveLanguage(cmd)) => edit::remove_language(cmd),
        Some(Command::AddKey(cmd)) => edit::add_key(cmd),
        Some(Command::RemoveKey(cmd)) => edit::remove_key(cmd),
        Some(Command::Set(cmd)) => edit::set(cmd),
        Some(Command::Clear(cmd)) => edit::clear(cmd),
        Some(Command::Copy(cmd)) => edit::copy(cmd),
        Some(Command::Plurals(cmd)) => edit::plurals(cmd),
        Some(Command::Mark(cmd)) => edit::mark(cmd),
        Some(Command::Lock(cmd)) => edit::lock(cmd),
        Some(Command::Unlock(cmd)) => edit::unlock(cmd),
        Some(Command::Recent(cmd)) => recent(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            bail!("Serve command should be handled before run()")
        }
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
