//! CLI argument definitions using clap.
//!
//! Every catalog command takes the `.xcstrings` path as its first argument and
//! writes its edits back in place unless `--dry-run` is given.

use std::path::PathBuf;

use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand};

use crate::core::{DeviceKind, PluralForm, UnitState};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Arguments shared by every command that opens a catalog.
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Path to the .xcstrings catalog
    pub catalog: PathBuf,

    /// Report what would change without writing the catalog
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Only show this language
    #[arg(long)]
    pub lang: Option<String>,
}

#[derive(Debug, Args)]
pub struct LanguagesCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Show the translation state in this language
    #[arg(long)]
    pub lang: Option<String>,

    /// Only list keys without a translation in --lang
    #[arg(long, requires = "lang")]
    pub missing: bool,
}

#[derive(Debug, Args)]
pub struct ShowCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    pub key: String,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Only check this language (default: every non-source language)
    #[arg(long)]
    pub lang: Option<String>,
}

#[derive(Debug, Args)]
pub struct LanguageCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Language code, e.g. `de` or `pt-BR`
    pub code: String,
}

#[derive(Debug, Args)]
pub struct AddKeyCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    pub key: String,

    /// Developer comment shown to translators
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Debug, Args)]
pub struct KeyCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    pub key: String,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("variant").args(["plural", "device"])))]
pub struct SetCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    pub key: String,
    pub lang: String,

    /// New value; an empty standard value removes the translation
    pub value: String,

    /// Set a plural form instead of the standard value
    #[arg(long, value_enum)]
    pub plural: Option<PluralForm>,

    /// Set a device variant instead of the standard value
    #[arg(long, value_enum)]
    pub device: Option<DeviceKind>,

    /// State to store (default: derived from the value)
    #[arg(long, value_enum)]
    pub state: Option<UnitState>,
}

#[derive(Debug, Args)]
pub struct ClearCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    pub key: String,
    pub lang: String,

    /// Clear plural and device variations instead of the standard value
    #[arg(long)]
    pub variations: bool,
}

#[derive(Debug, Args)]
pub struct CopyCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    pub from: String,
    pub to: String,

    /// Replace values that already exist in the destination language
    #[arg(long)]
    pub overwrite: bool,

    /// State given to copied values (default: from config, `needs_review`)
    #[arg(long, value_enum)]
    pub state: Option<UnitState>,
}

#[derive(Debug, Args)]
pub struct LocalizationCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    pub key: String,
    pub lang: String,
}

#[derive(Debug, Args)]
pub struct MarkCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    pub key: String,
    pub lang: String,

    #[arg(value_enum)]
    pub state: UnitState,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("action").args(["remove", "prune", "clear"])))]
pub struct RecentCommand {
    /// Remove a file from the list
    #[arg(long)]
    pub remove: Option<PathBuf>,

    /// Remove files that no longer exist
    #[arg(long)]
    pub prune: bool,

    /// Empty the list
    #[arg(long)]
    pub clear: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show translation progress per language
    Stats(StatsCommand),
    /// List the languages used in the catalog
    Languages(LanguagesCommand),
    /// List keys, optionally with their state in one language
    Keys(KeysCommand),
    /// Show every localization of a key
    Show(ShowCommand),
    /// Report missing translations and format specifier mismatches
    Check(CheckCommand),
    /// Add a language to every translatable key
    AddLanguage(LanguageCommand),
    /// Remove a language from every key
    RemoveLanguage(LanguageCommand),
    /// Add a new key
    AddKey(AddKeyCommand),
    /// Remove a key
    RemoveKey(KeyCommand),
    /// Set a translation, plural form or device variant
    Set(SetCommand),
    /// Clear a translation
    Clear(ClearCommand),
    /// Copy translations from one language to another
    Copy(CopyCommand),
    /// Create plural forms for a key that looks like a counted quantity
    Plurals(LocalizationCommand),
    /// Set the state of every value of a localization
    Mark(MarkCommand),
    /// Mark a key "do not translate", discarding its translations
    Lock(KeyCommand),
    /// Make a locked key translatable again
    Unlock(KeyCommand),
    /// Show or edit the list of recently opened catalogs
    Recent(RecentCommand),
    /// Initialize a new .xcstoolrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}

impl Command {
    pub fn catalog_args(&self) -> Option<&CatalogArgs> {
        match self {
            Command::Stats(cmd) => Some(&cmd.catalog),
            Command::Languages(cmd) => Some(&cmd.catalog),
            Command::Keys(cmd) => Some(&cmd.catalog),
            Command::Show(cmd) => Some(&cmd.catalog),
            Command::Check(cmd) => Some(&cmd.catalog),
            Command::AddLanguage(cmd) | Command::RemoveLanguage(cmd) => Some(&cmd.catalog),
            Command::AddKey(cmd) => Some(&cmd.catalog),
            Command::RemoveKey(cmd) | Command::Lock(cmd) | Command::Unlock(cmd) => {
                Some(&cmd.catalog)
            }
            Command::Set(cmd) => Some(&cmd.catalog),
            Command::Clear(cmd) => Some(&cmd.catalog),
            Command::Copy(cmd) => Some(&cmd.catalog),
            Command::Plurals(cmd) => Some(&cmd.catalog),
            Command::Mark(cmd) => Some(&cmd.catalog),
            Command::Recent(_) | Command::Init | Command::Serve => None,
        }
    }
}
