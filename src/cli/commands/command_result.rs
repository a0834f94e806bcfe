use std::path::PathBuf;

use crate::core::{Diagnostic, Entry, Severity, Statistics, TranslationState};

#[derive(Debug)]
pub enum CommandSummary {
    Stats(StatsSummary),
    Languages(LanguagesSummary),
    Keys(KeysSummary),
    Show(ShowSummary),
    Check(CheckSummary),
    Edit(EditSummary),
    Recent(RecentSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct StatsSummary {
    pub source_language: String,
    pub languages: Vec<(String, Statistics)>,
}

#[derive(Debug)]
pub struct LanguagesSummary {
    pub source_language: String,
    pub languages: Vec<String>,
}

#[derive(Debug)]
pub struct KeyRow {
    pub key: String,
    /// State in the requested language, when one was given.
    pub state: Option<TranslationState>,
    pub locked: bool,
}

#[derive(Debug)]
pub struct KeysSummary {
    pub rows: Vec<KeyRow>,
}

#[derive(Debug)]
pub struct ShowSummary {
    pub key: String,
    pub entry: Entry,
    pub source_language: String,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub catalog: PathBuf,
    pub languages_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct EditSummary {
    pub catalog: PathBuf,
    /// Human-readable description of what changed.
    pub message: String,
    pub changed: bool,
    pub is_dry_run: bool,
}

#[derive(Debug)]
pub struct RecentSummary {
    pub files: Vec<PathBuf>,
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running xcstool commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let (error_count, warning_count) = match &summary {
            CommandSummary::Check(check) => count_by_severity(&check.diagnostics),
            CommandSummary::Init(init) if !init.created => (1, 0),
            _ => (0, 0),
        };
        Self {
            summary,
            error_count,
            warning_count,
        }
    }
}

fn count_by_severity(diagnostics: &[Diagnostic]) -> (usize, usize) {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Error)
        .count();
    (errors, diagnostics.len() - errors)
}
