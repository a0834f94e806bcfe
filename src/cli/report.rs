//! Report formatting and printing utilities.
//!
//! Check findings are printed in cargo-style format; everything else as
//! aligned tables or one-line status messages. Kept apart from the command
//! logic so the core can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, EditSummary, InitSummary, KeysSummary,
    LanguagesSummary, RecentSummary, ShowSummary, StatsSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    Diagnostic, Localization, Severity, TranslationState, VariantKind, derive_state,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match &result.summary {
        CommandSummary::Stats(summary) => print_stats(summary, &mut writer),
        CommandSummary::Languages(summary) => print_languages(summary, &mut writer),
        CommandSummary::Keys(summary) => print_keys(summary, &mut writer),
        CommandSummary::Show(summary) => print_show(summary, &mut writer),
        CommandSummary::Check(summary) => print_check(summary, &mut writer),
        CommandSummary::Edit(summary) => print_edit(summary, &mut writer),
        CommandSummary::Recent(summary) => print_recent(summary, &mut writer),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print an error that stopped a command, cargo-style, to stderr.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "error:".bold().red(), err);
}

// ============================================================
// Internal Functions
// ============================================================

/// Pad `text` to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(UnicodeWidthStr::width)
        .chain(std::iter::once(UnicodeWidthStr::width(header)))
        .max()
        .unwrap_or(0)
}

fn colored_state(state: TranslationState) -> String {
    let text = state.as_str();
    match state {
        TranslationState::Translated | TranslationState::Source => text.green().to_string(),
        TranslationState::New => text.cyan().to_string(),
        TranslationState::NeedsReview => text.yellow().to_string(),
        TranslationState::Stale => text.magenta().to_string(),
        TranslationState::NotTranslated => text.red().to_string(),
    }
}

fn print_stats<W: Write>(summary: &StatsSummary, writer: &mut W) {
    let labels: Vec<String> = summary
        .languages
        .iter()
        .map(|(lang, _)| {
            if *lang == summary.source_language {
                format!("{} (source)", lang)
            } else {
                lang.clone()
            }
        })
        .collect();
    let width = column_width("Language", labels.iter().map(String::as_str));

    let _ = writeln!(
        writer,
        "{}  {:>6}  {:>10}  {:>12}  {:>6}  {:>7}  {:>5}",
        pad("Language", width).bold(),
        "Total".bold(),
        "Translated".bold(),
        "Needs review".bold(),
        "Stale".bold(),
        "Missing".bold(),
        "Done".bold()
    );

    for (label, (_, stats)) in labels.iter().zip(&summary.languages) {
        let percent = format!("{}%", stats.percent_translated());
        let percent = if stats.percent_translated() == 100 {
            percent.green()
        } else {
            percent.yellow()
        };
        let _ = writeln!(
            writer,
            "{}  {:>6}  {:>10}  {:>12}  {:>6}  {:>7}  {:>5}",
            pad(label, width),
            stats.total,
            stats.translated,
            stats.needs_review,
            stats.stale,
            stats.missing,
            percent
        );
    }
}

fn print_languages<W: Write>(summary: &LanguagesSummary, writer: &mut W) {
    for lang in &summary.languages {
        if *lang == summary.source_language {
            let _ = writeln!(writer, "{} {}", lang, "(source)".dimmed());
        } else {
            let _ = writeln!(writer, "{}", lang);
        }
    }
}

fn print_keys<W: Write>(summary: &KeysSummary, writer: &mut W) {
    let width = column_width("", summary.rows.iter().map(|r| r.key.as_str()));

    for row in &summary.rows {
        let mut line = match row.state {
            Some(state) => format!("{}  {}", pad(&row.key, width), colored_state(state)),
            None => row.key.clone(),
        };
        if row.locked {
            line.push_str(&format!("  {}", "(do not translate)".dimmed()));
        }
        let _ = writeln!(writer, "{}", line.trim_end());
    }
}

fn print_localization<W: Write>(
    lang: &str,
    localization: &Localization,
    is_source: bool,
    writer: &mut W,
) {
    let label = if is_source {
        format!("{} (source)", lang)
    } else {
        lang.to_string()
    };
    let state = derive_state(localization, is_source);
    let _ = writeln!(writer, "  {}  {}", label.bold(), colored_state(state));

    if let Some(unit) = &localization.unit {
        let _ = writeln!(writer, "    {:?}  {}", unit.value, unit.state.to_string().dimmed());
    }
    for kind in [VariantKind::Plural, VariantKind::Device] {
        let Some(map) = localization.variant_map(kind) else {
            continue;
        };
        for (form, variant) in map {
            let _ = writeln!(
                writer,
                "    {}:{} {:?}  {}",
                kind,
                form,
                variant.unit.value,
                variant.unit.state.to_string().dimmed()
            );
        }
    }
}

fn print_show<W: Write>(summary: &ShowSummary, writer: &mut W) {
    let _ = writeln!(writer, "{}", format!("\"{}\"", summary.key).bold());
    if let Some(comment) = &summary.entry.comment {
        let _ = writeln!(writer, "  {} {}", "comment:".dimmed(), comment);
    }
    if !summary.entry.is_translatable() {
        let _ = writeln!(writer, "  {}", "do not translate".yellow());
    }

    let Some(localizations) = &summary.entry.localizations else {
        let _ = writeln!(writer, "  {}", "(no localizations)".dimmed());
        return;
    };
    for (lang, localization) in localizations {
        print_localization(
            lang,
            localization,
            *lang == summary.source_language,
            writer,
        );
    }
}

fn print_diagnostic<W: Write>(diagnostic: &Diagnostic, catalog: &str, writer: &mut W) {
    let severity = match diagnostic.severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity,
        diagnostic,
        diagnostic.rule().dimmed().cyan()
    );
    let _ = writeln!(
        writer,
        "  {} {} \"{}\"",
        "-->".blue(),
        catalog,
        diagnostic.key()
    );
    let _ = writeln!(writer);
}

fn print_check<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let catalog = summary.catalog.display().to_string();
    for diagnostic in &summary.diagnostics {
        print_diagnostic(diagnostic, &catalog, writer);
    }

    let total_errors = summary
        .diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Error)
        .count();
    let total_warnings = summary.diagnostics.len() - total_errors;

    if summary.diagnostics.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} - no issues found",
                summary.languages_checked,
                if summary.languages_checked == 1 {
                    "language"
                } else {
                    "languages"
                }
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            summary.diagnostics.len(),
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn print_edit<W: Write>(summary: &EditSummary, writer: &mut W) {
    if summary.is_dry_run {
        let _ = writeln!(writer, "{} {}", "[dry-run]".yellow(), summary.message);
        if summary.changed {
            let _ = writeln!(
                writer,
                "  {} {} was not modified",
                "note:".bold(),
                summary.catalog.display()
            );
        }
        return;
    }

    if summary.changed {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), summary.message.green());
    } else {
        let _ = writeln!(writer, "{} {}", "-".dimmed(), summary.message);
    }
}

fn print_recent<W: Write>(summary: &RecentSummary, writer: &mut W) {
    if let Some(message) = &summary.message {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
    }
    if summary.files.is_empty() {
        let _ = writeln!(writer, "{}", "No recent files".dimmed());
        return;
    }

    let width = summary.files.len().to_string().len();
    for (i, file) in summary.files.iter().enumerate() {
        let marker = if file.exists() {
            String::new()
        } else {
            format!("  {}", "(missing)".red())
        };
        let _ = writeln!(
            writer,
            "{:>width$}. {}{}",
            i + 1,
            file.display(),
            marker,
            width = width
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!(
            "{} {} already exists",
            "error:".bold().red(),
            CONFIG_FILE_NAME
        );
    }
}

// ============================================================
// Tests
// ============================================================
