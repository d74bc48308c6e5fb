// File: ./src/loader.rs
//! Turns an events file into resolved [`Event`]s for one context year.
//!
//! Each non-blank, non-comment line has the shape
//! `<date-rule>;[<category>,<fg>,<bg>,<emoji>] <description>`. A bad line never
//! aborts the load: it is reported as a [`LineDiagnostic`] and dropped. The
//! parsing entry points ([`EventLoader::parse_str`]) are pure and return the
//! diagnostics; only the file-level entry points log them.
use crate::color_utils::Palette;
use crate::dates::normalized_date;
use crate::error::{LineError, LoadError, RuleError};
use crate::model::{Decoration, Event, ResolvedOccurrence, classify, decorate, resolve};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The line was dropped.
    Skipped(LineError),
    /// The description had no `[...]` tag; the event was kept with defaults.
    Untagged(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// 1-based line number in the source text.
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::Skipped(err) => write!(f, "line {}: {}", self.line, err),
            DiagnosticKind::Untagged(desc) => write!(
                f,
                "line {}: event description format unexpected, treating as plain description: {}",
                self.line, desc
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub events: Vec<Event>,
    pub diagnostics: Vec<LineDiagnostic>,
}

impl LoadReport {
    /// Emit every diagnostic as a warning, prefixed with `source`.
    pub fn log_diagnostics(&self, source: &str) {
        for diag in &self.diagnostics {
            log::warn!("{}: {}", source, diag);
        }
    }

    pub fn skipped_lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::Skipped(_)))
            .map(|d| d.line)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EventLoader {
    default_fg: Palette,
}

impl EventLoader {
    pub fn new(default_fg: Palette) -> Self {
        Self { default_fg }
    }

    /// Parse events-file text for `context_year`. Never fails.
    pub fn parse_str(&self, text: &str, context_year: i32) -> LoadReport {
        let mut report = LoadReport::default();
        for (idx, raw) in text.lines().enumerate() {
            self.parse_line(idx + 1, raw, context_year, &mut report);
        }
        report
    }

    /// Like [`EventLoader::parse_str`], for raw file contents. A line that is
    /// not valid UTF-8 is skipped with a diagnostic; the rest still load.
    pub fn parse_bytes(&self, bytes: &[u8], context_year: i32) -> LoadReport {
        let mut report = LoadReport::default();
        for (idx, chunk) in bytes.split(|b| *b == b'\n').enumerate() {
            let line_no = idx + 1;
            let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
            match std::str::from_utf8(chunk) {
                Ok(raw) => self.parse_line(line_no, raw, context_year, &mut report),
                Err(_) => report.diagnostics.push(LineDiagnostic {
                    line: line_no,
                    kind: DiagnosticKind::Skipped(LineError::InvalidUtf8(
                        String::from_utf8_lossy(chunk).trim().to_string(),
                    )),
                }),
            }
        }
        report
    }

    fn parse_line(&self, line_no: usize, raw: &str, context_year: i32, report: &mut LoadReport) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let Some((rule_text, rest)) = line.split_once(';') else {
            report.diagnostics.push(LineDiagnostic {
                line: line_no,
                kind: DiagnosticKind::Skipped(LineError::Malformed(line.to_string())),
            });
            return;
        };
        let rule_text = rule_text.trim();

        let decoration = decorate(rest, self.default_fg);
        if !decoration.tagged {
            report.diagnostics.push(LineDiagnostic {
                line: line_no,
                kind: DiagnosticKind::Untagged(decoration.description.clone()),
            });
        }

        match build_event(rule_text, decoration, context_year) {
            Ok(Some(event)) => report.events.push(event),
            Ok(None) => {}
            Err(source) => report.diagnostics.push(LineDiagnostic {
                line: line_no,
                kind: DiagnosticKind::Skipped(LineError::Rule {
                    rule: rule_text.to_string(),
                    source,
                }),
            }),
        }
    }

    /// Read and parse `path`. A missing file yields an empty report.
    pub fn load_report(&self, path: &Path, context_year: i32) -> Result<LoadReport, LoadError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "Events file '{}' not found. No events will be loaded.",
                    path.display()
                );
                return Ok(LoadReport::default());
            }
            Err(source) => {
                return Err(LoadError::FileAccess {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let report = self.parse_bytes(&bytes, context_year);
        log::debug!(
            "Loaded {} events for {} from '{}' ({} diagnostics)",
            report.events.len(),
            context_year,
            path.display(),
            report.diagnostics.len()
        );
        Ok(report)
    }

    /// Read `path`, log per-line diagnostics and return the events.
    pub fn load(&self, path: &Path, context_year: i32) -> Result<Vec<Event>, LoadError> {
        let report = self.load_report(path, context_year)?;
        report.log_diagnostics(&path.display().to_string());
        Ok(report.events)
    }
}

/// Load events from `path` for `context_year` with the default palette.
pub fn load_events(path: impl AsRef<Path>, context_year: i32) -> Result<Vec<Event>, LoadError> {
    EventLoader::default().load(path.as_ref(), context_year)
}

/// Classify, resolve and reconcile one rule. `Ok(None)` means the rule is
/// pinned to another year and has no occurrence in `context_year`.
fn build_event(
    rule_text: &str,
    decoration: Decoration,
    context_year: i32,
) -> Result<Option<Event>, RuleError> {
    let rule = classify(rule_text)?;
    let occurrence = resolve(&rule, context_year)?;

    let Some((date, is_annual, is_anniversary)) =
        reconcile(&occurrence, &decoration, context_year)?
    else {
        return Ok(None);
    };

    Ok(Some(Event {
        date,
        original_rule: rule_text.to_string(),
        description: decoration.description,
        category: decoration.category,
        is_annual,
        is_anniversary,
        anniversary_base: occurrence.anniversary_base,
        recurrence_rule: (!rule.is_absolute()).then(|| rule_text.to_string()),
        specific_year_rule: occurrence.specific_year_in_rule,
        fg: decoration.fg,
        bg: decoration.bg,
        emoji: decoration.emoji,
    }))
}

/// Applies, in order: anniversary re-dating, annual year re-stamping, and
/// hiding of year-pinned rules outside their year.
fn reconcile(
    occ: &ResolvedOccurrence,
    decoration: &Decoration,
    context_year: i32,
) -> Result<Option<(NaiveDate, bool, bool)>, RuleError> {
    if decoration.category.is_anniversary_like()
        && occ.is_anniversary_candidate
        && let Some(base) = occ.anniversary_base
    {
        let date = normalized_date(context_year, base.month(), base.day())?;
        return Ok(Some((date, true, true)));
    }

    if occ.is_annual && occ.date.year() != context_year {
        let date = normalized_date(context_year, occ.date.month(), occ.date.day())?;
        return Ok(Some((date, true, false)));
    }

    if occ.specific_year_in_rule && occ.date.year() != context_year {
        return Ok(None);
    }

    Ok(Some((occ.date, occ.is_annual, false)))
}
