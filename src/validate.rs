//! Checks post files for the problems that would break or degrade the
//! generated index: missing DOCTYPE, title, required meta tags, and bad dates
//! are errors; naming and length issues are warnings.

use crate::build::{find_post_files, Error};
use crate::config::{Config, Rules};
use crate::extract::*;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static DOCTYPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*<!doctype\s+html\b").expect("valid regex"));

/// The findings for a single post file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The checked file's name.
    pub file: String,

    /// Problems that make the post unusable or wrong in the index.
    pub errors: Vec<String>,

    /// Problems worth fixing that don't break the index.
    pub warnings: Vec<String>,
}

impl Report {
    /// Reports whether the file passed with neither errors nor warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// How [`render_reports`] lays out its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `file: error: message` lines.
    Text,

    /// An HTML `<ul>` with every message escaped for display.
    Html,
}

/// Runs every check against one post's HTML.
pub fn validate_post(file_name: &str, html: &str, rules: &Rules) -> Report {
    let mut report = Report {
        file: file_name.to_owned(),
        ..Report::default()
    };

    if !DOCTYPE_REGEX.is_match(html.trim_start_matches('\u{feff}')) {
        report.errors.push("missing <!DOCTYPE html>".to_owned());
    }

    match extract_title(html) {
        None => report.errors.push("no title found".to_owned()),
        Some(title) => check_length(&mut report, "title", &title, rules.title_min, rules.title_max),
    }

    for name in &rules.required_meta {
        if extract_meta_tag(html, name).map_or(true, |v| v.is_empty()) {
            report
                .errors
                .push(format!("missing required meta tag: {}", name));
        }
    }

    if let Some(description) = extract_meta_tag(html, "description") {
        check_length(&mut report, "description", &description, 0, rules.description_max);
    }

    let meta_date = extract_meta_tag(html, "date").filter(|date| !date.is_empty());
    if let Some(date) = &meta_date {
        if !is_valid_calendar_date(date) {
            report
                .errors
                .push(format!("invalid date in meta tag: {}", date));
        }
    }

    match extract_leading_date(file_name) {
        None => report
            .warnings
            .push("filename does not start with YYYY-MM-DD".to_owned()),
        Some(date) if !is_valid_calendar_date(&date) => report.warnings.push(format!(
            "filename date is not a valid calendar date: {}",
            date
        )),
        Some(date) => {
            if post_slug(file_name).is_none() {
                report
                    .warnings
                    .push("filename has no slug after the date".to_owned());
            }
            match meta_date {
                Some(meta) if is_valid_calendar_date(&meta) && meta != date => {
                    report.warnings.push(format!(
                        "filename date {} does not match meta date {}",
                        date, meta
                    ))
                }
                _ => {}
            }
        }
    }

    report
}

fn check_length(report: &mut Report, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min {
        report
            .warnings
            .push(format!("{} is too short ({} < {})", field, len, min));
    } else if len > max {
        report
            .warnings
            .push(format!("{} is too long ({} > {})", field, len, max));
    }
}

/// Validates every post file the generator would index, in file-name order.
pub fn validate_directory(config: &Config) -> Result<Vec<Report>, Error> {
    let mut reports = Vec::new();
    for file in find_post_files(config)? {
        let html = file.read()?;
        let report = validate_post(&file.file_name, &html, &config.rules);
        debug!(
            "`{}`: {} errors, {} warnings",
            report.file,
            report.errors.len(),
            report.warnings.len()
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Totals across a set of [`Report`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of files checked.
    pub files: usize,

    /// Total errors across all files.
    pub errors: usize,

    /// Total warnings across all files.
    pub warnings: usize,
}

impl Summary {
    /// Adds up the findings in `reports`.
    pub fn of(reports: &[Report]) -> Summary {
        reports.iter().fold(Summary::default(), |acc, r| Summary {
            files: acc.files + 1,
            errors: acc.errors + r.errors.len(),
            warnings: acc.warnings + r.warnings.len(),
        })
    }

    /// The process exit status: 1 when there are errors, or warnings under
    /// `strict`; 0 otherwise.
    pub fn exit_code(&self, strict: bool) -> i32 {
        match self.errors > 0 || (strict && self.warnings > 0) {
            true => 1,
            false => 0,
        }
    }
}

/// Renders reports and a trailing summary line.
pub fn render_reports(reports: &[Report], format: Format) -> String {
    let summary = Summary::of(reports);
    let totals = format!(
        "{} files checked, {} errors, {} warnings",
        summary.files, summary.errors, summary.warnings
    );
    let messages = reports.iter().flat_map(|r| {
        r.errors
            .iter()
            .map(move |m| (r.file.as_str(), "error", m.as_str()))
            .chain(
                r.warnings
                    .iter()
                    .map(move |m| (r.file.as_str(), "warning", m.as_str())),
            )
    });

    let mut out = String::new();
    match format {
        Format::Text => {
            for (file, level, message) in messages {
                out.push_str(&format!("{}: {}: {}\n", file, level, message));
            }
            out.push_str(&totals);
            out.push('\n');
        }
        Format::Html => {
            out.push_str("<ul>\n");
            for (file, level, message) in messages {
                out.push_str(&format!(
                    "<li class=\"{}\">{}: {}</li>\n",
                    level,
                    escape_for_display(Some(file)),
                    escape_for_display(Some(message))
                ));
            }
            out.push_str("</ul>\n<p>");
            out.push_str(&escape_html(&totals));
            out.push_str("</p>\n");
        }
    }
    out
}
