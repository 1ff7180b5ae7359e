//! Rendering of analysis reports as plain text.

use chrono::{DateTime, Local};

use crate::core::constants::{audit_filters, layout};
use crate::core::error::{Result, SpeedcheckError};
use crate::report::Report;
use crate::table::{TableOptions, format_table};
use crate::textutil::{elide, url_path};

/// Which audits to include in the per-URL report body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditFilter {
    /// Every audit referenced by the category
    All,
    /// Audits that are scored and below 100
    #[default]
    Failed,
    /// No audits, category scores only
    None,
}

impl AuditFilter {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            audit_filters::ALL => Ok(AuditFilter::All),
            audit_filters::FAILED => Ok(AuditFilter::Failed),
            audit_filters::NONE => Ok(AuditFilter::None),
            other => Err(SpeedcheckError::InvalidArgument(format!(
                "unknown audit filter {other:?}, expected one of {:?}",
                audit_filters::ALL_FILTERS
            ))),
        }
    }

    fn includes(&self, score: i32) -> bool {
        match self {
            AuditFilter::All => true,
            AuditFilter::Failed => score >= 0 && score < 100,
            AuditFilter::None => false,
        }
    }
}

/// Knobs for report rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Print full URLs in the summary table instead of just their paths
    pub full_urls: bool,
    pub audits: AuditFilter,
    /// Line cap per detail table; `None` means unlimited, `Some(0)` drops
    /// details entirely
    pub max_detail_lines: Option<usize>,
    /// Width budget for detail cells before elision; 0 disables elision
    pub detail_width: usize,
    pub divider_len: usize,
    pub underline_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            full_urls: true,
            audits: AuditFilter::default(),
            max_detail_lines: Some(layout::DEFAULT_DETAIL_LINES as usize),
            detail_width: layout::DEFAULT_DETAIL_WIDTH,
            divider_len: layout::REPORT_DIVIDER_LEN,
            underline_len: layout::CATEGORY_UNDERLINE_LEN,
        }
    }
}

/// Renders the cross-URL summary table: one row per report with the URL
/// followed by its category scores, under a header of category
/// abbreviations. Unscored categories show as -1. Score columns follow
/// the first report that has categories; failed reports contribute a
/// URL-only row, never an omitted one.
pub fn render_summary(reports: &[Report], opts: &RenderOptions) -> Vec<String> {
    if reports.is_empty() {
        return Vec::new();
    }
    let template = reports.iter().find(|r| !r.categories.is_empty());

    let mut header = vec!["URL".to_string()];
    if let Some(template) = template {
        header.extend(template.categories.iter().map(|c| c.abbrev.clone()));
    }

    let mut rows = vec![header];
    for report in reports {
        let url = if opts.full_urls {
            report.url.clone()
        } else {
            url_path(&report.url).to_string()
        };
        let mut row = vec![url];
        row.extend(report.categories.iter().map(|c| c.score.to_string()));
        rows.push(row);
    }

    let mut table_opts = TableOptions::new(layout::TABLE_SPACING);
    let score_columns = template.map_or(0, |t| t.categories.len());
    for col in 1..=score_columns {
        table_opts = table_opts.right_align(col);
    }
    format_table(&rows, &table_opts)
}

/// Renders the full per-URL report: the URL, then each category with its
/// score, title, underline and filtered audit lines.
pub fn render_report(report: &Report, opts: &RenderOptions) -> Vec<String> {
    let mut lines = vec![report.url.clone()];

    for category in &report.categories {
        lines.push(String::new());
        lines.push(format!("{:3} {}", category.score, category.title));
        lines.push("-".repeat(opts.underline_len));

        for audit in &category.audits {
            if !opts.audits.includes(audit.score) {
                continue;
            }

            let score = if audit.score >= 0 {
                format!("{:3}", audit.score)
            } else {
                "  .".to_string()
            };
            let suffix = match audit.value {
                Some(ref value) if !value.is_empty() => format!(": {value}"),
                _ => String::new(),
            };
            lines.push(format!("{score} {}{suffix}", audit.title));

            if matches!(opts.max_detail_lines, Some(0)) {
                continue;
            }
            if let Some(ref details) = audit.details {
                let details = if opts.detail_width > 0 {
                    details
                        .iter()
                        .map(|row| row.iter().map(|c| elide(c, opts.detail_width)).collect())
                        .collect()
                } else {
                    details.clone()
                };
                let mut table_opts = TableOptions::new(layout::TABLE_SPACING);
                if let Some(max) = opts.max_detail_lines {
                    table_opts = table_opts.max_lines(max);
                }
                for line in format_table(&details, &table_opts) {
                    lines.push(format!("    {line}"));
                }
            }
        }
    }

    lines
}

/// Renders every report, each preceded by a divider line and a blank line.
pub fn render_reports(reports: &[Report], opts: &RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        lines.push("=".repeat(opts.divider_len));
        lines.push(String::new());
        lines.extend(render_report(report, opts));
    }
    lines
}

/// Renders the trailing attribution line.
pub fn render_footer(when: DateTime<Local>) -> String {
    format!(
        "Generated by {}/{} at {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        when.to_rfc2822()
    )
}
