//! Report values and their construction from a raw analysis response.

use serde::Deserialize;
use serde_json::Value;

use crate::client::AnalysisResponse;
use crate::core::error::{Result, SpeedcheckError};

/// A Lighthouse report for a single URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// URL as canonicalized by PSI
    pub url: String,
    /// Categories in Chrome DevTools order; empty for a failed fetch
    pub categories: Vec<Category>,
}

impl Report {
    /// Placeholder for a URL whose analysis could not be fetched.
    pub fn failed(url: String) -> Self {
        Self {
            url,
            categories: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.categories.is_empty()
    }
}

/// A category ("Performance", "Accessibility", etc.) within a report.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// e.g. "Performance"
    pub title: String,
    /// e.g. "Perf"
    pub abbrev: String,
    /// [0, 100]
    pub score: i32,
    pub audits: Vec<Audit>,
}

/// An audit (e.g. "Serve images in next-gen formats") within a category.
#[derive(Debug, Clone, PartialEq)]
pub struct Audit {
    pub title: String,
    /// [0, 100], or -1 if unset
    pub score: i32,
    /// Optional display value, e.g. "3.1 s"
    pub value: Option<String>,
    /// Tabular details about the audit; the first row holds the headings
    pub details: Option<Vec<Vec<String>>>,
}

/// Builds a [`Report`] from a raw PSI response.
///
/// Categories are emitted in the fixed Chrome DevTools order regardless of
/// how the API orders them; absent categories are skipped. An audit
/// reference that cannot be resolved against the audit map fails the whole
/// report: that indicates a schema mismatch too dangerous to paper over.
pub fn build_report(res: &AnalysisResponse) -> Result<Report> {
    let lhr = &res.lighthouse_result;
    let cats = &lhr.categories;

    let mut report = Report {
        url: res.id.clone(),
        categories: Vec::new(),
    };

    // This matches the order in Chrome DevTools.
    for raw in [
        &cats.performance,
        &cats.accessibility,
        &cats.best_practices,
        &cats.seo,
        &cats.pwa,
    ]
    .into_iter()
    .flatten()
    {
        let mut category = Category {
            title: raw.title.clone(),
            abbrev: category_abbrev(&raw.id).to_string(),
            score: score100(raw.score.as_ref()),
            audits: Vec::new(),
        };
        for audit_ref in &raw.audit_refs {
            let raw_audit = lhr.audits.get(&audit_ref.id).ok_or_else(|| {
                SpeedcheckError::Schema(format!(
                    "category {:?} is missing audit {:?}",
                    category.title, audit_ref.id
                ))
            })?;
            category.audits.push(Audit {
                title: raw_audit.title.clone(),
                score: score100(raw_audit.score.as_ref()),
                value: raw_audit.display_value.clone(),
                details: audit_details(raw_audit.details.as_ref()),
            });
        }
        report.categories.push(category);
    }

    Ok(report)
}

/// Converts a fractional score in [0, 1] to an integer in [0, 100],
/// rounding half away from zero. Returns -1 when the score is absent or
/// not a number, meaning "not scored" (distinct from 0).
pub fn score100(score: Option<&Value>) -> i32 {
    match score.and_then(Value::as_f64) {
        Some(f) => (f * 100.0).round() as i32,
        None => -1,
    }
}

/// Short abbreviation for a category id, used as a summary column heading.
fn category_abbrev(id: &str) -> &str {
    match id {
        "accessibility" => "A11Y",
        "best-practices" => "Best",
        "performance" => "Perf",
        "pwa" => "PWA",
        "seo" => "SEO",
        other => other,
    }
}

/// Tabular detail payload shape: a heading list and per-item cell maps.
#[derive(Debug, Deserialize)]
struct RawDetails {
    #[serde(default)]
    headings: Vec<RawHeading>,
    #[serde(default)]
    items: Vec<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHeading {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    item_type: Option<String>,
}

/// Tries to extract tabular data from an audit's details payload.
///
/// Returns a table whose first row holds the column headings. A payload
/// that doesn't parse as the expected shape degrades to a single cell
/// containing the raw payload text; a payload with no headings or no items
/// yields no table at all.
pub fn audit_details(raw: Option<&Value>) -> Option<Vec<Vec<String>>> {
    let raw = raw?;
    let details: RawDetails = match serde_json::from_value(raw.clone()) {
        Ok(details) => details,
        Err(_) => return Some(vec![vec![raw.to_string()]]),
    };
    if details.headings.is_empty() || details.items.is_empty() {
        return None;
    }

    // Names, item keys, and recognized units for each column.
    let mut headings = Vec::with_capacity(details.headings.len());
    let mut keys = Vec::with_capacity(details.headings.len());
    let mut units = Vec::with_capacity(details.headings.len());
    for h in &details.headings {
        let name = [h.text.as_deref(), h.label.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("");
        headings.push(name.trim().to_string());

        units.push(match h.item_type.as_deref() {
            Some(unit @ ("ms" | "bytes")) => Some(unit),
            _ => None,
        });

        keys.push(h.key.clone().unwrap_or_default());
    }

    let mut rows = vec![headings];
    for item in &details.items {
        let row = keys
            .iter()
            .zip(&units)
            .map(|(key, unit)| {
                item.get(key)
                    .map(|v| coerce_cell(v, *unit))
                    .unwrap_or_default()
            })
            .collect();
        rows.push(row);
    }

    Some(rows)
}

/// Converts one detail cell to display text. `Value` is the closed set of
/// cell shapes the API can produce, so this match is exhaustive.
fn coerce_cell(v: &Value, unit: Option<&str>) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => {
            let f = n.as_f64().unwrap_or_default();
            let mut s = format!("{f:.1}");
            if let Some(stripped) = s.strip_suffix(".0") {
                s.truncate(stripped.len());
            }
            if let Some(unit) = unit {
                s.push(' ');
                s.push_str(unit);
            }
            s
        }
        Value::Object(map) => {
            if let Some(Value::String(s)) = map.get("snippet") {
                s.clone()
            } else if let Some(Value::String(s)) = map.get("url") {
                s.clone()
            } else {
                Value::Object(map.clone()).to_string()
            }
        }
        other => other.to_string(),
    }
}
