//! Ingestion and cleaning of the raw review table
//!
//! The crawler delivers untrusted rows: scores may be missing, dates are
//! free text, and add-on-content reviews share the listing with full-game
//! reviews. This stage filters the table down to modelable rows. Malformed
//! rows are dropped silently and counted per category — a bad row must
//! never abort the batch.

use crate::types::{FilterOrder, PipelineConfig, RawReview, Review};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Per-category drop counters for one ingestion run.
///
/// `kept + total_dropped()` equals the input row count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Input row count
    pub input_rows: usize,
    /// Rows dropped for a missing score
    pub missing_score: usize,
    /// Rows dropped as add-on-content reviews (URL pattern match)
    pub addon_content: usize,
    /// Rows dropped because no plausible year could be parsed
    pub bad_year: usize,
    /// Rows dropped as pre-release noise (year below the configured minimum)
    pub pre_release: usize,
    /// Rows dropped as duplicate URLs
    pub duplicate_url: usize,
    /// Rows surviving all filters
    pub kept: usize,
}

impl IngestReport {
    /// Total rows dropped across all categories.
    pub fn total_dropped(&self) -> usize {
        self.missing_score
            + self.addon_content
            + self.bad_year
            + self.pre_release
            + self.duplicate_url
    }
}

/// Clean the raw review table.
///
/// Filters applied (order of dedup vs. content filters follows
/// `config.filter_order`):
///
/// - drop rows with a missing score;
/// - drop rows whose URL matches the add-on-content pattern;
/// - parse a 4-digit year from the free-text date, dropping rows without one;
/// - drop rows published before `config.min_year`;
/// - deduplicate by URL, keeping the first occurrence;
/// - canonicalize curly apostrophes in text and title.
pub fn clean(raw: Vec<RawReview>, config: &PipelineConfig) -> (Vec<Review>, IngestReport) {
    let mut report = IngestReport {
        input_rows: raw.len(),
        ..IngestReport::default()
    };

    let rows = match config.filter_order {
        FilterOrder::DedupFirst => {
            let rows = dedup_by_url(raw, |r| r.url.as_str(), &mut report);
            content_filter(rows, config, &mut report)
        }
        FilterOrder::FiltersFirst => {
            let rows = content_filter(raw, config, &mut report);
            dedup_by_url(rows, |r| r.url.as_str(), &mut report)
        }
    };

    report.kept = rows.len();
    (rows, report)
}

/// Keep the first occurrence of each URL, counting the rest as duplicates.
fn dedup_by_url<T>(
    rows: Vec<T>,
    url: impl Fn(&T) -> &str,
    report: &mut IngestReport,
) -> Vec<T> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    rows.into_iter()
        .filter(|row| {
            if seen.insert(url(row).to_string()) {
                true
            } else {
                report.duplicate_url += 1;
                false
            }
        })
        .collect()
}

fn content_filter(
    raw: Vec<RawReview>,
    config: &PipelineConfig,
    report: &mut IngestReport,
) -> Vec<Review> {
    let mut out = Vec::with_capacity(raw.len());

    for row in raw {
        let score = match row.score {
            Some(s) => s,
            None => {
                report.missing_score += 1;
                continue;
            }
        };

        if row.url.contains(&config.addon_url_pattern) {
            report.addon_content += 1;
            continue;
        }

        let year = match parse_year(&row.date) {
            Some(y) => y,
            None => {
                report.bad_year += 1;
                continue;
            }
        };

        if year < config.min_year {
            report.pre_release += 1;
            continue;
        }

        out.push(Review {
            game: canonicalize_apostrophes(&row.game),
            author: row.author,
            text: canonicalize_apostrophes(&row.text),
            year,
            raw_score: score,
            url: row.url,
        });
    }

    out
}

/// Extract the first plausible 4-digit year from a free-text date.
///
/// A run of exactly four ASCII digits (not embedded in a longer digit run)
/// in 1990..=2099 is taken as the year.
pub fn parse_year(date: &str) -> Option<i32> {
    let bytes = date.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i - start == 4 {
                // Guaranteed valid: four ASCII digits.
                let year: i32 = date[start..i].parse().ok()?;
                if (1990..=2099).contains(&year) {
                    return Some(year);
                }
            }
        } else {
            i += 1;
        }
    }

    None
}

/// Replace curly and backtick apostrophes with the straight ASCII form.
///
/// Negation-set and title matching are exact string comparisons, so the
/// apostrophe form must be unified before any lookup.
pub fn canonicalize_apostrophes(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}', '\u{02BC}', '`'], "'")
}
