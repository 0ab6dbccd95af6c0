//! Token extraction from a single worksheet
//!
//! Every pass is non-fatal: a missing column or an empty worksheet adds an
//! [`ExtractionIssue`] to the report and contributes no tokens.

use std::cmp::Ordering;

use tracing::debug;
use tracing::warn;

use super::sources::SourceTable;
use crate::errors::ExtractionIssue;
use crate::models::CellValue;
use crate::models::Platform;
use crate::models::RecordTable;
use crate::text::TextNormalizer;

/// Number of top-engagement rows re-sampled into the theme pool
pub const DEFAULT_ENGAGEMENT_SAMPLE_SIZE: usize = 50;

/// Keyword and theme token pools.
///
/// Duplicates are kept: token frequency is the signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPools {
    pub keywords: Vec<String>,
    pub themes: Vec<String>,
}

impl TokenPools {
    pub fn append(&mut self, other: TokenPools) {
        self.keywords.extend(other.keywords);
        self.themes.extend(other.themes);
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.themes.is_empty()
    }
}

/// What happened while reading one worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub platform: Platform,
    pub worksheet: String,
    pub rows: usize,
    pub keyword_tokens: usize,
    pub theme_tokens: usize,
    pub resampled_rows: usize,
    pub issues: Vec<ExtractionIssue>,
}

impl ExtractionReport {
    fn new(source: &SourceTable, rows: usize) -> Self {
        Self {
            platform: source.platform,
            worksheet: source.worksheet.clone(),
            rows,
            keyword_tokens: 0,
            theme_tokens: 0,
            resampled_rows: 0,
            issues: Vec::new(),
        }
    }

    pub fn skipped(&self) -> bool {
        self.keyword_tokens == 0 && self.theme_tokens == 0
    }

    fn record(&mut self, issue: ExtractionIssue) {
        warn!("[{}] {}", self.platform, issue);
        self.issues.push(issue);
    }
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub pools: TokenPools,
    pub report: ExtractionReport,
}

/// Pulls keyword and theme tokens out of worksheets
pub struct PlatformExtractor<'a> {
    normalizer: &'a TextNormalizer,
    engagement_sample_size: usize,
}

impl<'a> PlatformExtractor<'a> {
    pub fn new(normalizer: &'a TextNormalizer, engagement_sample_size: usize) -> Self {
        Self {
            normalizer,
            engagement_sample_size,
        }
    }

    /// Extract both token pools from `table` according to `source`.
    ///
    /// Pool order is fixed: declared fields first, then hashtags, then the
    /// engagement-weighted resample.
    pub fn extract(&self, table: &RecordTable, source: &SourceTable, stem: bool) -> Extraction {
        let mut report = ExtractionReport::new(source, table.len());
        let mut pools = TokenPools::default();

        if table.is_empty() {
            report.record(ExtractionIssue::EmptyInput {
                worksheet: source.worksheet.clone(),
            });
            return Extraction { pools, report };
        }

        for field in &source.fields {
            let Some(column) = table.resolve_column(&field.columns) else {
                report.record(ExtractionIssue::MissingColumn {
                    worksheet: source.worksheet.clone(),
                    column: field.name.clone(),
                });
                continue;
            };
            debug!("[{}] reading '{}' from column '{}'", source.platform, field.name, column);
            let shadowed: Vec<&str> = field
                .columns
                .iter()
                .map(String::as_str)
                .filter(|c| *c != column && table.has_column(c))
                .collect();
            if !shadowed.is_empty() {
                debug!(
                    "[{}] '{}' also present as {:?}; using '{}'",
                    source.platform, field.name, shadowed, column
                );
            }

            for value in table.column_values(column) {
                let tokens = self.normalizer.normalize_value(value, stem);
                if field.keywords {
                    pools.keywords.extend(tokens.iter().cloned());
                }
                if field.themes {
                    pools.themes.extend(tokens);
                }
            }
        }

        if let Some(column) = &source.hashtag_column {
            if table.has_column(column) {
                for text in table.column_values(column).filter_map(CellValue::as_text) {
                    pools.keywords.extend(self.normalizer.hashtags(text, stem));
                }
            } else {
                report.record(ExtractionIssue::MissingColumn {
                    worksheet: source.worksheet.clone(),
                    column: column.clone(),
                });
            }
        }

        let resampled = self.engagement_weighted_resample(table, source, stem, &mut report);
        pools.themes.extend(resampled);

        report.keyword_tokens = pools.keywords.len();
        report.theme_tokens = pools.themes.len();
        debug!(
            "[{}] {} rows -> {} keyword tokens, {} theme tokens",
            source.platform, report.rows, report.keyword_tokens, report.theme_tokens
        );

        Extraction { pools, report }
    }

    /// Theme tokens from the top rows by engagement metric.
    ///
    /// These rows were already counted by the field pass; counting them a
    /// second time biases themes toward well-received content. Rows with a
    /// missing or non-numeric metric rank last.
    pub fn engagement_weighted_resample(
        &self,
        table: &RecordTable,
        source: &SourceTable,
        stem: bool,
        report: &mut ExtractionReport,
    ) -> Vec<String> {
        let Some(engagement) = &source.engagement else {
            return Vec::new();
        };
        if !table.has_column(&engagement.metric) {
            debug!(
                "[{}] no '{}' column, skipping engagement resample",
                source.platform, engagement.metric
            );
            return Vec::new();
        }
        let Some(column) = source
            .field(&engagement.field)
            .and_then(|field| table.resolve_column(&field.columns))
        else {
            return Vec::new();
        };

        let mut malformed = 0;
        let mut ranked: Vec<(f64, &CellValue)> = table
            .rows
            .iter()
            .map(|row| {
                let metric = row.get(&engagement.metric);
                let score = metric.and_then(CellValue::as_f64).unwrap_or_else(|| {
                    if metric.is_some_and(|m| !m.is_empty()) {
                        malformed += 1;
                    }
                    f64::NEG_INFINITY
                });
                (score, row.get(column).unwrap_or(&CellValue::Empty))
            })
            .collect();

        if malformed > 0 {
            report.record(ExtractionIssue::MalformedValue {
                worksheet: source.worksheet.clone(),
                column: engagement.metric.clone(),
                count: malformed,
            });
        }

        // Stable sort keeps worksheet order among equal scores.
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        ranked.truncate(self.engagement_sample_size);
        report.resampled_rows = ranked.len();

        ranked
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .flat_map(|(_, value)| self.normalizer.normalize_value(value, stem))
            .collect()
    }
}
