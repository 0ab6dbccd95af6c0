//! Cross-platform insight aggregation

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::info;
use tracing::warn;

use super::extractor::ExtractionReport;
use super::extractor::PlatformExtractor;
use super::extractor::TokenPools;
use super::sources::SourceTable;
use crate::errors::ExtractionIssue;
use crate::models::Platform;
use crate::models::RecordTable;
use crate::store::TableStore;
use crate::text::TextNormalizer;

/// A theme needs strictly more occurrences than this
pub const THEME_SUPPORT_THRESHOLD: usize = 3;

const INSIGHT_HEADER: &str = "--- Data-Driven Content Optimization Insights ---";
const INSIGHT_FOOTER: &str = "--------------------------------------------------";

/// Token counts that remember first-seen order for tie-breaking
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for token in tokens {
            table.add(token.as_ref());
        }
        table
    }

    pub fn add(&mut self, token: &str) {
        if let Some(&slot) = self.index.get(token) {
            self.counts[slot].1 += 1;
        } else {
            self.index.insert(token.to_string(), self.counts.len());
            self.counts.push((token.to_string(), 1));
        }
    }

    pub fn count(&self, token: &str) -> usize {
        self.index.get(token).map_or(0, |&slot| self.counts[slot].1)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Up to `n` distinct tokens by descending count, ties in first-seen order
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// Top keywords and themes derived from the token pools.
///
/// Keywords and themes are each distinct and never share a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Insight {
    top_keywords: Vec<String>,
    top_themes: Vec<String>,
}

impl Insight {
    pub fn from_pools(pools: &TokenPools, num_keywords: usize, num_themes: usize) -> Self {
        let keyword_counts = FrequencyTable::from_tokens(&pools.keywords);
        let theme_counts = FrequencyTable::from_tokens(&pools.themes);

        let top_keywords: Vec<String> = keyword_counts
            .most_common(num_keywords)
            .into_iter()
            .map(|(token, _)| token.to_string())
            .collect();

        let top_themes: Vec<String> = theme_counts
            .most_common(num_themes.saturating_mul(2))
            .into_iter()
            .filter(|(_, count)| *count > THEME_SUPPORT_THRESHOLD)
            .map(|(token, _)| token)
            .filter(|token| !top_keywords.iter().any(|k| k.as_str() == *token))
            .take(num_themes)
            .map(str::to_string)
            .collect();

        Self {
            top_keywords,
            top_themes,
        }
    }

    pub fn top_keywords(&self) -> &[String] {
        &self.top_keywords
    }

    pub fn top_themes(&self) -> &[String] {
        &self.top_themes
    }

    pub fn is_empty(&self) -> bool {
        self.top_keywords.is_empty() && self.top_themes.is_empty()
    }

    /// Multi-line summary handed to the content generator
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(INSIGHT_HEADER);
        out.push('\n');
        if !self.top_keywords.is_empty() {
            out.push_str(&format!(
                "Based on recent trends and high engagement, consider these effective keywords: {}\n",
                self.top_keywords.join(", ")
            ));
        }
        if !self.top_themes.is_empty() {
            out.push_str(&format!(
                "Popular themes and topics that resonate with the audience: {}\n",
                self.top_themes.join(", ")
            ));
        }
        if self.is_empty() {
            out.push_str("No significant optimization insights found from available data.\n");
        }
        out.push_str(INSIGHT_FOOTER);
        out
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Parameters for one aggregation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightRequest {
    pub platform: Option<Platform>,
    pub num_keywords: usize,
    pub num_themes: usize,
    pub stem: bool,
}

impl Default for InsightRequest {
    fn default() -> Self {
        Self {
            platform: None,
            num_keywords: 5,
            num_themes: 3,
            stem: true,
        }
    }
}

/// Insight plus per-worksheet extraction reports
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    pub insight: Insight,
    pub reports: Vec<ExtractionReport>,
}

/// Merges per-platform token pools into a single [`Insight`]
pub struct InsightAggregator<'a> {
    normalizer: &'a TextNormalizer,
    sources: &'a [SourceTable],
    engagement_sample_size: usize,
}

impl<'a> InsightAggregator<'a> {
    pub fn new(
        normalizer: &'a TextNormalizer,
        sources: &'a [SourceTable],
        engagement_sample_size: usize,
    ) -> Self {
        Self {
            normalizer,
            sources,
            engagement_sample_size,
        }
    }

    /// Sources consulted for a request, in catalogue order
    pub fn selected_sources(&self, platform: Option<Platform>) -> Vec<&'a SourceTable> {
        self.sources
            .iter()
            .filter(|s| platform.map_or(true, |p| s.platform == p))
            .collect()
    }

    /// Read every selected worksheet from `store` and aggregate.
    ///
    /// Read-only. A worksheet that cannot be read counts as empty.
    pub async fn aggregate<S>(
        &self,
        store: &S,
        spreadsheet: &str,
        request: &InsightRequest,
    ) -> AggregateOutcome
    where
        S: TableStore + ?Sized,
    {
        info!("Analyzing worksheets for optimization insights");
        let mut tables = Vec::new();
        for source in self.selected_sources(request.platform) {
            let table = match store.read_table(spreadsheet, &source.worksheet).await {
                Ok(table) => table,
                Err(e) => {
                    warn!("[{}] failed to read '{}': {}", source.platform, source.worksheet, e);
                    RecordTable::default()
                }
            };
            tables.push((source, table));
        }
        self.aggregate_tables(&tables, request)
    }

    /// Aggregate worksheets that were already read
    pub fn aggregate_tables(
        &self,
        tables: &[(&SourceTable, RecordTable)],
        request: &InsightRequest,
    ) -> AggregateOutcome {
        let extractor = PlatformExtractor::new(self.normalizer, self.engagement_sample_size);
        let mut pools = TokenPools::default();
        let mut reports = Vec::with_capacity(tables.len());

        for (source, table) in tables {
            if request.platform.is_some_and(|p| p != source.platform) {
                continue;
            }
            let extraction = extractor.extract(table, source, request.stem);
            info!(
                "  Processed {} rows from {} ({})",
                extraction.report.rows, source.worksheet, source.platform
            );
            pools.append(extraction.pools);
            reports.push(extraction.report);
        }

        let insight = Insight::from_pools(&pools, request.num_keywords, request.num_themes);
        let empty_tables = reports
            .iter()
            .filter(|r| {
                r.issues
                    .iter()
                    .any(|i| matches!(i, ExtractionIssue::EmptyInput { .. }))
            })
            .count();
        info!(
            "Finished analyzing data: {} keywords, {} themes ({} of {} worksheets empty)",
            insight.top_keywords.len(),
            insight.top_themes.len(),
            empty_tables,
            reports.len()
        );

        AggregateOutcome { insight, reports }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::sources::default_sources;
    use crate::models::CellValue;

    fn pools(keywords: &[&str], themes: &[&str]) -> TokenPools {
        TokenPools {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            themes: themes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_top_keywords_by_frequency() {
        let insight = Insight::from_pools(
            &pools(&["ai", "ai", "ai", "phone", "phone", "car"], &[]),
            2,
            3,
        );
        assert_eq!(insight.top_keywords(), ["ai", "phone"]);
        assert!(insight.top_themes().is_empty());
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let insight = Insight::from_pools(&pools(&["zeta", "alpha", "zeta", "alpha", "mid"], &[]), 3, 1);
        assert_eq!(insight.top_keywords(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_theme_threshold_is_strict() {
        let mut themes = vec!["launch"; 4];
        themes.extend(["trend"; 2]);
        themes.extend(["promo"; 3]);
        let insight = Insight::from_pools(&pools(&[], &themes), 5, 2);
        assert_eq!(insight.top_themes(), ["launch"]);
    }

    #[test]
    fn test_themes_exclude_keywords_and_cap() {
        let mut themes = vec!["camera"; 9];
        themes.extend(["battery"; 8]);
        themes.extend(["screen"; 7]);
        themes.extend(["price"; 6]);
        let insight = Insight::from_pools(&pools(&["camera"], &themes), 5, 2);
        assert_eq!(insight.top_keywords(), ["camera"]);
        assert_eq!(insight.top_themes(), ["battery", "screen"]);
    }

    #[test]
    fn test_candidate_window_is_twice_num_themes() {
        // the only supported non-keyword theme sits outside the 2 * num_themes window
        let mut themes = vec!["alpha"; 9];
        themes.extend(["bravo"; 8]);
        themes.extend(["charlie"; 7]);
        let insight = Insight::from_pools(&pools(&["alpha", "bravo"], &themes), 2, 1);
        assert!(insight.top_themes().is_empty());
    }

    #[test]
    fn test_render_branches() {
        let empty = Insight::default();
        let text = empty.render();
        assert!(text.starts_with(INSIGHT_HEADER));
        assert!(text.contains("No significant optimization insights found"));
        assert!(text.ends_with(INSIGHT_FOOTER));

        let keywords_only = Insight::from_pools(&pools(&["drone"], &[]), 3, 3);
        let text = keywords_only.render();
        assert!(text.contains("effective keywords: drone"));
        assert!(!text.contains("Popular themes"));
        assert!(!text.contains("No significant"));

        let both = Insight::from_pools(&pools(&["drone"], &["gimbal"; 4]), 3, 3);
        let text = both.to_string();
        assert!(text.contains("effective keywords: drone"));
        assert!(text.contains("resonate with the audience: gimbal"));
    }

    #[test]
    fn test_platform_filter() {
        let normalizer = TextNormalizer::default();
        let sources = default_sources();
        let aggregator = InsightAggregator::new(&normalizer, &sources, 50);

        let twitter = RecordTable::from_rows(&["Tweet"], vec![vec!["#Gadget drop".into()]]);
        let reddit = RecordTable::from_rows(&["title"], vec![vec![CellValue::from("Laptop deals")]]);
        let tables = vec![
            (&sources[1], twitter),
            (&sources[3], reddit),
        ];

        let request = InsightRequest {
            platform: Some(Platform::Reddit),
            num_keywords: 5,
            num_themes: 3,
            stem: false,
        };
        let outcome = aggregator.aggregate_tables(&tables, &request);
        assert_eq!(outcome.insight.top_keywords(), ["laptop", "deals"]);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(aggregator.selected_sources(Some(Platform::Twitter)).len(), 1);
        assert_eq!(aggregator.selected_sources(None).len(), sources.len());
    }
}
