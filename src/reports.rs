//! Sentiment summaries and negative-sentiment alerts
//!
//! Scores and labels are read from columns an upstream scorer already wrote
//! into the worksheets; nothing here computes sentiment.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::errors::ExtractionIssue;
use crate::models::CellValue;
use crate::models::RecordTable;
use crate::notifier::Notifier;
use crate::store::TableStore;

pub const DEFAULT_LABEL_COLUMN: &str = "sentiment_label";
pub const DEFAULT_SCORE_COLUMN: &str = "sentiment_score";
pub const DEFAULT_REPORT_CHANNEL: &str = "#marketing-reports";
pub const DEFAULT_ALERT_CHANNEL: &str = "#marketing-alerts";

const TOP_ITEMS: usize = 3;
const MAX_ITEM_CHARS: usize = 100;

/// Columns holding the stored sentiment label and score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentColumns {
    pub label: String,
    pub score: String,
}

impl Default for SentimentColumns {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL_COLUMN.to_string(),
            score: DEFAULT_SCORE_COLUMN.to_string(),
        }
    }
}

/// A worksheet to summarize and where to post the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTarget {
    pub worksheet: String,
    /// Column quoted in the top positive/negative items
    pub text_column: String,
    #[serde(default = "default_report_channel")]
    pub channel: String,
}

/// Alert when at least `min_count` rows are labelled Negative with a score
/// strictly below `negative_threshold`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub worksheet: String,
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f64,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    #[serde(default = "default_alert_channel")]
    pub channel: String,
}

fn default_report_channel() -> String {
    DEFAULT_REPORT_CHANNEL.to_string()
}

fn default_alert_channel() -> String {
    DEFAULT_ALERT_CHANNEL.to_string()
}

fn default_negative_threshold() -> f64 {
    -0.5
}

fn default_min_count() -> usize {
    5
}

pub fn default_report_targets() -> Vec<ReportTarget> {
    [
        ("Twitter_marketing_tweets", "Tweet"),
        ("YouTube_Product_Content", "title"),
        ("Reddit_Product_Content", "selftext"),
    ]
    .into_iter()
    .map(|(worksheet, text_column)| ReportTarget {
        worksheet: worksheet.to_string(),
        text_column: text_column.to_string(),
        channel: default_report_channel(),
    })
    .collect()
}

pub fn default_alert_rules() -> Vec<AlertRule> {
    [
        ("Twitter_marketing_tweets", -0.3, 5),
        ("YouTube_Product_Content", -0.4, 3),
        ("Reddit_Product_Content", -0.5, 2),
    ]
    .into_iter()
    .map(|(worksheet, negative_threshold, min_count)| AlertRule {
        worksheet: worksheet.to_string(),
        negative_threshold,
        min_count,
        channel: default_alert_channel(),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentItem {
    pub text: String,
    pub score: f64,
}

/// Summary of one worksheet's stored sentiment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub worksheet: String,
    /// Rows with a numeric score
    pub total: usize,
    pub average_score: f64,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    pub top_positive: Vec<SentimentItem>,
    pub top_negative: Vec<SentimentItem>,
    /// Rows skipped because the score was missing or not numeric
    pub dropped_rows: usize,
}

impl SentimentReport {
    pub fn render(&self) -> String {
        let mut out = format!(
            "📊 *Sentiment Report for {}*\n\
             \x20  - Total analyzed items: `{}`\n\
             \x20  - Average sentiment score: `{:.2}` (Range: -1 to 1)\n\
             \x20  - Positive: `{:.1}%`\n\
             \x20  - Negative: `{:.1}%`\n\
             \x20  - Neutral: `{:.1}%`\n",
            display_name(&self.worksheet),
            self.total,
            self.average_score,
            self.positive_pct,
            self.negative_pct,
            self.neutral_pct
        );
        push_items(&mut out, "⭐ *Top 3 Positive Items:*", &self.top_positive);
        push_items(&mut out, "🚨 *Top 3 Negative Items:*", &self.top_negative);
        out
    }
}

fn push_items(out: &mut String, heading: &str, items: &[SentimentItem]) {
    if items.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(heading);
    out.push('\n');
    for item in items {
        out.push_str(&format!("   - `{}` (Score: {:.2})\n", item.text, item.score));
    }
}

/// Negative-sentiment alert raised for one worksheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentAlert {
    pub worksheet: String,
    pub negative_count: usize,
    pub threshold: f64,
    pub channel: String,
    /// Whether the notifier accepted the alert
    pub delivered: bool,
}

impl SentimentAlert {
    pub fn render(&self) -> String {
        format!(
            "🚨 *URGENT SENTIMENT ALERT in {}!*\n\
             \x20  - Detected `{}` items with sentiment scores below `{}`.\n\
             \x20  - This indicates a significant negative trend.\n\
             \x20  - Please review the latest data in the '{}' worksheet.\n",
            display_name(&self.worksheet),
            self.negative_count,
            self.threshold,
            self.worksheet
        )
    }
}

/// `Twitter_marketing_tweets` -> `Twitter Marketing Tweets`
fn display_name(worksheet: &str) -> String {
    worksheet
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell_display(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Number(n)) => n.to_string(),
        Some(CellValue::Bool(b)) => b.to_string(),
        Some(CellValue::Date(d)) => d.to_rfc3339(),
        Some(CellValue::Empty) | None => String::new(),
    }
}

fn truncate_item(text: &str) -> String {
    if text.chars().count() > MAX_ITEM_CHARS {
        let head: String = text.chars().take(MAX_ITEM_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn require_columns(
    table: &RecordTable,
    worksheet: &str,
    columns: &[&str],
) -> Result<(), ExtractionIssue> {
    if table.is_empty() {
        return Err(ExtractionIssue::EmptyInput {
            worksheet: worksheet.to_string(),
        });
    }
    match columns.iter().find(|c| !table.has_column(c)) {
        Some(missing) => Err(ExtractionIssue::MissingColumn {
            worksheet: worksheet.to_string(),
            column: (*missing).to_string(),
        }),
        None => Ok(()),
    }
}

/// Summarize the stored sentiment of one worksheet.
///
/// Rows whose score is missing or not numeric are dropped before anything
/// is counted. Label percentages are taken over rows that carry a label.
pub fn sentiment_report(
    table: &RecordTable,
    worksheet: &str,
    text_column: &str,
    columns: &SentimentColumns,
) -> Result<SentimentReport, ExtractionIssue> {
    require_columns(
        table,
        worksheet,
        &[columns.label.as_str(), columns.score.as_str(), text_column],
    )?;

    let scored: Vec<(f64, &crate::models::RawRecord)> = table
        .rows
        .iter()
        .filter_map(|row| {
            row.get(&columns.score)
                .and_then(CellValue::as_f64)
                .map(|score| (score, row))
        })
        .collect();
    let dropped_rows = table.len() - scored.len();

    if scored.is_empty() {
        return Err(ExtractionIssue::MalformedValue {
            worksheet: worksheet.to_string(),
            column: columns.score.clone(),
            count: dropped_rows,
        });
    }
    if dropped_rows > 0 {
        warn!(
            "Dropped {} rows without a numeric '{}' from '{}'",
            dropped_rows, columns.score, worksheet
        );
    }

    let total = scored.len();
    let average_score = scored.iter().map(|(score, _)| score).sum::<f64>() / total as f64;

    let mut label_counts: HashMap<&str, usize> = HashMap::new();
    let mut labelled = 0;
    for (_, row) in &scored {
        if let Some(label) = row.get(&columns.label).and_then(CellValue::as_text) {
            if !label.is_empty() {
                *label_counts.entry(label).or_default() += 1;
                labelled += 1;
            }
        }
    }
    let pct = |label: &str| {
        if labelled == 0 {
            0.0
        } else {
            label_counts.get(label).copied().unwrap_or(0) as f64 * 100.0 / labelled as f64
        }
    };

    let item = |(score, row): &(f64, &crate::models::RawRecord)| SentimentItem {
        text: truncate_item(&cell_display(row.get(text_column))),
        score: *score,
    };
    // Stable sorts keep worksheet order among equal scores.
    let mut by_score = scored.clone();
    by_score.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    let top_positive = by_score.iter().take(TOP_ITEMS).map(item).collect();
    by_score.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    let top_negative = by_score.iter().take(TOP_ITEMS).map(item).collect();

    Ok(SentimentReport {
        worksheet: worksheet.to_string(),
        total,
        average_score,
        positive_pct: pct("Positive"),
        negative_pct: pct("Negative"),
        neutral_pct: pct("Neutral"),
        top_positive,
        top_negative,
        dropped_rows,
    })
}

/// Alert for `rule` if enough strongly negative rows are present
pub fn negative_sentiment_alert(
    table: &RecordTable,
    rule: &AlertRule,
    columns: &SentimentColumns,
) -> Result<Option<SentimentAlert>, ExtractionIssue> {
    require_columns(
        table,
        &rule.worksheet,
        &[columns.label.as_str(), columns.score.as_str()],
    )?;

    let negative_count = table
        .rows
        .iter()
        .filter(|row| {
            row.get(&columns.label).and_then(CellValue::as_text) == Some("Negative")
                && row
                    .get(&columns.score)
                    .and_then(CellValue::as_f64)
                    .is_some_and(|score| score < rule.negative_threshold)
        })
        .count();

    if negative_count < rule.min_count {
        info!("No critical negative sentiment detected in '{}'", rule.worksheet);
        return Ok(None);
    }
    Ok(Some(SentimentAlert {
        worksheet: rule.worksheet.clone(),
        negative_count,
        threshold: rule.negative_threshold,
        channel: rule.channel.clone(),
        delivered: false,
    }))
}

async fn read_or_empty<S>(store: &S, spreadsheet: &str, worksheet: &str) -> RecordTable
where
    S: TableStore + ?Sized,
{
    match store.read_table(spreadsheet, worksheet).await {
        Ok(table) => table,
        Err(e) => {
            warn!("Failed to read '{}': {}", worksheet, e);
            RecordTable::default()
        }
    }
}

/// Build a report for every target, posting each to its channel when `send` is set
pub async fn generate_sentiment_reports<S, N>(
    store: &S,
    notifier: &N,
    spreadsheet: &str,
    targets: &[ReportTarget],
    columns: &SentimentColumns,
    send: bool,
) -> Vec<(String, Result<SentimentReport, ExtractionIssue>)>
where
    S: TableStore + ?Sized,
    N: Notifier + ?Sized,
{
    let mut results = Vec::with_capacity(targets.len());
    for target in targets {
        info!("Generating sentiment report for worksheet '{}'", target.worksheet);
        let table = read_or_empty(store, spreadsheet, &target.worksheet).await;
        let report = sentiment_report(&table, &target.worksheet, &target.text_column, columns);
        match &report {
            Ok(report) if send => {
                notifier
                    .send(&report.render(), Some(target.channel.as_str()))
                    .await;
            }
            Ok(_) => {}
            Err(issue) => warn!("Skipping report: {}", issue),
        }
        results.push((target.worksheet.clone(), report));
    }
    results
}

/// Evaluate every alert rule, sending raised alerts when `send` is set
pub async fn check_sentiment_alerts<S, N>(
    store: &S,
    notifier: &N,
    spreadsheet: &str,
    rules: &[AlertRule],
    columns: &SentimentColumns,
    send: bool,
) -> Vec<SentimentAlert>
where
    S: TableStore + ?Sized,
    N: Notifier + ?Sized,
{
    let mut alerts = Vec::new();
    for rule in rules {
        let table = read_or_empty(store, spreadsheet, &rule.worksheet).await;
        match negative_sentiment_alert(&table, rule, columns) {
            Ok(Some(mut alert)) => {
                warn!(
                    "{} strongly negative items in '{}'",
                    alert.negative_count, alert.worksheet
                );
                if send {
                    let delivered = notifier
                        .send(&alert.render(), Some(alert.channel.as_str()))
                        .await;
                    alert.delivered = delivered;
                }
                alerts.push(alert);
            }
            Ok(None) => {}
            Err(issue) => warn!("Skipping alert check: {}", issue),
        }
    }
    alerts
}
