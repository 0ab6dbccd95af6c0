use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::OptimizerError;

/// A single cell read from a worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    /// Text content, or `None` for anything that is not a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric view used for engagement metrics.
    ///
    /// Numbers pass through, numeric strings are parsed, everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

/// One worksheet row, keyed by column name
pub type RawRecord = HashMap<String, CellValue>;

/// Whole worksheet contents: ordered column names plus rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RecordTable {
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from column names and positional row values.
    ///
    /// Short rows are padded with `CellValue::Empty`; extra values are dropped.
    pub fn from_rows<C, R>(columns: &[C], rows: R) -> Self
    where
        C: AsRef<str>,
        R: IntoIterator<Item = Vec<CellValue>>,
    {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|values| {
                let mut values = values.into_iter();
                columns
                    .iter()
                    .map(|c| (c.clone(), values.next().unwrap_or(CellValue::Empty)))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// First candidate column present in this table
    pub fn resolve_column<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates
            .iter()
            .find(|c| self.has_column(c))
            .map(String::as_str)
    }

    /// Non-empty values of a column in row order
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows
            .iter()
            .filter_map(move |row| row.get(column))
            .filter(|v| !v.is_empty())
    }

    /// Add a column, or replace its values if it already exists
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(name.to_string(), value);
        }
    }

    /// Remove every column whose name matches the predicate
    pub fn drop_columns_where<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&str) -> bool,
    {
        let dropped: Vec<String> = self
            .columns
            .iter()
            .filter(|c| predicate(c))
            .cloned()
            .collect();
        if dropped.is_empty() {
            return;
        }
        self.columns.retain(|c| !dropped.contains(c));
        for row in &mut self.rows {
            for column in &dropped {
                row.remove(column);
            }
        }
    }
}

/// Content platforms that feed the worksheet store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    GoogleTrends,
    Twitter,
    Youtube,
    Reddit,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::GoogleTrends,
        Platform::Twitter,
        Platform::Youtube,
        Platform::Reddit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::GoogleTrends => "google_trends",
            Platform::Twitter => "twitter",
            Platform::Youtube => "youtube",
            Platform::Reddit => "reddit",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google_trends" | "google-trends" | "trends" => Ok(Platform::GoogleTrends),
            "twitter" | "x" => Ok(Platform::Twitter),
            "youtube" => Ok(Platform::Youtube),
            "reddit" => Ok(Platform::Reddit),
            other => Err(OptimizerError::Config(format!("unknown platform: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_untagged_json() {
        let cells: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 12.5, "2024-05-01T00:00:00Z", "hello"]"#).unwrap();
        assert_eq!(cells[0], CellValue::Empty);
        assert_eq!(cells[1], CellValue::Bool(true));
        assert_eq!(cells[2], CellValue::Number(12.5));
        assert!(matches!(cells[3], CellValue::Date(_)));
        assert_eq!(cells[4], CellValue::Text("hello".to_string()));
    }

    #[test]
    fn test_engagement_coercion() {
        assert_eq!(CellValue::from(42_i64).as_f64(), Some(42.0));
        assert_eq!(CellValue::from(" 17 ").as_f64(), Some(17.0));
        assert_eq!(CellValue::from("lots").as_f64(), None);
        assert_eq!(CellValue::Empty.as_f64(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_resolve_column_prefers_first_candidate() {
        let table = RecordTable::new(vec!["title".into(), "cleaned_title".into()]);
        let candidates = vec!["cleaned_title".to_string(), "title".to_string()];
        assert_eq!(table.resolve_column(&candidates), Some("cleaned_title"));

        let raw_only = RecordTable::new(vec!["title".into()]);
        assert_eq!(raw_only.resolve_column(&candidates), Some("title"));
        assert_eq!(RecordTable::default().resolve_column(&candidates), None);
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = RecordTable::from_rows(&["a", "b"], vec![vec!["x".into()]]);
        assert_eq!(table.rows[0].get("b"), Some(&CellValue::Empty));
        assert_eq!(table.column_values("b").count(), 0);
        assert_eq!(table.column_values("a").count(), 1);
    }

    #[test]
    fn test_drop_unnamed_columns() {
        let mut table = RecordTable::from_rows(
            &["Unnamed: 0", "Tweet"],
            vec![vec![CellValue::from(0_i64), "hi".into()]],
        );
        table.drop_columns_where(|c| c.starts_with("Unnamed"));
        assert_eq!(table.columns, vec!["Tweet".to_string()]);
        assert!(!table.rows[0].contains_key("Unnamed: 0"));
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("Twitter".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!("google_trends".parse::<Platform>().unwrap(), Platform::GoogleTrends);
        assert!("myspace".parse::<Platform>().is_err());
    }
}
