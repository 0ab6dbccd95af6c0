use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Table store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Problems met while pulling tokens out of a worksheet.
///
/// None of these abort an aggregation: the affected column or table simply
/// contributes no tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionIssue {
    #[error("column '{column}' not found in '{worksheet}'")]
    MissingColumn { worksheet: String, column: String },

    #[error("worksheet '{worksheet}' is empty or unavailable")]
    EmptyInput { worksheet: String },

    #[error("{count} non-numeric values in '{column}' of '{worksheet}' treated as lowest engagement")]
    MalformedValue {
        worksheet: String,
        column: String,
        count: usize,
    },
}
