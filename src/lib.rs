//! Marketing insight extraction over a shared worksheet store
//!
//! Worksheets collected from Google Trends, Twitter, YouTube and Reddit are
//! normalized into keyword and theme token pools, and the most frequent
//! tokens are rendered as a short insight summary for content generation.

pub mod cleaning;
pub mod cli;
pub mod config;
pub mod errors;
pub mod insights;
pub mod logging;
pub mod models;
pub mod notifier;
pub mod reports;
pub mod store;
pub mod text;

#[cfg(test)]
mod config_tests;

use std::sync::Arc;

pub use config::AppConfig;
pub use errors::*;
use insights::AggregateOutcome;
use insights::InsightAggregator;
use insights::InsightRequest;
use notifier::Notifier;
use notifier::SlackNotifier;
use reports::SentimentAlert;
use reports::SentimentReport;
use store::JsonFileTableStore;
use store::PgTableStore;
use store::TableStore;
use text::StopWords;
use text::TextNormalizer;

/// Main entry point: configuration, normalizer, store and notifier wired together
pub struct ContentOptimizer {
    config: AppConfig,
    normalizer: TextNormalizer,
    store: Arc<dyn TableStore>,
    notifier: Arc<dyn Notifier>,
}

impl ContentOptimizer {
    /// Build from configuration, connecting to the configured store backend
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store: Arc<dyn TableStore> = match config.store.backend {
            crate::config::StoreBackend::Json => {
                Arc::new(JsonFileTableStore::new(&config.store.json_dir))
            }
            crate::config::StoreBackend::Postgres => Arc::new(PgTableStore::from_config(&config).await?),
        };
        let notifier = Arc::new(SlackNotifier::from_config(&config.notifier)?);
        Ok(Self::with_parts(config, store, notifier))
    }

    /// Build with explicit store and notifier
    pub fn with_parts(
        config: AppConfig,
        store: Arc<dyn TableStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let stop_words = StopWords::default().with_extra(&config.insights.extra_stop_words);
        Self {
            normalizer: TextNormalizer::new(stop_words),
            config,
            store,
            notifier,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }

    /// Request populated from the configured defaults
    pub fn default_request(&self) -> InsightRequest {
        InsightRequest {
            platform: None,
            num_keywords: self.config.insights.num_keywords,
            num_themes: self.config.insights.num_themes,
            stem: self.config.insights.apply_stemming,
        }
    }

    /// Run the cleaning pass over every configured worksheet
    pub async fn clean(&self, stem: bool) -> Vec<(String, Result<cleaning::CleaningOutcome>)> {
        cleaning::clean_all(
            self.store.as_ref(),
            &self.normalizer,
            self.config.spreadsheet(),
            &self.config.insights.cleaning_targets(),
            stem,
        )
        .await
    }

    /// Aggregate insights; read-only over the store
    pub async fn insights(&self, request: &InsightRequest) -> AggregateOutcome {
        InsightAggregator::new(
            &self.normalizer,
            &self.config.insights.sources,
            self.config.insights.engagement_sample_size,
        )
        .aggregate(self.store.as_ref(), self.config.spreadsheet(), request)
        .await
    }

    /// Sentiment summary per configured worksheet, posted to each target's
    /// channel when `send` is set
    pub async fn sentiment_reports(
        &self,
        send: bool,
    ) -> Vec<(String, std::result::Result<SentimentReport, ExtractionIssue>)> {
        reports::generate_sentiment_reports(
            self.store.as_ref(),
            self.notifier.as_ref(),
            self.config.spreadsheet(),
            &self.config.reports.targets,
            &self.config.reports.columns,
            send,
        )
        .await
    }

    /// Evaluate the configured negative-sentiment alert rules
    pub async fn sentiment_alerts(&self, send: bool) -> Vec<SentimentAlert> {
        reports::check_sentiment_alerts(
            self.store.as_ref(),
            self.notifier.as_ref(),
            self.config.spreadsheet(),
            &self.config.reports.alerts,
            &self.config.reports.columns,
            send,
        )
        .await
    }

    /// Send a notification to the configured channel, or `channel` when given
    pub async fn notify(&self, message: &str, channel: Option<&str>) -> bool {
        self.notifier.send(message, channel).await
    }
}
