//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, and validation.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::config::*;
    use crate::models::Platform;

    // ====== Default Value Tests ======

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.store.backend, StoreBackend::Json);
        assert_eq!(config.spreadsheet(), "AI_Content_Optimizer_Data");
        assert_eq!(config.store.retries, 3);
        assert_eq!(config.store.retry_delay_secs, 5);
        assert_eq!(config.insights.num_keywords, 7);
        assert_eq!(config.insights.num_themes, 5);
        assert_eq!(config.insights.engagement_sample_size, 50);
        assert!(config.insights.apply_stemming);
        assert_eq!(config.insights.sources.len(), 4);
        assert!(config.notifier.webhook_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cleaning_targets_follow_sources() {
        let targets = InsightsConfig::default().cleaning_targets();
        let worksheets: Vec<&str> = targets.iter().map(|t| t.worksheet.as_str()).collect();
        assert_eq!(
            worksheets,
            vec![
                "GoogleTrends_Related_Queries",
                "Twitter_marketing_tweets",
                "YouTube_Product_Content",
                "Reddit_Product_Content"
            ]
        );
        assert_eq!(targets[0].columns, vec!["query", "keyword_searched"]);
        assert_eq!(targets[1].columns, vec!["Tweet"]);
        assert_eq!(targets[2].columns, vec!["title", "description"]);
        assert_eq!(targets[3].columns, vec!["title", "selftext"]);
    }

    // ====== Parsing Tests ======

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [store]
            backend = "postgres"
            spreadsheet = "Campaign_Data"

            [insights]
            num_keywords = 3
            extra_stop_words = ["giveaway"]
            "#,
        )
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert_eq!(config.spreadsheet(), "Campaign_Data");
        assert_eq!(config.store.retries, 3);
        assert_eq!(config.insights.num_keywords, 3);
        assert_eq!(config.insights.num_themes, 5);
        assert_eq!(config.insights.extra_stop_words, vec!["giveaway"]);
        assert_eq!(config.insights.sources.len(), 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_custom_sources_replace_catalogue() {
        let config: AppConfig = toml::from_str(
            r#"
            [[insights.sources]]
            platform = "twitter"
            worksheet = "Brand_Mentions"
            hashtag_column = "text"

            [[insights.sources.fields]]
            name = "text"
            columns = ["cleaned_text", "text"]
            themes = true
            "#,
        )
        .unwrap();

        assert_eq!(config.insights.sources.len(), 1);
        assert_eq!(config.insights.sources[0].platform, Platform::Twitter);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reports_defaults_and_overrides() {
        let defaults = ReportsConfig::default();
        assert_eq!(defaults.columns.label, "sentiment_label");
        assert_eq!(defaults.targets.len(), 3);
        assert_eq!(defaults.alerts.len(), 3);
        assert!(defaults.alerts.iter().all(|r| r.channel == "#marketing-alerts"));

        let config: AppConfig = toml::from_str(
            r#"
            [reports.columns]
            score = "vader_compound"

            [[reports.alerts]]
            worksheet = "Brand_Mentions"
            negative_threshold = -0.6
            "#,
        )
        .unwrap();
        assert_eq!(config.reports.columns.label, "sentiment_label");
        assert_eq!(config.reports.columns.score, "vader_compound");
        assert_eq!(config.reports.alerts.len(), 1);
        assert_eq!(config.reports.alerts[0].min_count, 5);
        assert_eq!(config.reports.targets.len(), 3);
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.reports.alerts[0].min_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [logging]
            level = "debug"

            [notifier]
            webhook_url = "https://hooks.slack.com/services/T000/B000/XXXX"
            channel = "marketing-alerts"
            "#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.notifier.channel.as_deref(), Some("marketing-alerts"));
        assert_eq!(config.notifier.username, "AI Content Optimizer Bot");
    }

    #[test]
    fn test_from_file_missing() {
        assert!(AppConfig::from_file("/definitely/not/here/config.toml").is_err());
    }

    #[test]
    fn test_load_layered_without_file() {
        let config = AppConfig::load_layered(None).unwrap();
        assert_eq!(config.insights.sources.len(), 4);
    }

    // ====== Validation Tests ======

    #[test]
    fn test_rejects_bad_webhook() {
        let mut config = AppConfig::default();
        config.notifier.webhook_url = Some("not a url".to_string());
        assert!(config.validate().is_err());

        config.notifier.webhook_url = Some("ftp://example.com/hook".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_counts_and_empty_sources() {
        let mut config = AppConfig::default();
        config.store.retries = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.insights.sources.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.insights.num_themes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_undeclared_engagement_field() {
        let mut config = AppConfig::default();
        if let Some(engagement) = config.insights.sources[1].engagement.as_mut() {
            engagement.field = "body".to_string();
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redacted_hides_secrets() {
        let mut config = AppConfig::default();
        config.notifier.webhook_url = Some("https://hooks.slack.com/services/secret".to_string());
        config.database.url = "postgresql://user:hunter2@db:5432/app".to_string();

        let redacted = config.redacted();
        assert_eq!(redacted.notifier.webhook_url.as_deref(), Some("<redacted>"));
        assert!(!redacted.database.url.contains("hunter2"));
        assert!(config.database.url.contains("hunter2"));
    }
}
