//! Keyword and theme insights across content platforms

pub mod aggregator;
pub mod extractor;
pub mod sources;

pub use aggregator::AggregateOutcome;
pub use aggregator::FrequencyTable;
pub use aggregator::Insight;
pub use aggregator::InsightAggregator;
pub use aggregator::InsightRequest;
pub use extractor::Extraction;
pub use extractor::ExtractionReport;
pub use extractor::PlatformExtractor;
pub use extractor::TokenPools;
pub use sources::default_sources;
pub use sources::SourceTable;
