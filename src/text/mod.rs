//! Text cleaning and tokenization

pub mod normalizer;
pub mod stopwords;

pub use normalizer::TextNormalizer;
pub use normalizer::MIN_TOKEN_LEN;
pub use stopwords::StopWords;
