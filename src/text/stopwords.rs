//! Stop-word configuration
//!
//! The English list matches the common NLTK corpus. The supplementary list
//! covers temporal, deictic and marketing filler that carries no signal in
//! social posts and product content.

use std::collections::HashSet;

pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

pub const SUPPLEMENTARY_STOP_WORDS: &[&str] = &[
    // marketing filler
    "new", "product", "review", "best", "vs", "check", "click", "link", "via", "amp", "rt",
    // deictic / function words the English list misses
    "up", "at", "by", "what", "how", "when", "where", "why", "who", "this", "that", "these",
    "those", "can", "get", "just", "like", "make", "made", "from", "for", "with", "will", "it",
    "its", "you", "your", "are", "have", "been", "has", "had", "here", "there", "we", "our", "us",
    "they", "them", "their", "about", "all", "also", "and", "any", "but", "etc", "every", "many",
    "much", "only", "other", "some", "such", "than", "then", "through", "under", "until", "upon",
    "would", "really", "still", "even", "got", "going",
    // temporal
    "today", "tonight", "tomorrow", "yesterday", "ago", "soon", "week", "month", "year",
];

/// Immutable stop-word set, built once and shared by reference
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<'a, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = &'a [&'a str]>,
    {
        let words = lists
            .into_iter()
            .flat_map(|list| list.iter())
            .map(|w| w.to_lowercase())
            .collect();
        Self { words }
    }

    /// Add project-specific words from configuration
    #[must_use]
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new([ENGLISH_STOP_WORDS, SUPPLEMENTARY_STOP_WORDS])
    }
}
