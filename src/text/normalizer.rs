//! Text normalization for keyword and theme extraction
//!
//! Turns free text from posts, titles and queries into a bag of lowercase
//! alphabetic tokens. The cleaning steps run in a fixed order: noise removal
//! must happen before hashtags are unwrapped, and both before punctuation is
//! stripped.

use regex::Regex;
use rust_stemmers::Algorithm;
use rust_stemmers::Stemmer;
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopWords;
use crate::models::CellValue;

/// Tokens must be strictly longer than this
pub const MIN_TOKEN_LEN: usize = 2;

// Porter2 settles in one or two passes; the bound only guards against cycles.
const MAX_STEM_PASSES: usize = 4;

/// Stateless text normalizer with injected stop words
pub struct TextNormalizer {
    stop_words: StopWords,
    stemmer: Stemmer,
    noise_regex: Regex,
    hashtag_regex: Regex,
    non_alpha_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(StopWords::default())
    }
}

impl TextNormalizer {
    pub fn new(stop_words: StopWords) -> Self {
        let noise_regex =
            Regex::new(r"http\S+|www\S+|https\S+|@\w+").expect("Invalid URL/mention regex");
        let hashtag_regex = Regex::new(r"#(\w+)").expect("Invalid hashtag regex");
        let non_alpha_regex = Regex::new(r"[^a-zA-Z\s]").expect("Invalid character class regex");

        Self {
            stop_words,
            stemmer: Stemmer::create(Algorithm::English),
            noise_regex,
            hashtag_regex,
            non_alpha_regex,
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Clean and tokenize `text`, optionally stemming each token
    pub fn normalize(&self, text: &str, stem: bool) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let without_noise = self.noise_regex.replace_all(text, "");
        let unwrapped = self.hashtag_regex.replace_all(&without_noise, "$1");
        let letters = self.non_alpha_regex.replace_all(&unwrapped, "").to_lowercase();

        letters
            .unicode_words()
            .filter(|word| self.is_token(word))
            .filter_map(|word| self.finish(word, stem))
            .collect()
    }

    /// Normalize a worksheet cell; anything but text yields no tokens
    pub fn normalize_value(&self, value: &CellValue, stem: bool) -> Vec<String> {
        value
            .as_text()
            .map(|text| self.normalize(text, stem))
            .unwrap_or_default()
    }

    /// Hashtags found in raw, uncleaned text, normalized like any other token
    pub fn hashtags(&self, text: &str, stem: bool) -> Vec<String> {
        self.hashtag_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|tag| {
                tag.as_str()
                    .chars()
                    .filter(char::is_ascii_alphabetic)
                    .collect::<String>()
                    .to_lowercase()
            })
            .filter(|tag| self.is_token(tag))
            .filter_map(|tag| self.finish(&tag, stem))
            .collect()
    }

    /// Reduce a token to its stem.
    ///
    /// Repeats until the stemmer returns its input so the result is a fixed
    /// point, and never returns an empty string for non-empty input.
    pub fn stem(&self, token: &str) -> String {
        let mut current = token.to_string();
        for _ in 0..MAX_STEM_PASSES {
            let next = self.stemmer.stem(&current);
            if next.is_empty() || next.as_ref() == current.as_str() {
                break;
            }
            current = next.into_owned();
        }
        current
    }

    fn is_token(&self, word: &str) -> bool {
        word.len() > MIN_TOKEN_LEN && !self.stop_words.contains(word)
    }

    // Stems are filtered again so pools never hold short or stop-word tokens.
    fn finish(&self, word: &str, stem: bool) -> Option<String> {
        if !stem {
            return Some(word.to_string());
        }
        let stemmed = self.stem(word);
        self.is_token(&stemmed).then_some(stemmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::default()
    }

    #[test]
    fn test_empty_and_non_text_inputs() {
        let n = normalizer();
        assert!(n.normalize("", false).is_empty());
        assert!(n.normalize("   \n\t", true).is_empty());
        assert!(n.normalize_value(&CellValue::Empty, false).is_empty());
        assert!(n.normalize_value(&CellValue::Number(3.0), true).is_empty());
        assert!(n.normalize_value(&CellValue::Bool(true), true).is_empty());
    }

    #[test]
    fn test_url_mention_and_hashtag_handling() {
        let tokens = normalizer().normalize("Check http://x.co #GreatDeal @brand NOW!!", false);
        assert_eq!(tokens, vec!["greatdeal".to_string()]);
    }

    #[test]
    fn test_strips_digits_and_short_tokens() {
        let tokens = normalizer().normalize("AI phones 2024: Pixel9 vs iPhone16 ok", false);
        assert_eq!(tokens, vec!["phones", "pixel", "iphone"]);
    }

    #[test]
    fn test_preserves_source_order_and_duplicates() {
        let tokens = normalizer().normalize("launch camera launch battery", false);
        assert_eq!(tokens, vec!["launch", "camera", "launch", "battery"]);
    }

    #[test]
    fn test_www_links_removed() {
        let tokens = normalizer().normalize("visit www.shop.example/sale-now for gadgets", false);
        assert_eq!(tokens, vec!["visit", "gadgets"]);
    }

    #[test]
    fn test_stemming_applied() {
        let tokens = normalizer().normalize("running marketers loved launches", true);
        assert_eq!(tokens, vec!["run", "market", "love", "launch"]);
    }

    #[test]
    fn test_stem_reaches_fixed_point() {
        let n = normalizer();
        assert_eq!(n.stem("marketers"), n.stem("marketer"));
        assert_eq!(n.stem("marketers"), "market");
    }

    #[test]
    fn test_stem_is_idempotent() {
        let n = normalizer();
        for word in [
            "generously",
            "happiness",
            "relational",
            "conditional",
            "marketing",
            "electricity",
            "hopefully",
            "sensational",
            "agreed",
            "skies",
            "dying",
            "news",
        ] {
            let once = n.stem(word);
            assert!(!once.is_empty(), "stem of {word} was empty");
            assert_eq!(n.stem(&once), once, "stem not idempotent for {word}");
        }
    }

    #[test]
    fn test_stemmed_tokens_respect_filters() {
        let n = normalizer();
        for token in n.normalize("being having doing does used tries ties", true) {
            assert!(token.len() > MIN_TOKEN_LEN);
            assert!(!n.stop_words().contains(&token));
        }
    }

    #[test]
    fn test_hashtags_from_raw_text() {
        let n = normalizer();
        let tags = n.hashtags("Loving the #AIPhone and #New #launches #AI #4k", false);
        assert_eq!(tags, vec!["aiphone", "launches"]);

        let stemmed = n.hashtags("#Launches #Marketing", true);
        assert_eq!(stemmed, vec!["launch", "market"]);
    }
}
