//! Text normalization: lower-casing, digit/punctuation stripping, stop-word removal

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
    whitespace_regex: Regex,
    digit_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        let digit_regex = Regex::new(r"\d+").expect("Invalid digit regex");

        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            whitespace_regex,
            digit_regex,
        }
    }

    /// Produce the normalized form used by skill extraction and scoring.
    /// Missing input normalizes to the empty string.
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }

    pub fn normalize(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let collapsed = self.whitespace_regex.replace_all(&lowered, " ");
        let without_digits = self.digit_regex.replace_all(&collapsed, "");
        let without_punct: String = without_digits
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        without_punct
            .unicode_words()
            .filter(|word| word.chars().count() > 1 && !self.stop_words.contains(word))
            .map(str::to_string)
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

/// English stop-word list
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "youre",
    "youve", "youll", "youd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "shes", "her", "hers", "herself", "it", "its",
    "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "thatll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s",
    "t", "can", "will", "just", "don", "dont", "should", "shouldve", "now", "d",
    "ll", "m", "o", "re", "ve", "y", "ain", "aren", "arent", "couldn", "couldnt",
    "didn", "didnt", "doesn", "doesnt", "hadn", "hadnt", "hasn", "hasnt", "haven",
    "havent", "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt",
    "needn", "neednt", "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt",
    "weren", "werent", "won", "wont", "wouldn", "wouldnt",
];
