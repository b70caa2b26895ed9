//! Keyword density analysis
//!
//! This module tokenizes the visible text of a rendered page, filters out
//! common English stopwords, and ranks the surviving tokens by frequency.
//! Ties between equal frequencies are broken by first appearance in the
//! text, which keeps the ranking deterministic and testable.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Maximum number of ranked keywords kept per page
pub const MAX_KEYWORDS: usize = 10;

/// Common English stopwords excluded from keyword ranking.
///
/// The set is fixed at compile time and built into a lookup table once per
/// process; the analyzer never mutates it.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "couldn", "did", "didn", "do", "does", "doesn",
    "doing", "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn",
    "has", "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just",
    "ll", "me", "might", "mightn", "more", "most", "must", "mustn", "my", "myself", "needn",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "re", "s", "same", "shall", "shan", "she", "should",
    "shouldn", "so", "some", "such", "t", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "ve", "very", "was", "wasn", "we", "were", "weren", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "won", "would", "wouldn",
    "you", "your", "yours", "yourself", "yourselves",
];

/// A ranked keyword with its density as a percentage of all filtered tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensity {
    pub keyword: String,
    pub density: f64,
}

/// Result of analyzing one page's text
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSummary {
    /// Count of tokens surviving the stopword filter
    pub total_words: usize,

    /// Top keywords sorted by descending frequency, at most [`MAX_KEYWORDS`]
    pub keywords: Vec<KeywordDensity>,
}

/// Keyword analyzer holding the immutable stopword set
///
/// Constructed once at process start and injected into the crawl loop.
pub struct KeywordAnalyzer {
    stopwords: HashSet<&'static str>,
    word_pattern: Regex,
}

impl KeywordAnalyzer {
    /// Creates an analyzer with the built-in English stopword set
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            // \w+ matches maximal runs of letters, digits, and underscore
            word_pattern: Regex::new(r"\w+").expect("word pattern is valid"),
        }
    }

    /// Tokenizes text and ranks keywords by descending frequency
    ///
    /// Tokens are lowercased and filtered against the stopword set before
    /// counting. Equal frequencies keep first-seen order (stable sort over
    /// an insertion-ordered count table). A page with no surviving tokens
    /// yields `total_words = 0` and an empty keyword list.
    pub fn analyze(&self, text: &str) -> KeywordSummary {
        // Insertion-ordered counts: the Vec preserves first-seen order, the
        // map indexes into it.
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut total_words = 0usize;

        for token in self.word_pattern.find_iter(text) {
            let word = token.as_str().to_lowercase();
            if self.stopwords.contains(word.as_str()) {
                continue;
            }
            total_words += 1;
            match index.get(&word) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(word.clone(), order.len());
                    order.push((word, 1));
                }
            }
        }

        if total_words == 0 {
            return KeywordSummary {
                total_words: 0,
                keywords: Vec::new(),
            };
        }

        // Stable sort keeps first-seen order among equal counts
        order.sort_by(|a, b| b.1.cmp(&a.1));

        let keywords = order
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(|(keyword, count)| KeywordDensity {
                keyword,
                density: (count as f64 / total_words as f64) * 100.0,
            })
            .collect();

        KeywordSummary {
            total_words,
            keywords,
        }
    }
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
