//! Keyword extraction and extractive summarization.
//!
//! [`StandardNlp`] ranks terms by frequency and scores sentences on title
//! overlap, keyword density, length and position.

use std::collections::{HashMap, HashSet};

use crate::stopwords::StopWords;
use crate::text;

/// Ideal sentence length (words) for the length feature.
const IDEAL_SENTENCE_WORDS: f64 = 20.0;

/// Keyword extraction and summarization over plain text.
pub trait NlpEngine: Send + Sync {
    /// Weighted keywords of `text`.
    fn keywords(&self, text: &str) -> HashMap<String, f64>;

    /// The best sentences of `text`, in document order.
    fn summarize(&self, title: &str, text: &str) -> Vec<String>;
}

/// Frequency-based keywords and feature-scored summaries.
#[derive(Debug, Clone)]
pub struct StandardNlp {
    stopwords: StopWords,
    keyword_count: usize,
    summary_sentences: usize,
}

impl StandardNlp {
    /// Engine for `language`, keeping `keyword_count` keywords and
    /// `summary_sentences` summary sentences.
    #[must_use]
    pub fn new(language: &str, keyword_count: usize, summary_sentences: usize) -> Self {
        Self {
            stopwords: StopWords::for_language(language),
            keyword_count,
            summary_sentences,
        }
    }

    fn content_words(&self, text: &str) -> Vec<String> {
        text::split_words(text)
            .into_iter()
            .filter(|w| !self.stopwords.contains(w))
            .collect()
    }

    fn score(&self, sentences: &[String], title_words: &[String], keywords: &HashMap<String, f64>) -> Vec<f64> {
        let total = sentences.len();
        sentences
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let words = text::split_words(s);
                let title_feature = self.title_score(title_words, &words);
                let length_feature = length_score(words.len());
                let position_feature = sentence_position(i + 1, total);
                let frequency = (sbs(&words, keywords) + dbs(&words, keywords)) / 2.0 * 10.0;
                (title_feature * 1.5 + frequency * 2.0 + length_feature + position_feature) / 4.0
            })
            .collect()
    }

    fn title_score(&self, title_words: &[String], sentence: &[String]) -> f64 {
        if title_words.is_empty() {
            return 0.0;
        }
        let title: HashSet<&str> = title_words.iter().map(String::as_str).collect();
        let hits = sentence
            .iter()
            .filter(|w| !self.stopwords.contains(w) && title.contains(w.as_str()))
            .count();
        hits as f64 / title_words.len() as f64
    }
}

impl NlpEngine for StandardNlp {
    fn keywords(&self, text: &str) -> HashMap<String, f64> {
        let total = text::split_words(text).len();
        if total == 0 {
            return HashMap::new();
        }

        let mut freq: HashMap<String, usize> = HashMap::new();
        for word in self.content_words(text) {
            *freq.entry(word).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
        // frequency first, then alphabetical so ties are deterministic
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.keyword_count);

        ranked
            .into_iter()
            .map(|(word, count)| (word, count as f64 / total as f64 * 1.5 + 1.0))
            .collect()
    }

    fn summarize(&self, title: &str, text: &str) -> Vec<String> {
        let sentences = text::split_sentences(text);
        if sentences.is_empty() {
            return Vec::new();
        }

        let keywords = self.keywords(text);
        let title_words = self.content_words(title);
        let scores = self.score(&sentences, &title_words, &keywords);

        let mut ranked: Vec<usize> = (0..sentences.len()).collect();
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then_with(|| a.cmp(&b)));
        ranked.truncate(self.summary_sentences);
        ranked.sort_unstable();

        ranked.into_iter().map(|i| sentences[i].clone()).collect()
    }
}

fn length_score(words: usize) -> f64 {
    1.0 - (IDEAL_SENTENCE_WORDS - words as f64).abs() / IDEAL_SENTENCE_WORDS
}

/// Weight by relative position; opening and closing sentences matter most.
fn sentence_position(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let normalized = index as f64 / total as f64;
    match normalized {
        n if n <= 0.0 => 0.0,
        n if n <= 0.1 => 0.17,
        n if n <= 0.2 => 0.23,
        n if n <= 0.3 => 0.14,
        n if n <= 0.4 => 0.08,
        n if n <= 0.5 => 0.05,
        n if n <= 0.6 => 0.04,
        n if n <= 0.7 => 0.06,
        n if n <= 0.9 => 0.04,
        n if n <= 1.0 => 0.15,
        _ => 0.0,
    }
}

/// Summation-based selection: mean keyword weight per word.
fn sbs(words: &[String], keywords: &HashMap<String, f64>) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let score: f64 = words.iter().filter_map(|w| keywords.get(w)).sum();
    score / words.len() as f64 / 10.0
}

/// Density-based selection: rewards keywords that appear close together.
fn dbs(words: &[String], keywords: &HashMap<String, f64>) -> f64 {
    let unique: HashSet<&str> = words
        .iter()
        .filter(|w| keywords.contains_key(w.as_str()))
        .map(String::as_str)
        .collect();
    let k = unique.len() as f64 + 1.0;

    let mut previous: Option<(usize, f64)> = None;
    let mut sum = 0.0;
    for (i, word) in words.iter().enumerate() {
        let Some(&score) = keywords.get(word) else {
            continue;
        };
        if let Some((prev_idx, prev_score)) = previous {
            let distance = (i - prev_idx) as f64;
            sum += prev_score * score / (distance * distance);
        }
        previous = Some((i, score));
    }

    sum / (k * (k + 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> StandardNlp {
        StandardNlp::new("en", 10, 5)
    }

    #[test]
    fn test_keywords_skip_stopwords_and_rank_by_frequency() {
        let kw = engine().keywords("The rocket launched. The rocket landed. The crew cheered the rocket.");

        assert!(kw.contains_key("rocket"));
        assert!(!kw.contains_key("the"));
        assert!(kw["rocket"] > kw["crew"]);
        // weight = freq / n_words * 1.5 + 1
        let expected = 3.0 / 11.0 * 1.5 + 1.0;
        assert!((kw["rocket"] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_keywords_capped() {
        let nlp = StandardNlp::new("en", 2, 5);
        let kw = nlp.keywords("alpha beta gamma delta alpha beta alpha");
        assert_eq!(kw.len(), 2);
        assert!(kw.contains_key("alpha"));
        assert!(kw.contains_key("beta"));
    }

    #[test]
    fn test_keywords_empty_text() {
        assert!(engine().keywords("").is_empty());
    }

    #[test]
    fn test_summary_keeps_document_order_and_size() {
        let text = "Solar power output hit a record this summer. \
            Engineers credit new solar panels for the gains. \
            Weather was mild across the region. \
            Grid operators expect solar power to keep growing. \
            Some residents complained about traffic. \
            Officials said solar power tariffs will fall next year. \
            A local bakery opened a new store.";
        let summary = StandardNlp::new("en", 10, 3).summarize("Solar power hits a record", text);

        assert_eq!(summary.len(), 3);
        let sentences = text::split_sentences(text);
        let positions: Vec<usize> = summary
            .iter()
            .map(|s| sentences.iter().position(|x| x == s).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(summary.iter().all(|s| s.to_lowercase().contains("solar")));
    }

    #[test]
    fn test_summary_of_empty_text() {
        assert!(engine().summarize("Title", "").is_empty());
    }

    #[test]
    fn test_sentence_position_buckets() {
        assert_eq!(sentence_position(1, 10), 0.17);
        assert_eq!(sentence_position(2, 10), 0.23);
        assert_eq!(sentence_position(10, 10), 0.15);
        assert_eq!(sentence_position(0, 0), 0.0);
    }
}
