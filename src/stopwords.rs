//! Stopword statistics used by best-node scoring, formatting and NLP.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::text;

const ENGLISH: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "been",
    "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing",
    "done", "down", "during", "each", "either", "else", "elsewhere", "enough", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "further", "had", "has", "have", "having", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hers", "herself", "him", "himself", "his", "how",
    "however", "i", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "last",
    "latter", "least", "less", "made", "many", "may", "me", "meanwhile", "might", "mine",
    "more", "moreover", "most", "mostly", "much", "must", "my", "myself", "neither", "never",
    "nevertheless", "next", "no", "nobody", "none", "nor", "not", "nothing", "now", "nowhere",
    "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others",
    "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps", "rather",
    "re", "said", "same", "says", "seem", "seemed", "seeming", "seems", "several", "she",
    "should", "since", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "thereupon", "these", "they", "this", "those", "though", "through", "throughout", "thru",
    "thus", "to", "together", "too", "toward", "towards", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

static ENGLISH_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| ENGLISH.iter().copied().collect());

/// Word statistics for one language.
///
/// Languages without a bundled list use a length proxy: one "stopword" per
/// four words, so dense prose still outscores link lists and bylines.
#[derive(Debug, Clone, Copy)]
pub struct StopWords {
    words: Option<&'static HashSet<&'static str>>,
}

impl StopWords {
    /// Stopwords for an ISO 639-1 language code.
    #[must_use]
    pub fn for_language(language: &str) -> Self {
        let words = match language.trim().to_lowercase().as_str() {
            "" | "en" => Some(&*ENGLISH_SET),
            _ => None,
        };
        Self { words }
    }

    /// Whether the language has a real stopword list.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.words.is_some()
    }

    /// Whether a lowercased word is a stopword.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.is_some_and(|set| set.contains(word))
    }

    /// Number of stopwords in `content`.
    #[must_use]
    pub fn count(&self, content: &str) -> usize {
        let words = text::split_words(content);
        match self.words {
            Some(set) => words.iter().filter(|w| set.contains(w.as_str())).count(),
            None => words.len() / 4,
        }
    }
}
