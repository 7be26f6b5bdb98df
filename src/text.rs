//! Text normalization helpers shared by the field setters and collaborators.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Normalize a string before storing it on an article.
///
/// Strips NUL and other control characters (line breaks and tabs survive),
/// drops byte-order marks and replacement characters left by lossy decoding,
/// and maps non-breaking spaces to plain spaces.
#[must_use]
pub fn fix_unicode(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(c),
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => Some(' '),
            '\u{FEFF}' | '\u{FFFD}' | '\u{200B}' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Prefix of `input` holding at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Collapse whitespace runs into single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE_RUN.replace_all(input, " ").trim().to_string()
}

/// Whitespace-delimited word count. A heuristic, not a tokenizer.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Period-delimited sentence count.
///
/// Counts pieces exactly as a plain split on `'.'` does, so `"a. b."`
/// yields 3 and the empty string yields 1.
#[must_use]
pub fn sentence_count(text: &str) -> usize {
    text.split('.').count()
}

/// Lowercased alphanumeric words, punctuation stripped.
#[must_use]
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Split prose into sentences at `.`, `!` or `?` followed by whitespace and
/// an uppercase letter, digit or quote.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        current.push(c);

        if matches!(c, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && matches!(chars[j], '"' | '\'' | ')' | '”' | '’') {
                current.push(chars[j]);
                j += 1;
            }
            let mut k = j;
            while k < chars.len() && chars[k].is_whitespace() {
                k += 1;
            }
            let boundary = k > j
                && k < chars.len()
                && (chars[k].is_uppercase()
                    || chars[k].is_ascii_digit()
                    || matches!(chars[k], '"' | '“' | '\''));
            if boundary || k >= chars.len() {
                push_sentence(&mut sentences, &current);
                current.clear();
                i = k;
                continue;
            }
            i = j;
            continue;
        }
        i += 1;
    }

    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(out: &mut Vec<String>, raw: &str) {
    let sentence = collapse_whitespace(raw);
    if !sentence.is_empty() {
        out.push(sentence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_unicode_strips_controls_keeps_newlines() {
        let raw = "Caf\u{e9}\u{0}\u{7}\nnext\u{FEFF}\u{00A0}line\u{FFFD}";
        assert_eq!(fix_unicode(raw), "Café\nnext line");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 50), "short");
        assert_eq!(truncate_chars("anything", 0), "");
    }

    #[test]
    fn test_counts_follow_plain_splits() {
        assert_eq!(word_count("one two   three"), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(sentence_count("One. Two. Three"), 3);
        assert_eq!(sentence_count("One. Two."), 3);
        assert_eq!(sentence_count(""), 1);
    }

    #[test]
    fn test_split_words_lowercases_and_strips_punctuation() {
        assert_eq!(split_words("Hello, World! It's 2024."), vec!["hello", "world", "its", "2024"]);
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("The cat sat. It was happy! Was it? yes it was e.g. fine. 3 dogs ran.");
        assert_eq!(
            sentences,
            vec![
                "The cat sat.",
                "It was happy!",
                "Was it? yes it was e.g. fine.",
                "3 dogs ran.",
            ]
        );
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }
}
