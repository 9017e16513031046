//! Topical tag ranking.
//!
//! Tags come from a term-importance scorer fitted on the single document
//! being ingested. The default scorer mirrors a classic tf-idf vectorizer:
//! lowercased tokens of two or more word characters, English stop words
//! removed, vocabulary capped to the most frequent terms, scores
//! L2-normalised. On a one-document corpus the inverse-document factor is
//! uniform, so the ranking reduces to term frequency.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors from tag ranking.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("no extractable terms in document text")]
    NoTerms,
}

/// Scores the terms of a document. Each term appears at most once in the
/// result; higher scores mean more important. An empty result means the
/// text has no extractable terms.
pub trait TermScorer: Send + Sync {
    fn score_terms(&self, text: &str) -> Vec<(String, f32)>;
}

/// Pick the `count` highest-scoring terms, descending by score.
///
/// Ties break alphabetically so the ranking is deterministic. Documents
/// with fewer distinct terms than `count` yield fewer tags; a document
/// with no extractable terms at all is an error the caller must handle.
pub fn rank_tags<S>(scorer: &S, text: &str, count: usize) -> Result<Vec<String>, TagError>
where
    S: TermScorer + ?Sized,
{
    let mut scored = scorer.score_terms(text);
    if scored.is_empty() {
        return Err(TagError::NoTerms);
    }

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.truncate(count);
    Ok(scored.into_iter().map(|(term, _)| term).collect())
}

/// Term-frequency scorer over a bounded vocabulary.
#[derive(Debug, Clone)]
pub struct TfIdfScorer {
    /// Keep only this many of the most frequent terms.
    vocabulary_cap: usize,
}

impl TfIdfScorer {
    pub fn new(vocabulary_cap: usize) -> Self {
        Self { vocabulary_cap }
    }
}

impl TermScorer for TfIdfScorer {
    fn score_terms(&self, text: &str) -> Vec<(String, f32)> {
        let lowered = text.to_lowercase();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in token_pattern().find_iter(&lowered) {
            let token = token.as_str();
            if stop_words().contains(token) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        // Vocabulary cap: keep the most frequent terms, ties alphabetical
        let mut terms: Vec<(&str, usize)> = counts.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(self.vocabulary_cap);

        if terms.is_empty() {
            return Vec::new();
        }

        // Single-document corpus: idf is uniform, so the score is the
        // L2-normalised term frequency
        let norm = terms
            .iter()
            .map(|(_, c)| {
                let c = *c as f32;
                c * c
            })
            .sum::<f32>()
            .sqrt();

        terms
            .into_iter()
            .map(|(term, c)| (term.to_string(), c as f32 / norm))
            .collect()
    }
}

/// Tokens are runs of two or more word characters.
fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("Invalid token regex"))
}

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

// Classic English stop-word list used by tf-idf vectorizers.
static STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];
