//! Salient-phrase extraction capability and its adapters.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ExtractorError(pub String);

/// Maps free text to its most salient phrases.
///
/// Returns at most `top_n` distinct phrases, most frequent first. An
/// implementation without linguistic capability returns an empty list.
pub trait TopicExtractor {
    /// Extract up to `top_n` phrases from `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError`] if the backing service fails.
    fn extract_topics(&self, text: &str, top_n: usize) -> Result<Vec<String>, ExtractorError>;
}

/// Extractor used when no phrase extraction is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTopicExtractor;

impl TopicExtractor for NullTopicExtractor {
    fn extract_topics(&self, _text: &str, _top_n: usize) -> Result<Vec<String>, ExtractorError> {
        Ok(Vec::new())
    }
}

/// Words, with internal apostrophes, hyphens, `&`, `+` and dots kept, or a
/// single punctuation character.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’&+.\-][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]")
        .expect("valid token regex")
});

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "before", "being", "between", "both", "but", "by", "can", "could", "did", "do",
    "does", "doing", "during", "each", "every", "few", "for", "from", "get", "got", "had", "has",
    "have", "he", "her", "here", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "just", "me", "more", "most", "much", "my", "no", "nor", "not", "now", "of", "off", "on",
    "only", "or", "other", "our", "out", "over", "own", "same", "she", "should", "so", "some",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "us", "very", "vs", "was", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "would", "you", "your",
];

const MAX_PHRASE_TOKENS: usize = 4;

/// Punctuation that opens a new sentence or title segment.
const SENTENCE_BREAKS: &[&str] = &[".", "!", "?", "|"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Punct(&'a str),
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| {
            let s = m.as_str();
            if s.chars().next().is_some_and(char::is_alphanumeric) {
                Token::Word(s)
            } else {
                Token::Punct(s)
            }
        })
        .collect()
}

fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// A capitalized word with no further capitals or digits, e.g. `"Watch"`
/// but not `"OpenAI"` or `"GPT4"`.
fn is_plain_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.all(char::is_lowercase)
}

fn is_numeric(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Frequency-ranked phrase extraction without a language model.
///
/// Two phrase pools are merged, entity-like phrases first:
/// - runs of capitalized, non-stop-word tokens (names of people,
///   organizations and products, e.g. `"OpenAI"`, `"Lord Shiva"`);
/// - noun-phrase-like chunks: maximal runs of non-stop-word tokens
///   between stop words and punctuation.
///
/// Runs longer than four tokens are split. Phrases are ranked by how often
/// they occur across both pools; ties keep first-seen order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTopicExtractor;

impl HeuristicTopicExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Entity-like phrases in order of appearance, with repeats.
    ///
    /// A single plain capitalized word opening a sentence (`"Watch this."`)
    /// is capitalized by position only and is not an entity.
    #[must_use]
    pub fn entities(&self, text: &str) -> Vec<String> {
        let runs = collect_runs(&tokenize(text), |w| is_capitalized(w) && !is_stop_word(w));
        into_phrases(&runs, |run| {
            run.sentence_initial && run.words.len() == 1 && is_plain_capitalized(run.words[0])
        })
    }

    /// Noun-phrase-like chunks in order of appearance, with repeats.
    #[must_use]
    pub fn noun_chunks(&self, text: &str) -> Vec<String> {
        into_phrases(&collect_runs(&tokenize(text), |w| !is_stop_word(w)), |_| false)
    }

    /// Rank every phrase in `text`, most frequent first.
    #[must_use]
    pub fn ranked(&self, text: &str, top_n: usize) -> Vec<String> {
        let mut pool = self.entities(text);
        pool.extend(self.noun_chunks(text));
        rank_by_frequency(pool, top_n)
    }
}

impl TopicExtractor for HeuristicTopicExtractor {
    fn extract_topics(&self, text: &str, top_n: usize) -> Result<Vec<String>, ExtractorError> {
        Ok(self.ranked(text, top_n))
    }
}

/// A maximal run of accepted words.
#[derive(Debug, Default)]
struct Run<'a> {
    words: Vec<&'a str>,
    /// The first word opens the text or follows a sentence break.
    sentence_initial: bool,
}

/// Split `tokens` into maximal runs of word tokens accepted by `keep`.
fn collect_runs<'a, F>(tokens: &[Token<'a>], keep: F) -> Vec<Run<'a>>
where
    F: Fn(&str) -> bool,
{
    let mut runs = Vec::new();
    let mut run = Run::default();
    let mut at_sentence_start = true;

    for token in tokens {
        match *token {
            Token::Word(w) => {
                if keep(w) {
                    if run.words.is_empty() {
                        run.sentence_initial = at_sentence_start;
                    }
                    run.words.push(w);
                } else if !run.words.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
                at_sentence_start = false;
            }
            Token::Punct(p) => {
                if !run.words.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
                at_sentence_start |= SENTENCE_BREAKS.contains(&p);
            }
        }
    }
    if !run.words.is_empty() {
        runs.push(run);
    }
    runs
}

/// Join runs into phrases of at most [`MAX_PHRASE_TOKENS`] words, dropping
/// runs matched by `skip` and lone one-character or numeric words.
fn into_phrases<F>(runs: &[Run<'_>], skip: F) -> Vec<String>
where
    F: Fn(&Run<'_>) -> bool,
{
    let mut phrases = Vec::new();
    for run in runs {
        if skip(run) {
            continue;
        }
        for chunk in run.words.chunks(MAX_PHRASE_TOKENS) {
            if chunk.len() == 1 && (chunk[0].chars().count() < 2 || is_numeric(chunk[0])) {
                continue;
            }
            phrases.push(chunk.join(" "));
        }
    }
    phrases
}

/// Count occurrences; order by count descending, then first occurrence.
fn rank_by_frequency(pool: Vec<String>, top_n: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, phrase) in pool.into_iter().enumerate() {
        counts
            .entry(phrase)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, index));
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(phrase, (count, first))| (phrase, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(top_n);
    ranked.into_iter().map(|(phrase, _, _)| phrase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_extractor_is_empty() {
        let topics = NullTopicExtractor.extract_topics("OpenAI launches GPT", 5).unwrap();
        assert!(topics.is_empty());
    }

    #[test]
    fn entities_are_capitalized_runs() {
        let ex = HeuristicTopicExtractor::new();
        let entities = ex.entities("the new video from Two Minute Papers about OpenAI");
        assert_eq!(entities, vec!["Two Minute Papers", "OpenAI"]);
    }

    #[test]
    fn entities_break_on_stop_words_and_punctuation() {
        let ex = HeuristicTopicExtractor::new();
        let entities = ex.entities("The Rise Of Google, Meta and Apple");
        assert_eq!(entities, vec!["Rise", "Google", "Meta", "Apple"]);
    }

    #[test]
    fn sentence_initial_common_words_are_not_entities() {
        let ex = HeuristicTopicExtractor::new();
        let entities = ex.entities("Watch this. Learn how. OpenAI wins");
        assert_eq!(entities, vec!["OpenAI"]);
    }

    #[test]
    fn sentence_initial_multi_word_names_are_entities() {
        let ex = HeuristicTopicExtractor::new();
        let entities = ex.entities("Lord Shiva bhajan | Morning prayer! Krishna leela");
        assert_eq!(entities, vec!["Lord Shiva"]);
    }

    #[test]
    fn capitalized_word_after_comma_is_still_an_entity() {
        let ex = HeuristicTopicExtractor::new();
        assert_eq!(ex.entities("watch this, Google"), vec!["Google"]);
    }

    #[test]
    fn noun_chunks_split_on_stop_words() {
        let ex = HeuristicTopicExtractor::new();
        let chunks = ex.noun_chunks("how to build an ai agent in python");
        assert_eq!(chunks, vec!["build", "ai agent", "python"]);
    }

    #[test]
    fn single_characters_and_numbers_are_dropped() {
        let ex = HeuristicTopicExtractor::new();
        let chunks = ex.noun_chunks("x | 2024 | rust");
        assert_eq!(chunks, vec!["rust"]);
    }

    #[test]
    fn long_runs_are_split() {
        let ex = HeuristicTopicExtractor::new();
        let chunks = ex.noun_chunks("alpha beta gamma delta epsilon zeta");
        assert_eq!(chunks, vec!["alpha beta gamma delta", "epsilon zeta"]);
    }

    #[test]
    fn ranked_by_frequency_then_first_seen() {
        let ex = HeuristicTopicExtractor::new();
        let text = "rust tips. go tips. rust news. rust tips.";
        let topics = ex.ranked(text, 10);
        assert_eq!(topics, vec!["rust tips", "go tips", "rust news"]);
    }

    #[test]
    fn entity_and_chunk_occurrences_are_merged() {
        let ex = HeuristicTopicExtractor::new();
        // The second "Python" opens a sentence, so it only counts as a chunk.
        let topics = ex.ranked("learn Python. Python for data", 3);
        assert_eq!(topics[0], "Python");
        assert_eq!(topics.len(), 3);
    }

    #[test]
    fn respects_top_n() {
        let ex = HeuristicTopicExtractor::new();
        let topics = ex.extract_topics("alpha. beta. gamma. delta.", 2).unwrap();
        assert_eq!(topics, vec!["alpha", "beta"]);
    }

    #[test]
    fn empty_text_yields_no_topics() {
        let ex = HeuristicTopicExtractor::new();
        assert!(ex.extract_topics("", 15).unwrap().is_empty());
    }

    #[test]
    fn results_are_distinct() {
        let ex = HeuristicTopicExtractor::new();
        let topics = ex.ranked("Shiva Shiva Shiva. Shiva.", 10);
        let mut deduped = topics.clone();
        deduped.dedup();
        assert_eq!(topics, deduped);
    }
}
