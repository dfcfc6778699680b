//! Sentiment scoring capability and the built-in lexicon adapter.

use thiserror::Error;
use vidpulse_core::SentimentScores;

/// A scorer failed to produce polarity scores for a text.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ScorerError(pub String);

/// Maps free text to polarity scores.
///
/// Implementations must be pure functions of the input text: `compound` in
/// `[-1.0, 1.0]`, `positive`/`negative`/`neutral` in `[0.0, 1.0]`. Empty
/// text yields [`SentimentScores::NEUTRAL`] rather than an error.
pub trait SentimentScorer {
    /// Score one text.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError`] if the backing service cannot score the text.
    fn polarity_scores(&self, text: &str) -> Result<SentimentScores, ScorerError>;
}

/// Word valences on a `[-4.0, 4.0]` scale. Keys are lowercase single words.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("blessed", 2.5),
    ("blessing", 2.4),
    ("brilliant", 2.8),
    ("divine", 2.6),
    ("easy", 1.9),
    ("epic", 2.2),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("fun", 2.3),
    ("glorious", 2.8),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.9),
    ("incredible", 2.6),
    ("inspiring", 2.4),
    ("love", 3.2),
    ("loved", 2.9),
    ("peace", 2.5),
    ("peaceful", 2.2),
    ("perfect", 2.7),
    ("powerful", 1.8),
    ("recommend", 1.5),
    ("success", 2.7),
    ("thanks", 1.9),
    ("top", 0.8),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("wow", 2.8),
    // Negative signals
    ("angry", -2.3),
    ("awful", -2.0),
    ("bad", -2.5),
    ("ban", -2.6),
    ("banned", -2.0),
    ("boring", -1.3),
    ("broken", -2.1),
    ("crash", -1.7),
    ("dangerous", -2.1),
    ("disappointing", -2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fake", -2.1),
    ("fear", -2.2),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("illegal", -2.6),
    ("misleading", -1.9),
    ("problem", -1.7),
    ("sad", -2.1),
    ("scam", -2.9),
    ("terrible", -2.1),
    ("ugly", -2.3),
    ("useless", -1.8),
    ("warning", -1.4),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Words that flip the polarity of a sentiment word up to three tokens later.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "without", "isn't",
    "aren't", "wasn't", "weren't", "don't", "doesn't", "didn't", "can't", "cannot", "won't",
    "shouldn't", "wouldn't", "couldn't", "ain't",
];

const NEGATION_SCALAR: f64 = -0.74;
const NEGATION_WINDOW: usize = 3;
const EXCLAMATION_AMPLIFIER: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Normalization constant: `compound = s / sqrt(s² + ALPHA)`.
const ALPHA: f64 = 15.0;

/// Lexicon-based scorer tuned for video titles and descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Score `text` directly; the lexicon scorer never fails.
    #[must_use]
    pub fn score(&self, text: &str) -> SentimentScores {
        let valences = token_valences(text);
        if valences.is_empty() {
            return SentimentScores::NEUTRAL;
        }

        let mut sum: f64 = valences.iter().sum();
        let emphasis = exclamation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = normalize(sum);

        let mut pos_sum = 0.0_f64;
        let mut neg_sum = 0.0_f64;
        let mut neu_count = 0.0_f64;
        for &v in &valences {
            if v > 0.0 {
                pos_sum += v + 1.0;
            } else if v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        if total <= 0.0 {
            return SentimentScores::NEUTRAL;
        }

        SentimentScores {
            compound,
            positive: (pos_sum / total).clamp(0.0, 1.0),
            negative: (neg_sum.abs() / total).clamp(0.0, 1.0),
            neutral: (neu_count / total).clamp(0.0, 1.0),
        }
    }
}

impl SentimentScorer for LexiconScorer {
    fn polarity_scores(&self, text: &str) -> Result<SentimentScores, ScorerError> {
        Ok(self.score(text))
    }
}

/// One valence per word token; `0.0` for words not in the lexicon.
fn token_valences(text: &str) -> Vec<f64> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
                .replace('’', "'")
        })
        .filter(|w| !w.is_empty())
        .collect();

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let Some(mut valence) = lexicon_valence(word) else {
                return 0.0;
            };
            let start = i.saturating_sub(NEGATION_WINDOW);
            if words[start..i].iter().any(|w| NEGATIONS.contains(&w.as_str())) {
                valence *= NEGATION_SCALAR;
            }
            valence
        })
        .collect()
}

fn lexicon_valence(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|&&(lex_word, _)| lex_word == word)
        .map(|&(_, weight)| weight)
}

fn exclamation_emphasis(text: &str) -> f64 {
    let count = text.chars().filter(|&c| c == '!').count().min(MAX_EXCLAMATIONS);
    #[allow(clippy::cast_precision_loss)]
    let count = count as f64;
    count * EXCLAMATION_AMPLIFIER
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
