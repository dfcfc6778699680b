//! Corpus-level theme extraction over video titles.

use std::collections::HashSet;

use vidpulse_core::Dataset;

use crate::error::StageFailure;
use crate::insights::IndustryThemes;
use crate::topics::TopicExtractor;

/// All titles joined by single spaces, in dataset order.
#[must_use]
pub fn title_corpus(dataset: &Dataset) -> String {
    dataset
        .records()
        .iter()
        .map(|r| r.title.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ask `extractor` for the `top_n` most salient phrases in the title corpus.
///
/// Runs once per dataset. Results beyond `top_n` and repeated phrases from
/// a misbehaving extractor are dropped.
///
/// # Errors
///
/// Returns [`StageFailure::Extractor`] if the extractor fails.
pub fn extract(
    dataset: &Dataset,
    extractor: &dyn TopicExtractor,
    top_n: usize,
) -> Result<IndustryThemes, StageFailure> {
    let corpus = title_corpus(dataset);
    let raw = extractor.extract_topics(&corpus, top_n)?;

    let mut seen = HashSet::new();
    let top_themes: Vec<String> = raw
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .take(top_n)
        .collect();

    tracing::debug!(
        corpus_chars = corpus.len(),
        themes = top_themes.len(),
        "themes extracted"
    );
    Ok(IndustryThemes { top_themes })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use vidpulse_core::VideoRecord;

    use super::*;
    use crate::topics::{ExtractorError, HeuristicTopicExtractor, NullTopicExtractor};

    /// Records the text it was given and returns a canned answer.
    struct Recording {
        seen: RefCell<Vec<(String, usize)>>,
        answer: Vec<&'static str>,
    }

    impl TopicExtractor for Recording {
        fn extract_topics(&self, text: &str, top_n: usize) -> Result<Vec<String>, ExtractorError> {
            self.seen.borrow_mut().push((text.to_string(), top_n));
            Ok(self.answer.iter().map(ToString::to_string).collect())
        }
    }

    struct Failing;

    impl TopicExtractor for Failing {
        fn extract_topics(&self, _: &str, _: usize) -> Result<Vec<String>, ExtractorError> {
            Err(ExtractorError("model not loaded".to_string()))
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            VideoRecord::new("a", "Rust Async", "c", 0, 0, 0),
            VideoRecord::new("b", "", "c", 0, 0, 0),
            VideoRecord::new("c", "Rust Macros", "c", 0, 0, 0),
        ])
        .unwrap()
    }

    #[test]
    fn corpus_joins_titles_with_spaces() {
        assert_eq!(title_corpus(&dataset()), "Rust Async  Rust Macros");
    }

    #[test]
    fn extractor_called_once_with_corpus_and_top_n() {
        let ex = Recording {
            seen: RefCell::new(Vec::new()),
            answer: vec!["Rust"],
        };
        let themes = extract(&dataset(), &ex, 15).unwrap();
        assert_eq!(themes.top_themes, vec!["Rust"]);
        let seen = ex.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], ("Rust Async  Rust Macros".to_string(), 15));
    }

    #[test]
    fn oversized_or_repeated_answers_are_trimmed() {
        let ex = Recording {
            seen: RefCell::new(Vec::new()),
            answer: vec!["a", "a", "b", "c", "d"],
        };
        let themes = extract(&dataset(), &ex, 2).unwrap();
        assert_eq!(themes.top_themes, vec!["a", "b"]);
    }

    #[test]
    fn null_extractor_gives_empty_themes() {
        let themes = extract(&dataset(), &NullTopicExtractor, 15).unwrap();
        assert!(themes.top_themes.is_empty());
    }

    #[test]
    fn heuristic_extractor_finds_repeated_phrase() {
        let themes = extract(&dataset(), &HeuristicTopicExtractor::new(), 15).unwrap();
        assert!(
            themes.top_themes.iter().any(|t| t.contains("Rust")),
            "got {:?}",
            themes.top_themes
        );
    }

    #[test]
    fn extractor_failure_is_stage_failure() {
        let err = extract(&dataset(), &Failing, 15).unwrap_err();
        assert!(matches!(err, StageFailure::Extractor(_)));
    }
}
