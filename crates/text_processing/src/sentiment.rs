//! Lexicon-based sentiment scoring
//!
//! Produces a polarity in `[-1, 1]` and a subjectivity in `[0, 1]`. Each
//! lexicon word found in the text yields one assessment; an intensifier
//! directly before it scales the assessment, and a negation anywhere since
//! the previous assessment flips and halves its polarity. The result is the
//! mean over all assessments, or zero for both scores when none were found.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Polarity multiplier applied by a preceding negation
const NEGATION_FACTOR: f64 = -0.5;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("joy", 0.8, 0.9),
    ("great", 0.8, 0.75),
    ("good", 0.7, 0.6),
    ("nice", 0.6, 1.0),
    ("fine", 0.4, 0.5),
    ("awesome", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("excited", 0.4, 0.75),
    ("better", 0.5, 0.5),
    ("best", 1.0, 0.3),
    ("calm", 0.3, 0.75),
    ("peaceful", 0.5, 0.8),
    ("relaxed", 0.4, 0.6),
    ("fun", 0.3, 0.2),
    ("beautiful", 0.85, 1.0),
    ("proud", 0.8, 1.0),
    ("grateful", 0.6, 0.8),
    // negative
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("hate", -0.8, 0.9),
    ("angry", -0.5, 1.0),
    ("upset", -0.6, 0.8),
    ("frustrated", -0.7, 1.0),
    ("annoyed", -0.5, 0.8),
    ("stressed", -0.7, 0.9),
    ("stress", -0.5, 0.8),
    ("tense", -0.5, 0.8),
    ("tension", -0.5, 0.8),
    ("anxious", -0.6, 0.9),
    ("worried", -0.6, 0.8),
    ("worry", -0.4, 0.7),
    ("scared", -0.6, 1.0),
    ("afraid", -0.6, 0.9),
    ("nervous", -0.5, 0.9),
    ("depressed", -0.8, 1.0),
    ("lonely", -0.5, 1.0),
    ("tired", -0.4, 0.7),
    ("exhausted", -0.5, 0.8),
    ("overwhelmed", -0.6, 0.9),
    ("difficult", -0.5, 1.0),
    ("hard", -0.3, 0.5),
    ("sick", -0.7, 0.9),
    ("hurt", -0.6, 0.8),
    ("pain", -0.6, 0.8),
    ("boring", -1.0, 1.0),
];

/// (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.3),
    ("too", 1.2),
    ("quite", 1.1),
    ("extremely", 1.5),
    ("totally", 1.4),
    ("completely", 1.4),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nothing", "cannot", "without"];

static LEXICON_INDEX: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    LEXICON
        .iter()
        .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
        .collect()
});

static INTENSIFIER_INDEX: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| INTENSIFIERS.iter().copied().collect());

/// Polarity and subjectivity of a text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Negative to positive, `-1.0..=1.0`
    pub polarity: f64,
    /// Factual to opinionated, `0.0..=1.0`
    pub subjectivity: f64,
    /// Lexicon words that contributed
    pub assessments: usize,
}

impl SentimentResult {
    /// True for text with no opinion content
    pub fn is_objective(&self, threshold: f64) -> bool {
        self.subjectivity < threshold
    }
}

/// Lexicon sentiment scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut assessments = 0usize;

        let mut negated = false;
        let mut multiplier = 1.0;

        for word in lowered.unicode_words() {
            if is_negation(word) {
                negated = true;
                continue;
            }

            if let Some(factor) = INTENSIFIER_INDEX.get(word) {
                multiplier *= factor;
                continue;
            }

            if let Some((polarity, subjectivity)) = LEXICON_INDEX.get(word) {
                let mut polarity = (polarity * multiplier).clamp(-1.0, 1.0);
                let subjectivity = (subjectivity * multiplier).clamp(0.0, 1.0);
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                polarity_sum += polarity;
                subjectivity_sum += subjectivity;
                assessments += 1;
                negated = false;
            }

            multiplier = 1.0;
        }

        if assessments == 0 {
            return SentimentResult::default();
        }

        let n = assessments as f64;
        SentimentResult {
            polarity: (polarity_sum / n).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / n).clamp(0.0, 1.0),
            assessments,
        }
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't") || word.ends_with("n’t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> SentimentResult {
        SentimentAnalyzer::new().analyze(text)
    }

    #[test]
    fn test_objective_text() {
        let result = analyze("I went to the office today");
        assert_eq!(result.polarity, 0.0);
        assert_eq!(result.subjectivity, 0.0);
        assert_eq!(result.assessments, 0);
        assert!(result.is_objective(0.3));
    }

    #[test]
    fn test_positive_and_negative() {
        assert!(analyze("I am happy").polarity > 0.3);
        assert!(analyze("I feel stressed").polarity < -0.3);
        assert!(analyze("I feel stressed").subjectivity >= 0.3);
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        let plain = analyze("good");
        let boosted = analyze("very good");
        assert!(boosted.polarity > plain.polarity);
        assert_eq!(analyze("extremely awesome").polarity, 1.0);
        assert!(analyze("really really happy").subjectivity <= 1.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let result = analyze("I am not happy");
        assert!((result.polarity - (-0.4)).abs() < 1e-9);
        assert!(analyze("I don't feel good").polarity < 0.0);
    }

    #[test]
    fn test_average_over_assessments() {
        let result = analyze("happy but sad");
        assert_eq!(result.assessments, 2);
        assert!((result.polarity - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_for_any_text() {
        for text in ["", "!!!", "worst terrible awful horrible", "best best best"] {
            let result = analyze(text);
            assert!((-1.0..=1.0).contains(&result.polarity));
            assert!((0.0..=1.0).contains(&result.subjectivity));
        }
    }
}
