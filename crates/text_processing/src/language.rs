//! Language detection for romanized Indian-language chat
//!
//! Two ordered decision tables are evaluated in turn; the first row that
//! matches wins and anything unmatched is English.
//!
//! 1. Full phrases (`em chestunav`, `epdi iruka`, `kaise ho`, ...)
//! 2. Word lists, checked Telugu, then Tamil, then Hindi. The first list
//!    with any hit wins, regardless of how many hits the later lists get.

use yoga_agent_core::Language;

use crate::keywords::{contains_any, count_matches, normalize};

/// Phrase table, highest priority
const PHRASE_RULES: &[(Language, &[&str])] = &[
    (Language::Telugu, &["em chestunav", "enti chestunav"]),
    (Language::Tamil, &["epdi iruka", "enna panra"]),
    (Language::Hindi, &["kaise ho", "kya kar rahe ho"]),
];

/// Word table, consulted only when no phrase matched
const WORD_RULES: &[(Language, &[&str])] = &[
    (
        Language::Telugu,
        &["nenu", "nuvvu", "unnav", "chestunav", "ela", "emi", "enti", "bagundi", "ledhu"],
    ),
    (
        Language::Tamil,
        &["naan", "nee", "iruku", "epdi", "enna", "panra", "sollu", "illa", "aama"],
    ),
    (
        Language::Hindi,
        &["main", "tum", "kaise", "kya", "kar", "rahe", "ho", "hai", "achha", "nahi"],
    ),
];

/// Keyword-table language detector
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect the language of `text`. Never fails.
    pub fn detect(&self, text: &str) -> Language {
        let text = normalize(text);

        if let Some((language, _)) = PHRASE_RULES
            .iter()
            .find(|(_, phrases)| contains_any(&text, phrases))
        {
            tracing::debug!(language = %language, "Language detected via phrase");
            return *language;
        }

        for (language, words) in WORD_RULES {
            let hits = count_matches(&text, words);
            if hits > 0 {
                tracing::debug!(language = %language, hits, "Language detected via word list");
                return *language;
            }
        }

        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Language {
        LanguageDetector::new().detect(text)
    }

    #[test]
    fn test_phrase_priority() {
        assert_eq!(detect("kaise ho"), Language::Hindi);
        // Telugu words present, but the Hindi phrase wins
        assert_eq!(detect("nenu nuvvu bagundi kaise ho"), Language::Hindi);
        assert_eq!(detect("Em chestunav?"), Language::Telugu);
        assert_eq!(detect("epdi iruka da"), Language::Tamil);
    }

    #[test]
    fn test_phrase_table_order() {
        // Both Telugu and Hindi phrases: Telugu row comes first
        assert_eq!(detect("em chestunav, kaise ho"), Language::Telugu);
    }

    #[test]
    fn test_word_list_first_hit_wins() {
        assert_eq!(detect("nenu office ki velthunna"), Language::Telugu);
        assert_eq!(detect("naan veetla irukken"), Language::Tamil);
        assert_eq!(detect("mujhe nahi pata"), Language::Hindi);
        // one Telugu hit beats three Hindi hits
        assert_eq!(detect("kya kar rahe, bagundi"), Language::Telugu);
    }

    #[test]
    fn test_english_default() {
        assert_eq!(detect("good morning"), Language::English);
        assert_eq!(detect(""), Language::English);
        assert_eq!(detect("   "), Language::English);
    }

    #[test]
    fn test_substring_matching() {
        // "ela" occurs inside "relax"
        assert_eq!(detect("relax"), Language::Telugu);
        // "ho" inside "hot"
        assert_eq!(detect("hot day"), Language::Hindi);
    }
}
