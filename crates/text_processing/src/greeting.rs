//! Greeting predicates
//!
//! Three related checks with their own word lists:
//! - `is_greeting`: a short message that only greets
//! - `has_greeting_phrase` / `mentions_emotion_word`: the pair used when
//!   composing chat replies for mixed greeting and emotion messages

use crate::keywords::{contains_any, normalize};

/// Longest message, in whitespace-separated words, that can be a pure greeting
pub const MAX_GREETING_WORDS: usize = 6;

const GREETING_WORDS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "namaste",
    "vannakkam",
    "em chestunav",
    "ela unnav",
    "epdi iruka",
    "kaise ho",
];

/// Words that cancel a pure greeting
const GREETING_EMOTION_WORDS: &[&str] = &[
    "tension",
    "stress",
    "sad",
    "happy",
    "tired",
    "worried",
    "badhaga",
    "santhosham",
    "kopam",
    "angry",
];

/// Small-talk phrases checked when composing a chat reply
const REPLY_GREETING_PHRASES: &[&str] =
    &["em chestunav", "what are you doing", "epdi iruka", "kaise ho"];

/// Emotion words checked when composing a chat reply
const REPLY_EMOTION_WORDS: &[&str] = &[
    "tension",
    "stress",
    "sad",
    "happy",
    "tired",
    "worried",
    "badhaga",
    "santhosham",
];

/// True when `text` greets, carries no emotion word and has at most six words
pub fn is_greeting(text: &str) -> bool {
    let lowered = normalize(text);
    contains_any(&lowered, GREETING_WORDS)
        && !contains_any(&lowered, GREETING_EMOTION_WORDS)
        && text.split_whitespace().count() <= MAX_GREETING_WORDS
}

/// True when `text` contains a small-talk phrase
pub fn has_greeting_phrase(text: &str) -> bool {
    contains_any(&normalize(text), REPLY_GREETING_PHRASES)
}

/// True when `text` contains an emotion word
pub fn mentions_emotion_word(text: &str) -> bool {
    contains_any(&normalize(text), REPLY_EMOTION_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_greeting() {
        assert!(is_greeting("hi there"));
        assert!(is_greeting("Namaste!"));
        assert!(!is_greeting("hi, I'm stressed"));
        assert!(!is_greeting("good morning"));
    }

    #[test]
    fn test_word_count_boundary() {
        assert!(is_greeting("hello hello hello hello hello hello"));
        assert!(!is_greeting("hello hello hello hello hello hello hello"));
        assert!(!is_greeting("hi hello hey hi hello hey hi hello"));
    }

    #[test]
    fn test_reply_predicates() {
        assert!(has_greeting_phrase("em chestunav? tension ga undi"));
        assert!(mentions_emotion_word("em chestunav? tension ga undi"));
        assert!(has_greeting_phrase("What are you doing"));
        assert!(!mentions_emotion_word("what are you doing"));
        // kopam cancels a greeting but is not a reply emotion word
        assert!(!mentions_emotion_word("kopam"));
    }
}
