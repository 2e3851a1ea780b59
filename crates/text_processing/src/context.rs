//! Context flags
//!
//! Seven independent keyword tests over the lowercased message. Every flag
//! is evaluated on every call and any combination may be set. The lists mix
//! English with romanized Telugu, Tamil and Hindi.

use yoga_agent_core::ContextFlags;

use crate::keywords::{contains_any, normalize};

const QUESTION_WORDS: &[&str] = &["emi", "enna", "kya", "what", "how", "why"];
const SHARING_WORDS: &[&str] = &["nenu", "naan", "main", "i am", "i was", "i did"];
const PROBLEM_WORDS: &[&str] = &[
    "problem",
    "issue",
    "tension",
    "stress",
    "worry",
    "kashtam",
    "pareshaani",
];
const POSITIVE_WORDS: &[&str] = &["good", "happy", "bagundi", "nallairuku", "achha", "great"];
const WORK_WORDS: &[&str] = &["work", "job", "office", "vellu", "pani", "kaam"];
const FAMILY_WORDS: &[&str] = &["family", "parents", "intlo", "veetla", "ghar"];
const TIME_WORDS: &[&str] = &["today", "evala", "inniki", "aaj", "yesterday", "tomorrow"];

/// Chat-path question words, checked alongside a trailing `?`
const CHAT_QUESTION_WORDS: &[&str] = &["what", "how", "why", "when", "emi", "ela", "enna", "kya"];

/// Activities that already help the user cope
const COPING_WORDS: &[&str] = &[
    "music", "songs", "walk", "friends", "family", "padatam", "vindam",
];

/// Derive all context flags for `text`
pub fn extract_context(text: &str) -> ContextFlags {
    let text = normalize(text);
    ContextFlags {
        is_question: text.contains('?') || contains_any(&text, QUESTION_WORDS),
        is_sharing: contains_any(&text, SHARING_WORDS),
        is_problem: contains_any(&text, PROBLEM_WORDS),
        is_positive: contains_any(&text, POSITIVE_WORDS),
        is_work_related: contains_any(&text, WORK_WORDS),
        is_family_related: contains_any(&text, FAMILY_WORDS),
        mentions_time: contains_any(&text, TIME_WORDS),
    }
}

/// Question test used by the chat path
pub fn is_chat_question(text: &str) -> bool {
    let text = normalize(text);
    text.ends_with('?') || contains_any(&text, CHAT_QUESTION_WORDS)
}

/// True when the message mentions a coping activity
pub fn mentions_coping(text: &str) -> bool {
    contains_any(&normalize(text), COPING_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_independent() {
        let flags = extract_context("I am having a problem at the office today with my family");
        assert!(flags.is_sharing);
        assert!(flags.is_problem);
        assert!(flags.is_work_related);
        assert!(flags.is_family_related);
        assert!(flags.mentions_time);
        assert!(!flags.is_positive);
        assert!(!flags.is_question);
    }

    #[test]
    fn test_mixed_language_lists() {
        let flags = extract_context("intlo kashtam ga undi");
        assert!(flags.is_family_related);
        assert!(flags.is_problem);

        let flags = extract_context("aaj kaam achha tha");
        assert!(flags.mentions_time);
        assert!(flags.is_work_related);
        assert!(flags.is_positive);
    }

    #[test]
    fn test_question_detection() {
        assert!(extract_context("really?").is_question);
        assert!(extract_context("enna aachu").is_question);
        assert_eq!(extract_context(""), ContextFlags::default());

        assert!(is_chat_question("when is the class"));
        assert!(is_chat_question("sure?"));
        assert!(!is_chat_question("I went out"));
    }

    #[test]
    fn test_coping() {
        assert!(mentions_coping("I listened to music"));
        assert!(mentions_coping("padatam vinnanu"));
        assert!(!mentions_coping("I stayed home"));
    }
}
