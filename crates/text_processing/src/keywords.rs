//! Substring keyword matching
//!
//! All lists in this crate are matched as plain substrings of the
//! lowercased text, so short entries such as `hi` also match inside
//! longer words.

/// Lowercase and trim, the normal form every matcher works on
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True when any keyword occurs in `text`
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Number of distinct keywords that occur in `text`
pub fn count_matches(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_semantics() {
        assert!(contains_any("this is fine", &["hi"]));
        assert!(!contains_any("hello", &["bye", "later"]));
        assert_eq!(count_matches("nenu ela unnav", &["nenu", "ela", "unnav", "emi"]), 3);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Kaise HO \n"), "kaise ho");
    }
}
