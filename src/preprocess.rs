/// Collapses repeated whitespace, trims edges, and normalizes newlines to
/// single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Joins a ticket's subject and body into the single lower-cased,
/// whitespace-collapsed string the vectorizer was fitted on.
pub fn preprocess(subject: &str, body: &str) -> String {
    let mut combined = String::with_capacity(subject.len() + body.len() + 1);
    combined.push_str(subject);
    combined.push(' ');
    combined.push_str(body);
    collapse_whitespace(&combined.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_trims_and_squeezes() {
        assert_eq!(collapse_whitespace("  a \t\n b   c  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }

    #[test]
    fn preprocess_lowercases_and_joins() {
        assert_eq!(
            preprocess("Login FAILED", "Cannot\naccess   my account"),
            "login failed cannot access my account"
        );
    }

    #[test]
    fn preprocess_empty_fields_yield_empty_string() {
        assert_eq!(preprocess("", ""), "");
        assert_eq!(preprocess("   ", "\n"), "");
    }

    #[test]
    fn preprocess_with_one_empty_side_has_no_stray_space() {
        assert_eq!(preprocess("Refund", ""), "refund");
        assert_eq!(preprocess("", "Refund"), "refund");
    }

    #[test]
    fn preprocess_is_idempotent_on_normalized_text() {
        let inputs = [
            "  Double  spaced\tSubject ",
            "ÜBER Größe\u{00a0}test",
            "already normalized text",
        ];
        for input in inputs {
            let once = preprocess(input, "");
            let twice = preprocess(&once, "");
            assert_eq!(once, twice, "input {input:?}");
            assert!(!once.contains("  "));
        }
    }
}
