//! Text normalization and tokenization shared by every query stage.

/// Normalize query text: control characters are stripped (whitespace
/// controls become spaces), then the text is lowercased, trimmed, and
/// whitespace runs collapse to a single space. Punctuation is kept.
pub fn normalize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if c.is_control() {
                None
            } else {
                Some(c)
            }
        })
        .collect();

    cleaned
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split normalized text into alphanumeric word tokens.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Tokens joined by single spaces with a leading and trailing space, so that
/// whole-word and phrase lookups are a plain `contains(" term ")`.
pub fn padded(tokens: &[&str]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.len() + 1).sum::<usize>() + 1);
    out.push(' ');
    for t in tokens {
        out.push_str(t);
        out.push(' ');
    }
    out
}

/// Whether `padded` contains `term` (a word or space-separated phrase) on
/// word boundaries.
pub fn has_term(padded: &str, term: &str) -> bool {
    let needle = format!(" {term} ");
    padded.contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_lowercases() {
        assert_eq!(normalize("  What   IS\ta  PPO?\n"), "what is a ppo?");
    }

    #[test]
    fn strips_control_characters_only() {
        assert_eq!(normalize("dental\u{0000}\u{001b} plan"), "dental plan");
        assert_eq!(normalize("co-pay: $20!"), "co-pay: $20!");
    }

    #[test]
    fn tokenize_drops_punctuation() {
        assert_eq!(tokenize("co-pay: $20!"), vec!["co", "pay", "20"]);
    }

    #[test]
    fn has_term_respects_word_boundaries() {
        let p = padded(&tokenize("what is the open enrollment window"));
        assert!(has_term(&p, "open enrollment"));
        assert!(has_term(&p, "is"));
        assert!(!has_term(&p, "enroll"));
    }
}
