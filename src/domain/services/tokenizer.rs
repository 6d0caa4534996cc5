/// Characters treated as word separators in addition to whitespace.
const SEPARATORS: &[char] = &[',', '.', '(', ')', '/', '\\', '[', ']', '-', '"'];

/// Split free text into lowercase word tokens.
///
/// Used only when model-based keyword extraction is unavailable, so it keeps
/// quantities and units that the model would have dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_whitespace() {
        assert_eq!(tokenize("Крышка 200 ММ"), vec!["крышка", "200", "мм"]);
    }

    #[test]
    fn splits_on_punctuation() {
        assert_eq!(
            tokenize("лоток (перфорированный), 100/100-М10 \"new\""),
            vec!["лоток", "перфорированный", "100", "100", "м10", "new"]
        );
    }

    #[test]
    fn keeps_dimension_markers_inside_tokens() {
        assert_eq!(tokenize("Короб 200х200"), vec!["короб", "200х200"]);
    }

    #[test]
    fn empty_and_separator_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,.-  ").is_empty());
    }
}
