use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default search term preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Canonical composition so "ɛ" typed either way hits the same entries
        let text: String = text.nfc().collect();

        // Collapse inner whitespace and newlines
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TermPreprocessor;
impl Preprocessor for TermPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(TermPreprocessor.process(""), "");
        assert_eq!(TermPreprocessor.process(" \t\n "), "");
    }

    #[test]
    fn trims_and_collapses_whitespace() {
        assert_eq!(TermPreprocessor.process("  aman \n  n  wasif "), "aman n wasif");
    }

    #[test]
    fn composes_decomposed_input() {
        let decomposed = "e\u{0301}";
        assert_eq!(TermPreprocessor.process(decomposed), "\u{00e9}");
    }
}
