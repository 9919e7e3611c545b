//! Text cleanup for DOM-extracted fragments.
//!
//! Result items and article bodies are assembled from nested markup, so the
//! raw text contains indentation and line breaks from the page source. The
//! gazette also mixes composed and decomposed accents across documents.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Regex matching runs of whitespace, including newlines.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a DOM text fragment: NFC, collapse whitespace runs, trim.
pub fn clean_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    WHITESPACE_RUN.replace_all(&composed, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_trims() {
        assert_eq!(clean_text("  Koninklijk besluit  "), "Koninklijk besluit");
    }

    #[test]
    fn test_clean_text_collapses_runs() {
        assert_eq!(
            clean_text("Koninklijk\n        besluit\tbetreffende"),
            "Koninklijk besluit betreffende"
        );
    }

    #[test]
    fn test_clean_text_normalizes_accents() {
        // "Arrête" with a decomposed circumflex normalizes to the composed form
        let decomposed = "Arre\u{0302}te";
        assert_eq!(clean_text(decomposed), "Arrête");
    }

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text("   \n\t  "), "");
    }
}
