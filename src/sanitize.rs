//! Text sanitization into a safe, renderable character subset.
//!
//! Every piece of extracted text passes through [`sanitize`] exactly once
//! before it reaches a document builder. The result is wrapped in
//! [`SanitizedText`] so builders can only be fed cleaned text.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// Typographic punctuation and its ASCII replacement.
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2018}', "'"),   // left single quote
    ('\u{2019}', "'"),   // right single quote
    ('\u{201C}', "\""),  // left double quote
    ('\u{201D}', "\""),  // right double quote
    ('\u{2013}', "-"),   // en dash
    ('\u{2014}', "--"),  // em dash
    ('\u{2026}', "..."), // ellipsis
    ('\u{00A0}', " "),   // non-breaking space
];

/// Text that contains only ASCII below DEL, whitespace, or letters.
///
/// Only [`sanitize`] constructs values of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Borrow the cleaned text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Check if the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Split on blank-line boundaries into trimmed, non-empty paragraphs.
    ///
    /// Splitting and trimming cannot introduce new characters, so each
    /// piece is still sanitized.
    pub fn paragraphs(&self) -> Vec<SanitizedText> {
        self.0
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| SanitizedText(p.to_string()))
            .collect()
    }

    /// Join sanitized pieces with an ASCII separator.
    pub(crate) fn join(parts: &[SanitizedText], separator: &str) -> SanitizedText {
        debug_assert!(!disallowed().is_match(separator));
        let joined = parts
            .iter()
            .map(SanitizedText::as_str)
            .collect::<Vec<_>>()
            .join(separator);
        SanitizedText(joined)
    }
}

impl fmt::Display for SanitizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize text into the renderable subset.
///
/// 1. Unicode NFKD (compatibility decomposition).
/// 2. Strip C0 controls except tab, newline and carriage return; strip
///    DEL and C1 controls except NEL.
/// 3. Replace typographic quotes, dashes, ellipsis and NBSP with ASCII.
/// 4. Keep only code points below 127, whitespace, and letters
///    (general category L).
///
/// Never fails; empty input yields empty output.
pub fn sanitize(text: &str) -> SanitizedText {
    if text.is_empty() {
        return SanitizedText::default();
    }

    let mut output = String::with_capacity(text.len());
    for c in text.nfkd() {
        if is_stripped_control(c) {
            continue;
        }
        match replacement_for(c) {
            Some(replacement) => output.push_str(replacement),
            None => output.push(c),
        }
    }

    SanitizedText(disallowed().replace_all(&output, "").into_owned())
}

/// Keep only code points below 127.
///
/// Coarser than [`sanitize`]; used for free-form diagnostic text such as
/// error messages embedded in placeholders.
pub fn ascii_only(text: &str) -> SanitizedText {
    SanitizedText(
        text.chars()
            .filter(|c| (*c as u32) < 127 && !is_stripped_control(*c))
            .collect(),
    )
}

fn replacement_for(c: char) -> Option<&'static str> {
    REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

fn is_stripped_control(c: char) -> bool {
    matches!(
        c,
        '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{84}' | '\u{86}'..='\u{9F}'
    )
}

/// Anything outside ASCII below DEL, whitespace and letters.
///
/// Marks split off by decomposition are category M, so accents drop out
/// here; letter-numbers and alphabetic symbols do too.
fn disallowed() -> &'static Regex {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    DISALLOWED.get_or_init(|| Regex::new(r"[^\x00-\x7E\s\p{L}]+").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters_only(text: &str) -> bool {
        Regex::new(r"^[\x00-\x7E\s\p{L}]*$").unwrap().is_match(text)
    }

    #[test]
    fn test_smart_quotes() {
        assert_eq!(sanitize("\u{2018}hello\u{2019}").as_str(), "'hello'");
        assert_eq!(sanitize("\u{201C}hi\u{201D}").as_str(), "\"hi\"");
    }

    #[test]
    fn test_dashes_and_ellipsis() {
        assert_eq!(sanitize("a\u{2014}b").as_str(), "a--b");
        assert_eq!(sanitize("1\u{2013}2").as_str(), "1-2");
        assert_eq!(sanitize("wait\u{2026}").as_str(), "wait...");
        assert_eq!(sanitize("a\u{00A0}b").as_str(), "a b");
    }

    #[test]
    fn test_accents_decomposed() {
        assert_eq!(sanitize("caf\u{00E9}").as_str(), "cafe");
        assert_eq!(sanitize("Na\u{00EF}ve").as_str(), "Naive");
    }

    #[test]
    fn test_ligature_compatibility() {
        assert_eq!(sanitize("\u{FB01}le").as_str(), "file");
    }

    #[test]
    fn test_controls_stripped() {
        assert_eq!(sanitize("a\u{0000}b\u{0007}c").as_str(), "abc");
        assert_eq!(sanitize("tab\there\nline\r").as_str(), "tab\there\nline\r");
        assert_eq!(sanitize("x\u{7F}\u{80}\u{9F}y").as_str(), "xy");
    }

    #[test]
    fn test_symbols_removed_letters_kept() {
        assert_eq!(sanitize("\u{20AC}5 \u{2713}").as_str(), "5 ");
        assert_eq!(sanitize("\u{041F}\u{0440}\u{0438}").as_str(), "\u{041F}\u{0440}\u{0438}");
        assert_eq!(sanitize("\u{4E2D}\u{6587}").as_str(), "\u{4E2D}\u{6587}");
    }

    #[test]
    fn test_empty() {
        assert_eq!(sanitize("").as_str(), "");
        assert!(sanitize("   ").is_blank());
    }

    #[test]
    fn test_output_charset() {
        let samples = [
            "plain",
            "\u{2018}q\u{2019} \u{2014} \u{2026}",
            "\u{00C5}ngstr\u{00F6}m \u{00DF} \u{0152}uvre",
            "\u{1F600} emoji \u{FFFD} \u{E000}",
            "mixed\u{0085}nel\u{2028}sep",
            "\u{D55C}\u{AD6D}\u{C5B4}",
            "\u{3007} \u{16EE} \u{1F150} \u{1F170} \u{2188}",
            "\u{2160}\u{2161} \u{24B6}",
        ];
        for sample in samples {
            let out = sanitize(sample);
            assert!(letters_only(out.as_str()), "bad char in {:?}", out);
        }
    }

    #[test]
    fn test_letter_numbers_and_symbols_dropped() {
        assert_eq!(sanitize("x\u{3007}y").as_str(), "xy");
        assert_eq!(sanitize("rune \u{16EE}").as_str(), "rune ");
        assert_eq!(sanitize("\u{1F150}\u{1F170}\u{2188}").as_str(), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "\u{2018}hello\u{2019}",
            "caf\u{00E9} \u{FB01} \u{2460}",
            "\u{D55C}\u{AD6D}\u{C5B4} \u{3131}",
            "a\u{0000}\u{0085}b\u{00A0}c",
            "\u{1E9B}\u{0323} \u{0345}",
        ];
        for sample in samples {
            let once = sanitize(sample);
            let twice = sanitize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_paragraph_split() {
        let text = sanitize("First para\nstill first\n\n  Second  \n\n\n\nThird");
        let paras = text.paragraphs();
        let paras: Vec<&str> = paras.iter().map(SanitizedText::as_str).collect();
        assert_eq!(paras, vec!["First para\nstill first", "Second", "Third"]);
    }

    #[test]
    fn test_ascii_only() {
        assert_eq!(ascii_only("caf\u{00E9} \u{0001}ok").as_str(), "caf ok");
    }

    #[test]
    fn test_join() {
        let parts = vec![sanitize("B"), sanitize("C")];
        assert_eq!(SanitizedText::join(&parts, " | ").as_str(), "B | C");
    }
}
