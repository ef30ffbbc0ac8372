//! Ilocano detection by marker tokens.

/// Common Ilocano function words and question words.
pub const MARKER_TOKENS: [&str; 18] = [
    "ti",
    "iti",
    "dagiti",
    "kadagiti",
    "ken",
    "wenno",
    "ania",
    "sadino",
    "kasano",
    "apay",
    "kayat",
    "mabalin",
    "saan",
    "adda",
    "awan",
    "agsaludsod",
    "maipapan",
    "konstitusion",
];

/// Decides whether a question needs translating before retrieval.
///
/// Matching is a plain case-insensitive substring test with no word
/// boundaries, so short markers also fire inside English words
/// (`"constitution"` contains `"ti"`). A false positive only costs one
/// translation call, which returns English input unchanged.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    markers: Vec<String>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self {
            markers: MARKER_TOKENS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl LanguageDetector {
    /// Detector with the built-in markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with a custom marker list; blank entries are dropped.
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Active marker list.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// `true` if any marker occurs anywhere in the lowercased text.
    pub fn requires_translation(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.markers.iter().any(|m| lowered.contains(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Ania ti kalintegan ti tao?", true ; "ilocano question")]
    #[test_case("KASANO ti panagbotos?", true ; "uppercase marker")]
    #[test_case("What does the constitution say?", true ; "substring inside english word")]
    #[test_case("What are citizen rights?", true ; "citizen contains ti")]
    #[test_case("Explain the preamble", false ; "plain english")]
    #[test_case("How are laws made?", false ; "english without markers")]
    #[test_case("", false ; "empty input")]
    fn test_requires_translation(text: &str, expected: bool) {
        assert_eq!(LanguageDetector::new().requires_translation(text), expected);
    }

    #[test]
    fn test_custom_markers() {
        let detector = LanguageDetector::with_markers(["Kasapulan", "  ", "linteg"]);
        assert_eq!(detector.markers().len(), 2);
        assert!(detector.requires_translation("Ania ti LINTEG?"));
        assert!(!detector.requires_translation("What does the constitution say?"));
    }
}
