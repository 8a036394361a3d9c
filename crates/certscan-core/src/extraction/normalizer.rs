//! OCR line normalization.

/// Normalized OCR line sequence shared by every extraction rule.
///
/// Lines are trimmed and empty lines dropped; order is preserved because
/// several rules look at position (e.g. the trailing lines of a page).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrLines {
    lines: Vec<String>,
    text: String,
}

impl OcrLines {
    /// Normalize lines as returned by an OCR provider.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        let text = lines.join("\n");

        Self { lines, text }
    }

    /// Split a text blob into lines and normalize them.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with `\n`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The last `n` lines (fewer if the document is shorter).
    pub fn trailing(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_drops_empty_lines() {
        let lines = OcrLines::new(["  IELTS  ", "", "   ", "Candidate Number 1234567"]);
        assert_eq!(lines.lines(), ["IELTS", "Candidate Number 1234567"]);
        assert_eq!(lines.text(), "IELTS\nCandidate Number 1234567");
    }

    #[test]
    fn test_trailing_window() {
        let lines = OcrLines::from_text("a\nb\nc\nd");
        assert_eq!(lines.trailing(2), ["c", "d"]);
        assert_eq!(lines.trailing(10).len(), 4);
        assert!(OcrLines::new(Vec::<String>::new()).trailing(7).is_empty());
    }
}
