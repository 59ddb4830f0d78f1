//! Title Parser Module
//!
//! Classifies streamed reasoning text as "titled" (opens with a bold
//! `**Title**` marker) or free-form prose, and extracts the title/body
//! split for titled blocks.
//!
//! ## Partial Markers
//! Deltas can cut the marker anywhere (`"*"` then `"*Plan"`), so
//! classification stays `Pending` until the leading bytes rule a marker
//! in or out. A true title is never misclassified as untitled because of
//! chunk boundaries.

/// Bold delimiter opening and closing a leading title
const TITLE_MARKER: &str = "**";

/// Classification of the text accumulated so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleDetection {
    /// Not enough text yet to rule a forming marker in or out
    Pending,
    /// Free-form reasoning, safe to stream
    Untitled,
    /// Opens with a title marker; held back for a single tool-call pair
    Titled,
}

/// Classify accumulated reasoning text.
///
/// Commits to `Untitled` only once the first bytes cannot be a forming
/// marker; a lone `*` stays `Pending` until the next delta decides.
pub fn detect_title(text: &str) -> TitleDetection {
    if text.is_empty() {
        return TitleDetection::Pending;
    }
    if text.starts_with(TITLE_MARKER) {
        return TitleDetection::Titled;
    }
    if text == "*" {
        return TitleDetection::Pending;
    }
    TitleDetection::Untitled
}

/// Final classification against the authoritative completion text.
///
/// A remainder that is still ambiguous at completion (empty, or a lone
/// `*` that never closed into a marker) degrades to `Untitled`.
pub fn resolve_title(text: &str) -> TitleDetection {
    match detect_title(text) {
        TitleDetection::Pending => TitleDetection::Untitled,
        resolved => resolved,
    }
}

/// Split titled text into `(title, body)`.
///
/// With a closed marker the title is the text between the delimiters and
/// the body everything after the closing one. An unclosed leading marker
/// keeps the block titled: the first line becomes the title and the
/// remaining lines the body.
pub fn split_title(text: &str) -> (String, String) {
    let rest = text.strip_prefix(TITLE_MARKER).unwrap_or(text);

    if let Some(end) = rest.find(TITLE_MARKER) {
        let title = rest[..end].trim().to_string();
        let body = rest[end + TITLE_MARKER.len()..].trim_start().to_string();
        return (title, body);
    }

    // Marker never closed - degrade to first line as the title
    let mut lines = rest.lines();
    let title = lines
        .next()
        .unwrap_or("")
        .trim_end_matches('*')
        .trim()
        .to_string();
    let body = lines.collect::<Vec<_>>().join("\n").trim_start().to_string();
    (title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_titled() {
        assert_eq!(detect_title("**Plan** Think step"), TitleDetection::Titled);
        assert_eq!(detect_title("**"), TitleDetection::Titled);
    }

    #[test]
    fn test_detect_untitled() {
        assert_eq!(detect_title("Hello"), TitleDetection::Untitled);
        assert_eq!(detect_title("*italic* text"), TitleDetection::Untitled);
    }

    #[test]
    fn test_detect_pending_on_partial_marker() {
        assert_eq!(detect_title(""), TitleDetection::Pending);
        assert_eq!(detect_title("*"), TitleDetection::Pending);
    }

    #[test]
    fn test_resolve_degrades_ambiguity_to_untitled() {
        assert_eq!(resolve_title(""), TitleDetection::Untitled);
        assert_eq!(resolve_title("*"), TitleDetection::Untitled);
        assert_eq!(resolve_title("**Plan** go"), TitleDetection::Titled);
    }

    #[test]
    fn test_split_closed_marker() {
        let (title, body) = split_title("**Plan** Think step");
        assert_eq!(title, "Plan");
        assert_eq!(body, "Think step");
    }

    #[test]
    fn test_split_marker_only() {
        let (title, body) = split_title("**Searching the codebase**");
        assert_eq!(title, "Searching the codebase");
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_unclosed_marker() {
        let (title, body) = split_title("**Plan\nstep one\nstep two");
        assert_eq!(title, "Plan");
        assert_eq!(body, "step one\nstep two");
    }
}
