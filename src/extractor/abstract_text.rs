// file: src/extractor/abstract_text.rs
// description: heuristic abstract extraction from a paper's full text
// reference: section-heading heuristics over plain extracted text

const ABSTRACT_MARKER: &str = "abstract";
const PARAGRAPH_BREAK: &str = "\n\n";

/// Returns the paragraph following the first case-insensitive "abstract", trimmed.
///
/// Whitespace right after the marker is skipped before the terminating blank
/// line is searched for, so a standalone "Abstract" heading yields the
/// paragraph beneath it. With no blank line after that point the slice runs to
/// the end of the text. Text without the marker yields an empty string.
pub fn extract_abstract(text: &str) -> String {
    // ASCII lowering keeps byte offsets aligned with `text`.
    let lowered = text.to_ascii_lowercase();

    let Some(marker_pos) = lowered.find(ABSTRACT_MARKER) else {
        return String::new();
    };

    let after_marker = marker_pos + ABSTRACT_MARKER.len();
    let body_start = text[after_marker..]
        .find(|c: char| !c.is_whitespace())
        .map(|offset| after_marker + offset)
        .unwrap_or(text.len());

    let body_end = text[body_start..]
        .find(PARAGRAPH_BREAK)
        .map(|offset| body_start + offset)
        .unwrap_or(text.len());

    text[body_start..body_end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_followed_by_paragraph() {
        let text = "Abstract\n\nThe quick brown fox.\n\nIntroduction...";
        assert_eq!(extract_abstract(text), "The quick brown fox.");
    }

    #[test]
    fn test_no_marker_yields_empty() {
        assert_eq!(extract_abstract("Introduction\n\nNothing here."), "");
        assert_eq!(extract_abstract(""), "");
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let text = "Title\nABSTRACT: We study graphs.\n\n1 Introduction";
        assert_eq!(extract_abstract(text), ": We study graphs.");
    }

    #[test]
    fn test_inline_abstract_on_same_line() {
        let text = "abstract We prove a bound.\nIt is tight.\n\nSection 1";
        assert_eq!(extract_abstract(text), "We prove a bound.\nIt is tight.");
    }

    #[test]
    fn test_missing_terminator_clamps_to_end() {
        let text = "Abstract\nEverything until the very end";
        assert_eq!(extract_abstract(text), "Everything until the very end");
    }

    #[test]
    fn test_marker_at_end_of_text() {
        assert_eq!(extract_abstract("Some paper. Abstract"), "");
        assert_eq!(extract_abstract("Abstract\n\n\n"), "");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Abstract\nFirst one.\n\nAnother abstract\nSecond one.\n\n";
        assert_eq!(extract_abstract(text), "First one.");
    }

    #[test]
    fn test_non_ascii_text_is_sliced_safely() {
        let text = "Résumé İstanbul\nAbstract\nÉtude des ñandúes.\n\nFin";
        assert_eq!(extract_abstract(text), "Étude des ñandúes.");
    }
}
