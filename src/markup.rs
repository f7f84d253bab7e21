use pulldown_cmark::{Event, Parser, Tag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
}

/// Splits a help description into lines of plain and bold segments.
///
/// Only `**strong**` spans are honored; any other markdown construct is
/// flattened to its text.
pub fn parse_description(description: &str) -> Vec<Vec<Segment>> {
    description.split('\n').map(parse_line).collect()
}

fn parse_line(line: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut depth = 0usize;
    for event in Parser::new(line) {
        match event {
            Event::Start(Tag::Strong) => depth += 1,
            Event::End(Tag::Strong) => depth = depth.saturating_sub(1),
            Event::Text(text) | Event::Code(text) => push(&mut segments, &text, depth > 0),
            Event::SoftBreak | Event::HardBreak => push(&mut segments, " ", depth > 0),
            _ => {}
        }
    }
    segments
}

fn push(segments: &mut Vec<Segment>, text: &str, bold: bool) {
    match segments.last_mut() {
        Some(last) if last.bold == bold => last.text.push_str(text),
        _ => segments.push(Segment {
            text: text.to_string(),
            bold,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceKind;
    use pretty_assertions::assert_eq;

    fn seg(text: &str, bold: bool) -> Segment {
        Segment {
            text: text.to_string(),
            bold,
        }
    }

    #[test]
    fn test_bold_label_then_plain() {
        let lines = parse_description("**Maximum file size:** 100MB");
        assert_eq!(lines, vec![vec![seg("Maximum file size:", true), seg(" 100MB", false)]]);
    }

    #[test]
    fn test_blank_lines_preserved() {
        let lines = parse_description(SourceKind::Edgar.info().description);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], vec![seg("Search SEC filings from the EDGAR database.", false)]);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2], vec![seg("Supported filings:", true), seg(" 8-Ks, 10-Ks", false)]);
        assert_eq!(lines[3], vec![seg("Update frequency:", true), seg(" Every 5 minutes", false)]);
    }

    #[test]
    fn test_plain_description_single_segment() {
        let lines = parse_description(SourceKind::WebSearch.info().description);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 1);
        assert!(!lines[0][0].bold);
    }
}
