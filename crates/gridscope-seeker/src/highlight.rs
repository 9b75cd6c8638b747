//! Match highlighting for display text.

use regex::Regex;
use serde::Serialize;

/// A run of display text, flagged if it matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Segment {
            text,
            highlighted: false,
        }
    }

    fn matched(text: &'a str) -> Self {
        Segment {
            text,
            highlighted: true,
        }
    }
}

/// Splits `text` into alternating unmatched and matched segments.
///
/// Every occurrence of the trimmed query is marked, with the original
/// casing kept. Matching uses the same lowercasing as search, so every
/// searched hit has something to highlight. The query is matched
/// literally. A blank query or empty text yields a single unhighlighted
/// segment.
///
/// ```
/// use gridscope_seeker::highlight;
///
/// let segments = highlight("Fix the Bug, debug", "bug");
/// let marked: Vec<&str> = segments
///     .iter()
///     .filter(|s| s.highlighted)
///     .map(|s| s.text)
///     .collect();
/// assert_eq!(marked, vec!["Bug", "bug"]);
/// ```
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || text.is_empty() {
        return vec![Segment::plain(text)];
    }

    let regex = match Regex::new(&regex::escape(&needle)) {
        Ok(regex) => regex,
        Err(err) => {
            log::warn!("cannot highlight {:?}: {}", needle, err);
            return vec![Segment::plain(text)];
        }
    };

    let folded = Folded::new(text);
    let mut segments = Vec::new();
    let mut last = 0;
    for found in regex.find_iter(&folded.lowered) {
        let (start, end) = folded.source_span(found.start(), found.end());
        let start = start.max(last);
        if end <= start {
            continue;
        }
        if start > last {
            segments.push(Segment::plain(&text[last..start]));
        }
        segments.push(Segment::matched(&text[start..end]));
        last = end;
    }
    if last < text.len() || segments.is_empty() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}

/// Lowercased text with, per lowered byte, the span of the source char it
/// came from. Lowercasing may change byte lengths (`İ` becomes `i̇`).
struct Folded {
    lowered: String,
    spans: Vec<(usize, usize)>,
}

impl Folded {
    fn new(text: &str) -> Self {
        let mut lowered = String::with_capacity(text.len());
        let mut spans = Vec::with_capacity(text.len());
        for (start, c) in text.char_indices() {
            let span = (start, start + c.len_utf8());
            for lower in c.to_lowercase() {
                lowered.push(lower);
                spans.extend(std::iter::repeat(span).take(lower.len_utf8()));
            }
        }
        Folded { lowered, spans }
    }

    /// Widens a lowered byte range to whole source chars.
    fn source_span(&self, start: usize, end: usize) -> (usize, usize) {
        (self.spans[start].0, self.spans[end - 1].1)
    }
}
