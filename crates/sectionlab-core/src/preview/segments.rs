//! Segment extraction for markup templates
//!
//! Splits a template into its stylesheet, script, schema and remaining
//! markup. Segments are delimited either by attribute-less HTML tags
//! (`<style>`, `<script>`) or by templating block tags (`{% stylesheet %}`,
//! `{% style %}`, `{% javascript %}`, `{% schema %}`).

use super::engine::tokenize::TokenStream;

/// What a segment contributes to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentKind {
    Style,
    Script,
    Schema,
}

/// How a segment is delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiters {
    /// `<name>...</name>`
    Html(&'static str, &'static str),
    /// `{% name %}...{% endname %}`
    Tag(&'static str, &'static str),
}

/// Recognised segment delimiters and what they hold
const SEGMENT_TYPES: [(Delimiters, SegmentKind); 6] = [
    (Delimiters::Html("<style>", "</style>"), SegmentKind::Style),
    (Delimiters::Tag("stylesheet", "endstylesheet"), SegmentKind::Style),
    (Delimiters::Tag("style", "endstyle"), SegmentKind::Style),
    (Delimiters::Html("<script>", "</script>"), SegmentKind::Script),
    (Delimiters::Tag("javascript", "endjavascript"), SegmentKind::Script),
    (Delimiters::Tag("schema", "endschema"), SegmentKind::Schema),
];

/// A located segment
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment<'a> {
    pub kind: SegmentKind,
    /// Delimited by templating tags rather than HTML tags
    pub templated: bool,
    pub body: &'a str,
    /// Byte range of the whole segment, delimiters included
    pub start: usize,
    pub end: usize,
}

impl Delimiters {
    fn opener(self) -> (&'static str, bool) {
        match self {
            Delimiters::Html(open, _) => (open, false),
            Delimiters::Tag(open, _) => (open, true),
        }
    }

    fn closer(self) -> (&'static str, bool) {
        match self {
            Delimiters::Html(_, close) => (close, false),
            Delimiters::Tag(_, close) => (close, true),
        }
    }
}

/// A delimiter occurrence: (start, end) byte range
type Span = (usize, usize);

/// Find the next occurrence of a delimiter at or after `from`
fn find_delimiter(source: &str, from: usize, delimiter: &str, templated: bool) -> Option<Span> {
    let rest = &source[from..];
    if templated {
        TokenStream::new(rest)
            .find(|token| token.is_tag(delimiter))
            .map(|token| (from + token.start, from + token.end()))
    } else {
        rest.find(delimiter)
            .map(|offset| (from + offset, from + offset + delimiter.len()))
    }
}

fn find_opener(source: &str, from: usize, delimiters: Delimiters) -> Option<Span> {
    let (open, templated) = delimiters.opener();
    find_delimiter(source, from, open, templated)
}

/// Locate every segment in encounter order
///
/// Segments do not overlap; an opener without a closer is not a segment
/// and stays in the markup.
pub(crate) fn scan_segments(source: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();

    // Next opener of each kind at or after the cursor, `None` once exhausted
    let mut next_open: Vec<Option<Span>> = SEGMENT_TYPES
        .iter()
        .map(|&(delimiters, _)| find_opener(source, 0, delimiters))
        .collect();

    while let Some((index, (open_start, open_end))) = next_open
        .iter()
        .enumerate()
        .filter_map(|(index, hit)| hit.map(|span| (index, span)))
        .min_by_key(|&(_, (start, _))| start)
    {
        let (delimiters, kind) = SEGMENT_TYPES[index];
        let (close, templated) = delimiters.closer();

        let pos = match find_delimiter(source, open_end, close, templated) {
            Some((close_start, close_end)) => {
                segments.push(Segment {
                    kind,
                    templated,
                    body: &source[open_end..close_start],
                    start: open_start,
                    end: close_end,
                });
                close_end
            }
            None => {
                // No closer after this opener means none after any later one
                next_open[index] = None;
                open_end
            }
        };

        for (hit, &(delimiters, _)) in next_open.iter_mut().zip(SEGMENT_TYPES.iter()) {
            if let Some((start, _)) = *hit
                && start < pos
            {
                *hit = find_opener(source, pos, delimiters);
            }
        }
    }

    segments
}

/// A template split into its parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Every stylesheet body, joined with `\n` in encounter order
    pub css: String,
    /// First `{% javascript %}` body, else first `<script>` body
    pub script: &'a str,
    /// First schema body
    pub schema: Option<&'a str>,
    /// Source with every segment removed
    pub markup: String,
}

impl<'a> Segments<'a> {
    /// Partition a template source
    pub fn extract(source: &'a str) -> Self {
        let segments = scan_segments(source);

        let css = segments
            .iter()
            .filter(|segment| segment.kind == SegmentKind::Style)
            .map(|segment| segment.body)
            .collect::<Vec<_>>()
            .join("\n");

        let scripts = || {
            segments
                .iter()
                .filter(|segment| segment.kind == SegmentKind::Script)
        };
        let script = scripts()
            .find(|segment| segment.templated)
            .or_else(|| scripts().next())
            .map(|segment| segment.body)
            .unwrap_or("");

        let schema = segments
            .iter()
            .find(|segment| segment.kind == SegmentKind::Schema)
            .map(|segment| segment.body);

        let mut markup = String::with_capacity(source.len());
        let mut pos = 0;
        for segment in &segments {
            markup.push_str(&source[pos..segment.start]);
            pos = segment.end;
        }
        markup.push_str(&source[pos..]);

        Self {
            css,
            script,
            schema,
            markup,
        }
    }
}
