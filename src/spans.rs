//! Index of quoted-string regions in raw text.
//!
//! Every scanner that has to ignore structural characters inside string
//! content (`,` `{` `}` `:` `//` ...) asks this index first.

/// One quoted literal: `start` is the opening quote, `end` is the offset just
/// past the closing quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub quote: char,
}

/// Sorted, non-overlapping spans of every terminated string literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSpans {
    spans: Vec<Span>,
}

impl StringSpans {
    pub fn new(text: &str) -> Self {
        let mut spans = Vec::new();
        let mut open: Option<(usize, char)> = None;
        let mut escaped = false;

        for (i, c) in text.char_indices() {
            match open {
                None => {
                    if c == '"' || c == '\'' {
                        open = Some((i, c));
                    }
                    escaped = false;
                }
                Some((start, quote)) => {
                    if c == quote && !escaped {
                        spans.push(Span { start, end: i + 1, quote });
                        open = None;
                        escaped = false;
                    } else {
                        // `\\` consumes itself
                        escaped = c == '\\' && !escaped;
                    }
                }
            }
        }

        Self { spans }
    }

    /// If `offset` lies strictly between the quotes of a literal, returns the
    /// offset just past its closing quote.
    pub fn in_string(&self, offset: usize) -> Option<usize> {
        let idx = self.spans.partition_point(|s| s.start < offset);
        if idx == 0 {
            return None;
        }
        let span = self.spans[idx - 1];
        (offset < span.end - 1).then_some(span.end)
    }

    /// The literal opening exactly at `offset`, if any.
    pub fn starting_at(&self, offset: usize) -> Option<Span> {
        self.spans
            .binary_search_by_key(&offset, |s| s.start)
            .ok()
            .map(|idx| self.spans[idx])
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
