// Author: Dustin Pilgrim
// License: MIT

//! Text-level cleanup run before and after structural transformation.

use crate::spans::StringSpans;

enum Marker {
    Line,
    Block,
}

/// Strip comments, unify quotes and compact whitespace in one go.
pub fn normalize(text: &str) -> String {
    compact_whitespace(&unify_quotes(&strip_comments(text)))
}

/// Remove `//` and `/* */` comments that sit outside string literals.
///
/// Lines are kept, only their content is cut. An unterminated block comment
/// swallows the rest of the input.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_block_comment = false;

    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            out.push('\n');
        }

        let mut kept = String::new();
        let mut cut = false;
        let mut pos = 0;

        loop {
            if in_block_comment {
                match line[pos..].find("*/") {
                    Some(end) => {
                        pos += end + 2;
                        in_block_comment = false;
                    }
                    None => break,
                }
            }

            let rest = &line[pos..];
            match find_marker(rest) {
                Some((at, Marker::Line)) => {
                    kept.push_str(&rest[..at]);
                    cut = true;
                    break;
                }
                Some((at, Marker::Block)) => {
                    kept.push_str(&rest[..at]);
                    cut = true;
                    in_block_comment = true;
                    pos += at + 2;
                }
                None => {
                    kept.push_str(rest);
                    break;
                }
            }
        }

        if cut {
            out.push_str(kept.trim_end());
        } else {
            out.push_str(&kept);
        }
    }

    out
}

fn find_marker(segment: &str) -> Option<(usize, Marker)> {
    let spans = StringSpans::new(segment);
    let bytes = segment.as_bytes();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if let Some(end) = spans.in_string(i) {
            i = end;
            continue;
        }
        if bytes[i] == b'/' {
            match bytes[i + 1] {
                b'/' => return Some((i, Marker::Line)),
                b'*' => return Some((i, Marker::Block)),
                _ => {}
            }
        }
        i += 1;
    }

    None
}

/// Rewrite single-quoted literals as double-quoted JSON strings.
///
/// Inside a single-quoted literal a bare `"` gets escaped and `\'` loses its
/// backslash. A stray `'` outside any literal is turned into `"` as well.
pub fn unify_quotes(text: &str) -> String {
    let spans = StringSpans::new(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    for span in spans.spans() {
        out.push_str(&text[pos..span.start].replace('\'', "\""));
        if span.quote == '"' {
            out.push_str(&text[span.start..span.end]);
        } else {
            out.push('"');
            out.push_str(&requote_single(&text[span.start + 1..span.end - 1]));
            out.push('"');
        }
        pos = span.end;
    }
    out.push_str(&text[pos..].replace('\'', "\""));

    out
}

/// Re-escape the body of a single-quoted literal for a double-quoted one.
pub(crate) fn requote_single(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }

    out
}

/// Drop all whitespace outside string literals.
pub fn compact_whitespace(text: &str) -> String {
    compact(text, |c| c.is_whitespace())
}

/// Like [`compact_whitespace`] but keeps line breaks, so later stages still
/// report the line a token was written on.
pub fn compact_line_whitespace(text: &str) -> String {
    compact(text, |c| c != '\n' && c.is_whitespace())
}

fn compact(text: &str, drop: impl Fn(char) -> bool) -> String {
    let spans = StringSpans::new(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    for span in spans.spans() {
        out.extend(text[pos..span.start].chars().filter(|&c| !drop(c)));
        out.push_str(&text[span.start..span.end]);
        pos = span.end;
    }
    out.extend(text[pos..].chars().filter(|&c| !drop(c)));

    out
}

/// Delete every `,` directly followed by `}` or `]`, outside string literals.
pub fn remove_trailing_commas(text: &str) -> String {
    let spans = StringSpans::new(text);
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());

    for (i, c) in text.char_indices() {
        if c == ','
            && spans.in_string(i).is_none()
            && matches!(bytes.get(i + 1), Some(b'}') | Some(b']'))
        {
            continue;
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comment_is_stripped() {
        assert_eq!(strip_comments("{\"a\": 1 // comment\n}"), "{\"a\": 1\n}");
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let input = r#"url: "http://example.com", // real comment"#;
        assert_eq!(strip_comments(input), r#"url: "http://example.com","#);
    }

    #[test]
    fn test_second_marker_after_quoted_one_is_stripped() {
        let input = r#"a: "//", b: 2 // note"#;
        assert_eq!(strip_comments(input), r#"a: "//", b: 2"#);
    }

    #[test]
    fn test_block_comment_spanning_lines() {
        let input = "a: 1, /* first\nstill comment\nend */ b: 2";
        assert_eq!(strip_comments(input), "a: 1,\n\n b: 2");
    }

    #[test]
    fn test_inline_block_comment() {
        assert_eq!(strip_comments("a /* x */ b"), "a  b");
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        assert_eq!(strip_comments("a: 1 /* open\nb: 2\nc: 3"), "a: 1\n\n");
    }

    #[test]
    fn test_single_quotes_become_double() {
        assert_eq!(unify_quotes("name: 'value'"), "name: \"value\"");
        assert_eq!(unify_quotes(r#"q: "it's""#), r#"q: "it's""#);
    }

    #[test]
    fn test_single_quoted_body_is_reescaped() {
        assert_eq!(unify_quotes(r#"'say "hi"'"#), r#""say \"hi\"""#);
        assert_eq!(unify_quotes(r#"'it\'s'"#), r#""it's""#);
    }

    #[test]
    fn test_line_compaction_keeps_breaks() {
        let input = "{\n  a: 'x y',\r\n\tb : 2\n}";
        assert_eq!(compact_line_whitespace(input), "{\na:'x y',\nb:2\n}");
    }

    #[test]
    fn test_compaction_keeps_string_content() {
        let input = "{ a : \"x  y\" ,\n\tb : 2 }";
        assert_eq!(compact_whitespace(input), "{a:\"x  y\",b:2}");
    }

    #[test]
    fn test_trailing_commas_removed() {
        assert_eq!(remove_trailing_commas(r#"{"a":1,"b":2,}"#), r#"{"a":1,"b":2}"#);
        assert_eq!(remove_trailing_commas("[1,[2,],]"), "[1,[2]]");
    }

    #[test]
    fn test_trailing_comma_inside_string_kept() {
        assert_eq!(remove_trailing_commas(r#"{"a":",}"}"#), r#"{"a":",}"}"#);
    }

    #[test]
    fn test_normalize_pipeline() {
        let input = "{\n  name: 'app', // the name\n  /* flags */ debug: true,\n}";
        assert_eq!(normalize(input), "{name:\"app\",debug:true,}");
    }
}
