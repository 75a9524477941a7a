//! Byte-level scanning helpers for rendered member text.
//!
//! Delimiters are ASCII, so every index returned here is a char boundary of the input.

/// Index of the delimiter closing the one at `open`, skipping string literals and comments.
pub(super) fn find_closing(text: &str, open: usize, open_delim: u8, close_delim: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&open_delim));

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b if b == open_delim => depth += 1,
            b if b == close_delim => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            quote @ (b'\'' | b'"') => {
                i = skip_string(bytes, i, quote)?;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line(bytes, i),
            b'#' if bytes.get(i + 1) != Some(&b'[') => i = skip_line(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i)?;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Whether `offset` sits inside an unclosed `(`, ignoring parens in strings and comments.
pub(super) fn inside_parens(text: &str, offset: usize) -> bool {
    let bytes = &text.as_bytes()[..offset.min(text.len())];
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            quote @ (b'\'' | b'"') => match skip_string(bytes, i, quote) {
                Some(end) => i = end,
                None => return false,
            },
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line(bytes, i),
            b'#' if bytes.get(i + 1) != Some(&b'[') => i = skip_line(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => match skip_block_comment(bytes, i) {
                Some(end) => i = end,
                None => return false,
            },
            _ => {}
        }
        i += 1;
    }
    depth > 0
}

/// Index of the closing quote of the string starting at `start`.
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == quote => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the newline ending the comment at `start` (or the last byte).
fn skip_line(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len() - 1, |p| start + p)
}

/// Index of the `/` closing the block comment at `start`.
fn skip_block_comment(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

/// Plain text of a `/** ... */` block: delimiters and leading `*` removed, blank edge lines dropped.
pub(super) fn doc_text(raw: &str) -> String {
    let inner = raw
        .strip_prefix("/**")
        .and_then(|s| s.strip_suffix("*/"))
        .unwrap_or(raw);
    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();
    trim_blank_edges(&lines).join("\n")
}

/// Method body with blank edge lines removed and the common indentation stripped.
pub(super) fn body_text(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    let lines = trim_blank_edges(&lines);
    let common = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| if line.is_empty() { "" } else { &line[common..] })
        .collect::<Vec<_>>()
        .join("\n")
}

fn trim_blank_edges<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(start, |p| p + 1);
    &lines[start..end]
}

/// `text` with every `(start, end)` span removed. Spans must be sorted and disjoint.
pub(super) fn remove_spans(text: &str, spans: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for &(start, end) in spans {
        out.push_str(&text[cursor..start]);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}
