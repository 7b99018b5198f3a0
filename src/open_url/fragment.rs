//! Selection fragments of the form `L<line>[C<col>][-L<line>[C<col>]]`.
//!
//! Parsing is best effort: a fragment that cannot be read yields no
//! selection, and an unreadable end point collapses the selection onto its
//! start.

use crate::forge::{SelectionPoint, SelectionRange};

/// Parses a URL fragment into a zero-based selection.
pub(crate) fn parse_fragment(fragment: &str) -> Option<SelectionRange> {
    let (start_text, end_text) = fragment
        .split_once('-')
        .map_or((fragment, None), |(start, end)| (start, Some(end)));

    let start = parse_point(start_text)?;
    let end = end_text.and_then(parse_point).unwrap_or(start);

    Some(SelectionRange::between(start, end))
}

/// Parses `L<line>` or `L<line>C<column>`, converting from one-based.
fn parse_point(text: &str) -> Option<SelectionPoint> {
    let body = text.trim().strip_prefix('L')?;
    let (line_text, column_text) = body
        .split_once('C')
        .map_or((body, None), |(line, column)| (line, Some(column)));

    let line = one_based(line_text)?;
    let column = column_text
        .map(|column| one_based(column).ok_or(()))
        .transpose()
        .ok()?;

    Some(SelectionPoint { line, column })
}

fn one_based(text: &str) -> Option<u32> {
    text.parse::<u32>().ok()?.checked_sub(1)
}
