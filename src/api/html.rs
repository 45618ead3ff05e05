//! Naive table walking over regulator pages.
//!
//! Tag names are matched case-insensitively on ASCII. Nested tables are not supported.

/// Text of every `<td>` cell, grouped by `<tr>` row, in document order.
///
/// Rows without a single `<td>` (header rows made of `<th>`) are left out.
#[must_use]
pub fn table_rows(html: &str) -> Vec<Vec<String>> {
    let lowercase = html.to_ascii_lowercase();
    let mut rows = Vec::new();
    let mut offset = 0;
    while let Some((start, end)) = next_block(&lowercase, "tr", offset) {
        let cells = cells(&html[start..end], &lowercase[start..end]);
        if !cells.is_empty() {
            rows.push(cells);
        }
        offset = end;
    }
    rows
}

fn cells(row: &str, lowercase_row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut offset = 0;
    while let Some((start, end)) = next_block(lowercase_row, "td", offset) {
        cells.push(cell_text(inner(&row[start..end])));
        offset = end;
    }
    cells
}

/// Byte range from the opening `<name …>` up to the end of the matching `</name>`.
///
/// A row or cell that is never closed runs until the next opening tag or the end of input.
fn next_block(lowercase: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_open_tag(lowercase, name, from)?;
    let open_end = start + lowercase[start..].find('>')? + 1;
    let close_tag = format!("</{name}");
    let next_open = find_open_tag(lowercase, name, open_end).unwrap_or(lowercase.len());
    let end = match lowercase[open_end..next_open].find(&close_tag) {
        Some(relative) => {
            let close_start = open_end + relative;
            lowercase[close_start..].find('>').map_or(lowercase.len(), |gt| close_start + gt + 1)
        }
        None => next_open,
    };
    Some((start, end))
}

/// Find `<name` followed by `>`, `/`, or whitespace, so that `<tr` does not match `<track`.
fn find_open_tag(lowercase: &str, name: &str, from: usize) -> Option<usize> {
    let pattern = format!("<{name}");
    let mut offset = from;
    loop {
        let start = offset + lowercase.get(offset..)?.find(&pattern)?;
        let after = start + pattern.len();
        match lowercase.as_bytes().get(after) {
            Some(b'>' | b'/') | None => return Some(start),
            Some(byte) if byte.is_ascii_whitespace() => return Some(start),
            Some(_) => offset = after,
        }
    }
}

/// Strip the wrapping tags of a complete `<tag …>inner</tag>` block.
fn inner(block: &str) -> &str {
    let Some(open_end) = block.find('>') else {
        return "";
    };
    let body = &block[open_end + 1..];
    match body.rfind("</") {
        Some(close_start) => &body[..close_start],
        None => body,
    }
}

/// Drop nested markup, decode the common entities, and collapse whitespace.
#[must_use]
pub fn cell_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
