// src/core/html.rs
// Tolerant, case-insensitive tag scanning. Not a DOM: blocks end at the first
// matching close tag, so nested elements of the same name are not supported.
// Lowercasing is ASCII-only, so byte offsets stay valid in the input string.

/// Offset of the next `<tag` opener at or after `from` in an already
/// lowercased document. The tag name must end at whitespace, `>` or `/`,
/// so `<th` does not match `<thead>`.
fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("<{tag}");
    let mut at = from;
    loop {
        let pos = lc.get(at..)?.find(&needle)? + at;
        let after = pos + needle.len();
        match lc.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(pos),
            None => return None,
            _ => at = after,
        }
    }
}

/// Next block opened by any of `tags`: `(start, end)` where `end` is just past
/// the close tag. A missing close tag ends the block at the next sibling
/// opener, or at the end of the input.
pub fn next_tag_block_ci(s: &str, tags: &[&str], from: usize) -> Option<(usize, usize)> {
    let lc = s.to_ascii_lowercase();
    next_block_in(&lc, tags, from)
}

fn next_block_in(lc: &str, tags: &[&str], from: usize) -> Option<(usize, usize)> {
    let (start, tag) = tags
        .iter()
        .filter_map(|t| find_open(lc, t, from).map(|p| (p, *t)))
        .min_by_key(|(p, _)| *p)?;
    let open_end = lc[start..].find('>')? + start + 1;

    let close = format!("</{tag}>");
    let close_at = lc[open_end..].find(&close).map(|r| open_end + r);
    let sibling_at = tags.iter().filter_map(|t| find_open(lc, t, open_end)).min();

    let end = match (close_at, sibling_at) {
        (Some(c), Some(n)) if n < c => n,
        (Some(c), _) => c + close.len(),
        (None, Some(n)) => n,
        (None, None) => lc.len(),
    };
    Some((start, end))
}

/// All blocks opened by any of `tags`, in document order.
pub fn tag_blocks<'a>(s: &'a str, tags: &[&str]) -> Vec<&'a str> {
    let lc = s.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut from = 0;
    while let Some((start, end)) = next_block_in(&lc, tags, from) {
        out.push(&s[start..end]);
        from = end.max(start + 1);
    }
    out
}

/// The opening tag of a block, `<` through `>`.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(gt) => &block[..=gt],
        None => block,
    }
}

pub fn inner_after_open_tag(block: &str) -> &str {
    let Some(oe) = block.find('>') else { return "" };
    let body = &block[oe + 1..];
    match body.rfind("</") {
        Some(cs) => &body[..cs],
        None => body,
    }
}

/// Value of attribute `name` in an opening tag. Quoted or bare values.
pub fn attr_value<'a>(open: &'a str, name: &str) -> Option<&'a str> {
    let lc = open.to_ascii_lowercase();
    let needle = format!("{name}=");
    let mut at = 0;
    let pos = loop {
        let p = lc.get(at..)?.find(&needle)? + at;
        // attribute names start after whitespace; skips e.g. data-src for src
        if p > 0 && lc.as_bytes()[p - 1].is_ascii_whitespace() {
            break p;
        }
        at = p + needle.len();
    };

    let val = &open[pos + needle.len()..];
    match val.as_bytes().first().copied() {
        Some(q @ (b'"' | b'\'')) => {
            let q = q as char;
            let end = val[1..].find(q)?;
            Some(&val[1..1 + end])
        }
        _ => {
            let end = val
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(val.len());
            Some(val[..end].trim_end_matches('/'))
        }
    }
}

/// Whether the opening tag carries `class` among its (space separated) classes.
pub fn has_class(open: &str, class: &str) -> bool {
    attr_value(open, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// Cell content up to the first `<br>`; the site puts extra notes below it.
pub fn first_line(inner: &str) -> &str {
    let lc = inner.to_ascii_lowercase();
    let cut = [lc.find("<br"), lc.find('\n')].into_iter().flatten().min();
    match cut {
        Some(c) if !inner[..c].trim().is_empty() => &inner[..c],
        _ => inner,
    }
}

/// Visible text: tags removed, entities decoded, whitespace collapsed.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&super::sanitize::normalize_entities(&out))
}
