// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Leading run of ASCII digits, e.g. "16日(火)" → 16. Whitespace before it is skipped.
pub fn leading_number(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// First run of ASCII digits anywhere in `s`, e.g. "(火)16" → 16.
pub fn first_number(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    leading_number(&s[start..])
}

/// Leading signed integer: "-3", "+2", "−1" (U+2212) or "12(10～14)".
pub fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (neg, rest) = if let Some(r) = s.strip_prefix('-').or_else(|| s.strip_prefix('\u{2212}')) {
        (true, r)
    } else if let Some(r) = s.strip_prefix('+') {
        (false, r)
    } else {
        (false, s)
    };
    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let v = i32::try_from(leading_number(rest)?).ok()?;
    Some(if neg { -v } else { v })
}
