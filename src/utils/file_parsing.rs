#[inline]
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Splits one delimited line into trimmed fields.
///
/// Delimiters inside single or double quotes do not split; the quotes stay in
/// the field so callers can tell quoted text from bare values.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) => {
                if ch == q {
                    in_quotes = None;
                }
                cur.push(ch);
            }
            None if ch == '"' || ch == '\'' => {
                in_quotes = Some(ch);
                cur.push(ch);
            }
            None if ch == delimiter => {
                out.push(cur.trim().to_string());
                cur.clear();
            }
            None => cur.push(ch),
        }
    }
    if !cur.is_empty() {
        out.push(cur.trim().to_string());
    }
    out
}

/// Parses a numeric field, quoted or not. `None` for empty or non-numeric text.
pub fn parse_number(field: &str) -> Option<f64> {
    let inner = strip_surrounding_quotes(field.trim()).trim();
    if inner.is_empty() {
        return None;
    }
    inner.parse::<f64>().ok()
}
