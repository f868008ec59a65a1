/// Strip a leading UTF-8 byte-order mark. Spreadsheet exports put one in
/// front of the first header label.
pub fn clean_header(raw: &str) -> String {
    raw.strip_prefix('\u{feff}').unwrap_or(raw).to_string()
}

/// Lenient quantity parse: keep only `[0-9.-]`, then read the longest leading
/// float (`"12 pcs"` → 12, `"1.5.2"` → 1.5, `"5-3"` → 5).
/// Anything unreadable, zero, or non-finite is 0.
pub fn parse_quantity(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match leading_float(&cleaned) {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .iter()
            .skip(start)
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }
    s[..end].parse().ok()
}
