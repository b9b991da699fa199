//! Text helpers for time inputs

/// Parse the leading integer of `value` (optional sign, then digits),
/// ignoring leading whitespace and anything after the digits.
/// `None` when no digits are found.
pub fn to_integer(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }

    let parsed = digits.parse::<i64>().ok()?;
    let signed = if negative { -parsed } else { parsed };
    i32::try_from(signed).ok()
}

/// Two-digit, zero-padded display of a field; empty when unset
pub fn pad_number(value: Option<i32>) -> String {
    match value {
        Some(value) => {
            let padded = format!("0{value}");
            padded[padded.len().saturating_sub(2)..].to_string()
        }
        None => String::new(),
    }
}

/// Strip everything but ASCII digits from raw input
pub fn filter_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
