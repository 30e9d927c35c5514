//! Price display helpers
//!
//! Comma thousands separator, period decimal point. Shared by the inventory
//! cards and the value validation messages.

/// Insert thousands separators into a numeric string
///
/// A comma goes after every digit that is followed by a positive multiple of
/// three digits and then a `.` or the end of the string. Digits after the
/// first `.` are left alone. Non-digit characters pass through, so currency
/// prefixes are fine.
///
/// # Examples
///
/// ```
/// use valuables_core::format::format_amount;
///
/// assert_eq!(format_amount("39900"), "39,900");
/// assert_eq!(format_amount("1234567.891"), "1,234,567.891");
/// assert_eq!(format_amount("€40000"), "€40,000");
/// assert_eq!(format_amount("999"), "999");
/// ```
pub fn format_amount(num: &str) -> String {
    let chars: Vec<char> = num.chars().collect();
    let point = chars.iter().position(|&c| c == '.');
    let mut out = String::with_capacity(num.len() + num.len() / 3);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);

        if !c.is_ascii_digit() || point.is_some_and(|p| i >= p) {
            continue;
        }

        let run = chars[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        let ends_group = match chars.get(i + 1 + run) {
            None => true,
            Some(&next) => next == '.',
        };

        if run > 0 && run % 3 == 0 && ends_group {
            out.push(',');
        }
    }

    out
}

/// Render a price the way it was entered: integral values without a
/// fractional part, then apply [`format_amount`]
pub fn format_price(value: f64) -> String {
    format_amount(&number_to_string(value))
}

/// Plain number text, `400` rather than `400.0`
pub fn number_to_string(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
