//! Argentine number formatting: dots as thousands separators, no decimals.

/// `1234567` → `1.234.567`.
pub fn format_argentine_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Keeps digits only; anything without digits parses to 0 and values too
/// large for `u64` saturate.
pub fn parse_argentine_number(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Rounds to whole pesos: `$ 1.200.000`, `-$ 500`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$ -".to_string();
    }
    let rounded = value.round();
    let magnitude = format_argentine_number(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-$ {magnitude}")
    } else {
        format!("$ {magnitude}")
    }
}

/// One decimal place, as the guide prints rates.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Rounded to a whole percent, as in the closing summary.
pub fn format_whole_percent(value: f64) -> String {
    format!("{value:.0}%")
}
