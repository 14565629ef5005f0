//! Display formatting for prices and titles.

use rust_decimal::Decimal;

use vitrine_core::parse_price;

/// Maximum characters for product names on cards; longer names are
/// truncated with an ellipsis.
pub const TITLE_LIMIT: usize = 30;

/// Formats a catalog price string pt-BR style: thousands separated by `.`,
/// comma decimal separator, always two decimal places (`"1234.5"` →
/// `"1.234,50"`).
///
/// An unparseable price is returned verbatim so the card still shows
/// whatever the catalog says instead of a fake number.
#[must_use]
pub fn format_price(raw: &str) -> String {
    match parse_price(raw) {
        Some(value) => format_decimal_pt_br(value),
        None => raw.to_owned(),
    }
}

fn format_decimal_pt_br(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);

    let plain = rounded.to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let grouped = group_thousands(digits);
    format!("{sign}{grouped},{frac_part}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Truncates a product name to [`TITLE_LIMIT`] characters, replacing the
/// last kept character with `…` when the name is longer.
#[must_use]
pub fn limit_title(title: &str) -> String {
    let count = title.chars().count();
    if count <= TITLE_LIMIT {
        title.to_owned()
    } else {
        let mut truncated: String = title.chars().take(TITLE_LIMIT - 1).collect();
        truncated.push('…');
        truncated
    }
}
