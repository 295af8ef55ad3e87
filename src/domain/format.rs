use std::borrow::Cow;

/// Character budget for descriptions shown in the list.
pub const DESCRIPTION_BUDGET: usize = 80;

/// `12000` -> `"12,000"`.
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if price < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Prices are stored in units of 10,000 KRW.
pub fn price_label(price: i64) -> String {
    format!("{}만원", format_price(price))
}

pub fn area_label(area: f64) -> String {
    format!("{area}㎡")
}

pub fn floor_label(floor: i32, total_floor: Option<i32>) -> String {
    match total_floor {
        Some(total) => format!("{floor}F / {total}F"),
        None => format!("{floor}F"),
    }
}

/// Cuts `text` to `budget` characters and appends `...` when it is longer.
/// Counts chars, not bytes, so Hangul is never split.
pub fn truncate_description(text: &str, budget: usize) -> Cow<'_, str> {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}
