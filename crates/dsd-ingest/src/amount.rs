//! Amount-cell normalization.
//!
//! Extract cells arrive with formatting noise: thousands separators,
//! quotation marks, full-width minus signs, and negatives written as
//! parentheses. Everything is normalized to a plain signed decimal before
//! parsing; anything that still fails to parse is treated as absent.

/// Normalize one amount cell and parse it.
///
/// Returns `None` for empty cells, `nan` placeholders, and values that do
/// not survive normalization. Absence is meaningful downstream (the line is
/// dropped from that year's node set), so this never zero-fills.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }

    let mut cleaned = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            ',' | '"' | ')' => {}
            '\u{2212}' => cleaned.push('-'),
            '(' => cleaned.push('-'),
            other => cleaned.push(other),
        }
    }

    cleaned.trim().parse::<f64>().ok()
}
