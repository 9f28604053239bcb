/// `1247` -> `"1,247"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
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

/// Whole-dollar amount with separators: `125000.4` -> `"$125,000"`.
#[allow(clippy::cast_possible_truncation)]
pub fn currency(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-${}", group_thousands(-rounded))
    } else {
        format!("${}", group_thousands(rounded))
    }
}

/// Compact revenue label used inside the progress ring.
pub fn compact_revenue(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Signed one-decimal percentage: `5.66` -> `"+5.7%"`, `-2.0` -> `"-2.0%"`, `0` -> `"0%"`.
pub fn signed_percent(change: f64) -> String {
    if change > 0.0 {
        format!("+{change:.1}%")
    } else if change < 0.0 {
        format!("{change:.1}%")
    } else {
        "0%".to_string()
    }
}

/// Dollar delta with an explicit `+` for gains: `7000.0` -> `"+$7,000"`, `0` -> `"$0"`.
pub fn signed_currency(delta: f64) -> String {
    if delta.round() > 0.0 {
        format!("+{}", currency(delta))
    } else {
        currency(delta)
    }
}
