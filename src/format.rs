//! Output formatting for amounts and percentages

/// Two decimal places
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", normalize_zero(value))
}

/// Money amount with a leading `$`, sign first for negatives (`-$5.28`)
pub fn money(value: f64) -> String {
    let digits = fixed2(value);
    match digits.strip_prefix('-') {
        Some(magnitude) => format!("-${}", magnitude),
        None => format!("${}", digits),
    }
}

/// Percentage with two decimals
pub fn percent(value: f64) -> String {
    format!("{}%", fixed2(value))
}

/// Percentage difference with an explicit sign
pub fn signed_percent(value: f64) -> String {
    let value = normalize_zero(value);
    if value > 0.0 && fixed2(value) != "0.00" {
        format!("+{:.2}%", value)
    } else {
        percent(value)
    }
}

/// Avoid printing `-0.00` for values that round to zero
fn normalize_zero(value: f64) -> f64 {
    if value.abs() < 0.005 {
        0.0
    } else {
        value
    }
}
