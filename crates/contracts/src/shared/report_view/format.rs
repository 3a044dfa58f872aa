//! Number formatting for stat cards and table cells

/// Groups the integer part with commas: `1234567.0` -> `"1,234,567"`
pub fn format_integer(value: f64) -> String {
    format_with_decimals(value, 0)
}

/// Dollar amount with two decimals: `1234.5` -> `"$1,234.50"`
pub fn format_currency(value: f64) -> String {
    let formatted = format_with_decimals(value.abs(), 2);
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-${}", formatted)
    } else {
        format!("${}", formatted)
    }
}

pub fn format_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", value, prec = decimals);
    // -0.0 and small negatives that round to zero print without a sign
    let formatted = match formatted.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => formatted,
    };
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}
