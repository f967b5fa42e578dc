//! Display formatting shared by the summary table, charts and text output.

use chrono::NaiveDate;

/// Whole number with thousands separators, e.g. `15,000`.
pub fn quantity(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    group_thousands(&rounded)
}

/// Currency in millions with two decimals, e.g. `$1,234.57M`.
pub fn millions(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("${}.{}M", group_thousands(whole), frac)
}

/// Percentage with one decimal, e.g. `12.5%`.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Calendar month as `YYYY-MM`.
pub fn month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}
