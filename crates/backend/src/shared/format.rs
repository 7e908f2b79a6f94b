/// Groups integer digits in threes with `,`
///
/// # Примеры
/// ```ignore
/// assert_eq!(group_thousands("1234567"), "1,234,567");
/// ```
fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Форматирует число с разделителями тысяч
pub fn format_number(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// US-dollar amount with two decimals, e.g. "$2,422.50"; "-" for non-finite values
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}
