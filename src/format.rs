/// Formats a number with `,` thousands separators in the integer part.
///
/// The fractional part is kept as `f64` displays it.
pub fn format_number(num: f64) -> String {
    let text = num.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats a percentage with two decimals and an explicit `+` for gains.
pub fn format_percent(num: f64) -> String {
    let sign = if num > 0.0 { "+" } else { "" };
    format!("{sign}{num:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(3245678.0), "3,245,678");
    }

    #[test]
    fn keeps_sign_and_fraction() {
        assert_eq!(format_number(-9876.5), "-9,876.5");
        assert_eq!(format_number(1234.125), "1,234.125");
        assert_eq!(format_number(0.12345), "0.12345");
    }

    #[test]
    fn percent_sign() {
        assert_eq!(format_percent(1.234), "+1.23%");
        assert_eq!(format_percent(-0.5), "-0.50%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
