//! Rupee formatting using the Indian digit grouping.
//!
//! The last three digits form one group and every group above that
//! has two digits, so 1234567 reads `12,34,567` (12 lakh ...).

/// Group the digits of `amount` the Indian way, without a currency sign.
pub fn group_indian(amount: i64) -> String {
    let grouped = group_digits(amount.unsigned_abs());
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    if digits.len() <= 3 {
        grouped.push_str(&digits);
        return grouped;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    // Leading group is one digit when the head length is odd.
    let first = head.len() % 2;
    if first == 1 {
        grouped.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[first..].chunks(2).enumerate() {
        if i > 0 || first == 1 {
            grouped.push(',');
        }
        grouped.extend(pair.iter().map(|b| *b as char));
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

/// Format whole rupees for display, e.g. `₹1,03,045` or `-₹8,735`.
pub fn format_inr(amount: i64) -> String {
    let grouped = group_indian(amount);
    // The sign goes in front of the rupee symbol
    match grouped.strip_prefix('-') {
        Some(digits) => format!("-₹{digits}"),
        None => format!("₹{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_are_not_grouped() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(-42), "-42");
    }

    #[test]
    fn test_lakh_and_crore_grouping() {
        assert_eq!(group_indian(1000), "1,000");
        assert_eq!(group_indian(56100), "56,100");
        assert_eq!(group_indian(103045), "1,03,045");
        assert_eq!(group_indian(1234567), "12,34,567");
        assert_eq!(group_indian(123456789), "12,34,56,789");
        assert_eq!(group_indian(-1234567), "-12,34,567");
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(111780), "₹1,11,780");
        assert_eq!(format_inr(8735), "₹8,735");
        assert_eq!(format_inr(-8735), "-₹8,735");
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(i64::MIN), "-₹92,23,37,20,36,85,47,75,808");
    }
}
