use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Formats an amount the way the dashboard displays money: European digit
/// grouping with two decimals, e.g. `€1.234,56` (`-€1.234,56` when
/// negative).
pub fn format_euro(value: Decimal) -> String {
    Money::from_decimal(value, iso::EUR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_european_separators() {
        assert_eq!(format_euro(Decimal::new(123_456, 2)), "€1.234,56");
    }

    #[test]
    fn keeps_the_sign_in_front() {
        assert_eq!(format_euro(Decimal::new(-50_000, 2)), "-€500,00");
    }

    #[test]
    fn pads_whole_amounts_to_cents() {
        assert_eq!(format_euro(Decimal::from(7)), "€7,00");
    }
}
