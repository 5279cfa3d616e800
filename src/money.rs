// 💶 Money formatting
// Amounts are rust_decimal values; the display is always euro with two decimals.

use rust_decimal::Decimal;

/// "€4850.75"
pub fn format_eur(amount: Decimal) -> String {
    format!("€{:.2}", amount)
}

/// "+ €2500.00" / "- €4.50" for a signed total
pub fn format_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("- €{:.2}", amount.abs())
    } else {
        format!("+ €{:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_eur_pads_to_cents() {
        assert_eq!(format_eur(dec!(100)), "€100.00");
        assert_eq!(format_eur(dec!(4850.75)), "€4850.75");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(dec!(-4.5)), "- €4.50");
        assert_eq!(format_signed(dec!(2500)), "+ €2500.00");
    }
}
