//! Price arithmetic on decimal amounts.
//!
//! Amounts are plain [`Decimal`]s in the shop currency. No rounding is applied
//! anywhere in this module; display formatting is the caller's business.

use rust_decimal::Decimal;

/// Price of `quantity` units at `unit_price`.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Apply a percentage discount to `amount`.
///
/// `percent` is clamped to `0..=100`, so the result never exceeds `amount`
/// (for non-negative amounts) and never goes below zero.
///
/// ```
/// use bloom_core::apply_percentage_discount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     apply_percentage_discount(Decimal::from(200), 10),
///     Decimal::from(180)
/// );
/// ```
#[must_use]
pub fn apply_percentage_discount(amount: Decimal, percent: i32) -> Decimal {
    let percent = Decimal::from(percent.clamp(0, 100));
    amount * (Decimal::ONE - percent / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(Decimal::new(1999, 2), 3), Decimal::new(5997, 2));
        assert_eq!(line_total(Decimal::from(100), 0), Decimal::ZERO);
    }

    #[test]
    fn test_discount_five_percent() {
        assert_eq!(
            apply_percentage_discount(Decimal::from(850), 5),
            Decimal::new(80750, 2)
        );
    }

    #[test]
    fn test_discount_out_of_range_is_clamped() {
        let amount = Decimal::from(300);
        assert_eq!(apply_percentage_discount(amount, -20), amount);
        assert_eq!(apply_percentage_discount(amount, 150), Decimal::ZERO);
    }

    #[test]
    fn test_discount_keeps_fraction() {
        // 10% off 33.33 is 29.997, kept as-is.
        assert_eq!(
            apply_percentage_discount(Decimal::new(3333, 2), 10),
            Decimal::new(29997, 3)
        );
    }
}
