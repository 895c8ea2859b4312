//! Display formatting for report output.
//!
//! Indian numbering units: crore (1,00,00,000), lakh (1,00,000),
//! thousand. Values below a thousand print as-is.

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Format an amount as Indian rupees with a unit suffix.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0.00".to_string();
    }
    if amount >= CRORE {
        format!("₹{:.2} Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.2} L", amount / LAKH)
    } else if amount >= THOUSAND {
        format!("₹{:.2} K", amount / THOUSAND)
    } else {
        format!("₹{amount:.2}")
    }
}

/// Format a plain count with the same unit suffixes, no currency sign.
pub fn format_count(count: i64) -> String {
    let n = count as f64;
    if n >= CRORE {
        format!("{:.2} Cr", n / CRORE)
    } else if n >= LAKH {
        format!("{:.2} L", n / LAKH)
    } else if n >= THOUSAND {
        format!("{:.2} K", n / THOUSAND)
    } else {
        format!("{count}")
    }
}

/// Percentage change from `previous` to `current`.
/// `None` when there is no meaningful base to compare against.
pub fn percentage_change(current: f64, previous: f64) -> Option<f64> {
    if previous <= 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_picks_largest_unit() {
        assert_eq!(format_currency(25_000_000.0), "₹2.50 Cr");
        assert_eq!(format_currency(250_000.0), "₹2.50 L");
        assert_eq!(format_currency(2_500.0), "₹2.50 K");
        assert_eq!(format_currency(250.0), "₹250.00");
    }

    #[test]
    fn currency_unit_boundaries() {
        assert_eq!(format_currency(10_000_000.0), "₹1.00 Cr");
        assert_eq!(format_currency(100_000.0), "₹1.00 L");
        assert_eq!(format_currency(1_000.0), "₹1.00 K");
        assert_eq!(format_currency(999.99), "₹999.99");
    }

    #[test]
    fn currency_non_finite_falls_back_to_zero() {
        assert_eq!(format_currency(f64::NAN), "₹0.00");
        assert_eq!(format_currency(f64::INFINITY), "₹0.00");
    }

    #[test]
    fn counts_use_same_units_without_sign() {
        assert_eq!(format_count(30_000_000), "3.00 Cr");
        assert_eq!(format_count(150_000), "1.50 L");
        assert_eq!(format_count(1_500), "1.50 K");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn percentage_change_guards_zero_base() {
        assert_eq!(percentage_change(150.0, 100.0), Some(50.0));
        assert_eq!(percentage_change(50.0, 100.0), Some(-50.0));
        assert_eq!(percentage_change(100.0, 0.0), None);
        assert_eq!(percentage_change(100.0, -50.0), None);
    }
}
