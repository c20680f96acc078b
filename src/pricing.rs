//! Pricing
//!
//! Costs arrive from catalogs as display strings such as `"$12.99"`. They are parsed once, at
//! full precision, into money of the cart currency. Line subtotals are rounded half up to the
//! currency's minor unit after multiplying by quantity, and the cart total sums those rounded
//! subtotals.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while parsing a display-formatted cost.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePriceError {
    /// The amount after the currency symbol is not a decimal number.
    #[error("Invalid cost {0:?}: amount is not a decimal number")]
    InvalidAmount(String),

    /// The amount is below zero.
    #[error("Invalid cost {0:?}: amount is negative")]
    NegativeAmount(String),

    /// The amount cannot be represented in minor units.
    #[error("Invalid cost {0:?}: amount is out of range")]
    OutOfRange(String),
}

/// Errors that can occur while calculating subtotals and totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// Price multiplied by quantity overflowed.
    #[error("line subtotal overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Parses a cost such as `"$12.99"` into money of the given currency.
///
/// A single leading currency symbol is stripped when it matches `currency`; the remainder
/// must be a plain decimal number (optional sign, digits, at most one `.`). The amount is kept
/// exactly as written, including fractions of a minor unit; rounding happens in [`subtotal`].
///
/// # Errors
///
/// - [`ParsePriceError::InvalidAmount`]: the remainder is not a decimal number, or has more
///   precision than a [`Decimal`] holds.
/// - [`ParsePriceError::NegativeAmount`]: the amount is below zero.
/// - [`ParsePriceError::OutOfRange`]: the amount does not fit in `i64` minor units.
pub fn parse_cost<'a>(
    cost: &str,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, ParsePriceError> {
    let trimmed = cost.trim();

    let literal = trimmed
        .strip_prefix(currency.symbol)
        .unwrap_or(trimmed)
        .trim_start();

    if !is_decimal_literal(literal) {
        return Err(ParsePriceError::InvalidAmount(cost.to_string()));
    }

    let amount = Decimal::from_str_exact(literal)
        .map_err(|_err| ParsePriceError::InvalidAmount(cost.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ParsePriceError::NegativeAmount(cost.to_string()));
    }

    if to_minor_units(amount, currency).is_none() {
        return Err(ParsePriceError::OutOfRange(cost.to_string()));
    }

    Ok(Money::from_decimal(amount, currency))
}

/// Calculates the subtotal of a line: unit price multiplied by quantity, rounded half up to
/// the currency's minor unit.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product overflows.
pub fn subtotal<'a>(item: &LineItem<'a>) -> Result<Money<'a, Currency>, TotalPriceError> {
    let price = item.price();
    let currency = price.currency();

    let amount = price
        .amount()
        .checked_mul(Decimal::from(item.quantity().get()))
        .ok_or(TotalPriceError::Overflow)?
        .round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);

    Ok(Money::from_decimal(amount, currency))
}

/// Calculates the total of a list of lines in the given currency.
///
/// The total is the sum of the rounded line subtotals. An empty list totals zero.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line subtotal overflowed.
/// - [`TotalPriceError::Money`]: a line is priced in a different currency.
pub fn total<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            Ok(acc.add(subtotal(item)?)?)
        })
}

/// Optional sign, then digits with at most one decimal point.
fn is_decimal_literal(literal: &str) -> bool {
    let unsigned = literal.strip_prefix(['+', '-']).unwrap_or(literal);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn to_minor_units(amount: Decimal, currency: &Currency) -> Option<i64> {
    let scale = 10_i64.checked_pow(currency.exponent)?;

    amount
        .round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::from(scale))?
        .to_i64()
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn line(
        name: &str,
        cost: &str,
        quantity: u32,
    ) -> Result<LineItem<'static>, Box<dyn std::error::Error>> {
        Ok(LineItem::with_quantity(
            name,
            "",
            parse_cost(cost, iso::USD)?,
            NonZeroU32::try_from(quantity)?,
        ))
    }

    #[test]
    fn parse_cost_strips_currency_symbol() -> TestResult {
        assert_eq!(parse_cost("$12.99", iso::USD)?, Money::from_minor(1299, iso::USD));

        Ok(())
    }

    #[test]
    fn parse_cost_accepts_bare_amount() -> TestResult {
        assert_eq!(parse_cost("15", iso::USD)?, Money::from_minor(1500, iso::USD));

        Ok(())
    }

    #[test]
    fn parse_cost_rejects_non_numeric_amount() {
        assert_eq!(
            parse_cost("$abc", iso::USD),
            Err(ParsePriceError::InvalidAmount("$abc".to_string()))
        );
    }

    #[test]
    fn parse_cost_rejects_empty_amount() {
        assert!(matches!(
            parse_cost("$", iso::USD),
            Err(ParsePriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_cost_rejects_other_currency_symbol() {
        assert!(matches!(
            parse_cost("€5.00", iso::USD),
            Err(ParsePriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_cost_strips_only_one_symbol() {
        assert!(matches!(
            parse_cost("$$5.00", iso::USD),
            Err(ParsePriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_cost_rejects_negative_amount() {
        assert_eq!(
            parse_cost("$-1.00", iso::USD),
            Err(ParsePriceError::NegativeAmount("$-1.00".to_string()))
        );
    }

    #[test]
    fn parse_cost_rejects_digit_separators() {
        assert_eq!(
            parse_cost("$1_0", iso::USD),
            Err(ParsePriceError::InvalidAmount("$1_0".to_string()))
        );
    }

    #[test]
    fn parse_cost_rejects_repeated_decimal_point() {
        assert_eq!(
            parse_cost("$1.2.3", iso::USD),
            Err(ParsePriceError::InvalidAmount("$1.2.3".to_string()))
        );
    }

    #[test]
    fn parse_cost_rejects_excess_precision() {
        assert!(matches!(
            parse_cost("$0.00000000000000000000000000001", iso::USD),
            Err(ParsePriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_cost_keeps_sub_cent_precision() -> TestResult {
        let price = parse_cost("$0.333", iso::USD)?;

        assert_eq!(price.amount(), &Decimal::new(333, 3));

        Ok(())
    }

    #[test]
    fn subtotal_rounds_half_up_after_quantity() -> TestResult {
        assert_eq!(
            subtotal(&line("Seed", "$0.333", 3)?)?,
            Money::from_minor(100, iso::USD)
        );
        assert_eq!(
            subtotal(&line("Seed", "$0.005", 3)?)?,
            Money::from_minor(2, iso::USD)
        );
        assert_eq!(
            subtotal(&line("Seed", "$0.005", 1)?)?,
            Money::from_minor(1, iso::USD)
        );
        assert_eq!(
            subtotal(&line("Seed", "$2.344", 1)?)?,
            Money::from_minor(234, iso::USD)
        );

        Ok(())
    }

    #[test]
    fn total_sums_rounded_subtotals() -> TestResult {
        let items = [line("Seed", "$0.333", 3)?, line("Bulb", "$0.005", 3)?];

        assert_eq!(total(&items, iso::USD)?, Money::from_minor(102, iso::USD));

        Ok(())
    }

    #[test]
    fn parse_cost_rejects_out_of_range_amount() {
        assert!(matches!(
            parse_cost("$99999999999999999999", iso::USD),
            Err(ParsePriceError::OutOfRange(_))
        ));
    }

    #[test]
    fn subtotal_multiplies_price_by_quantity() -> TestResult {
        let item = line("Fern", "$5.00", 2)?;

        assert_eq!(subtotal(&item)?, Money::from_minor(1000, iso::USD));

        Ok(())
    }

    #[test]
    fn subtotal_reports_overflow() -> TestResult {
        let item = LineItem::with_quantity(
            "Gold",
            "",
            Money::from_decimal(Decimal::MAX, iso::USD),
            NonZeroU32::try_from(2_u32)?,
        );

        assert_eq!(subtotal(&item), Err(TotalPriceError::Overflow));

        Ok(())
    }

    #[test]
    fn total_of_fern_and_aloe() -> TestResult {
        let items = [line("Fern", "$5.00", 2)?, line("Aloe", "$3.50", 1)?];

        assert_eq!(total(&items, iso::USD)?, Money::from_minor(1350, iso::USD));

        Ok(())
    }

    #[test]
    fn total_matches_sum_of_subtotals() -> TestResult {
        let items = [
            line("Snake Plant", "$15.00", 3)?,
            line("Peace Lily", "$18.49", 2)?,
            line("Boston Fern", "$0.99", 7)?,
        ];

        let summed: i64 = items
            .iter()
            .map(|item| subtotal(item).map(|money| money.to_minor_units()))
            .sum::<Result<i64, _>>()?;

        assert_eq!(total(&items, iso::USD)?.to_minor_units(), summed);

        Ok(())
    }

    #[test]
    fn total_of_no_items_is_zero() -> TestResult {
        assert_eq!(total(&[], iso::GBP)?, Money::from_minor(0, iso::GBP));

        Ok(())
    }

    #[test]
    fn total_errors_on_currency_mismatch() {
        let items = [LineItem::new("Tulip", "", Money::from_minor(100, iso::EUR))];

        assert_eq!(
            total(&items, iso::USD),
            Err(TotalPriceError::Money(MoneyError::CurrencyMismatch {
                expected: iso::USD.iso_alpha_code,
                actual: iso::EUR.iso_alpha_code,
            }))
        );
    }
}
