use chrono::{Datelike, DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};

/// level monthly payment for a fully amortizing credit
///
/// EMI = P * m * (1 + m)^n / ((1 + m)^n - 1), where `m` is the annual rate
/// divided by 12 and rounded half-up to 6 places. The payment is rounded
/// half-up to 2 places. A zero term yields zero.
///
/// Returns `None` when an intermediate value leaves the decimal range.
pub fn monthly_payment(principal: Money, annual_rate: Rate, term_months: u32) -> Option<Money> {
    if term_months == 0 {
        return Some(Money::ZERO);
    }

    if annual_rate.is_zero() {
        return Some((principal / Decimal::from(term_months)).round_half_up(2));
    }

    let m = annual_rate.monthly_rate().as_decimal();

    // (1 + m)^n by repeated multiplication keeps the factor exact in decimal
    let base = Decimal::ONE + m;
    let mut compound = Decimal::ONE;
    for _ in 0..term_months {
        compound = compound.checked_mul(base)?;
    }

    // payment per unit of principal first, so only the final scaling can overflow
    let factor = m
        .checked_mul(compound)?
        .checked_div(compound - Decimal::ONE)?;

    Some(principal.checked_mul(factor)?.round_half_up(2))
}

/// first day of the month following `created_at`
pub fn first_due_date(created_at: DateTime<Utc>) -> Option<NaiveDate> {
    created_at
        .date_naive()
        .with_day(1)?
        .checked_add_months(Months::new(1))
}
