//! Fractional-second decimals.
//!
//! A fractional second travels as an exact decimal: a nanosecond count
//! divides into it without rounding, and rounding happens only at explicit
//! precision requests, always half-up. Splitting a decimal second into
//! whole and fractional parts uses floor, not truncation, so negative
//! values land on the previous whole second.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, TimeError};

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// The most fractional-second digits a caller may request: nanosecond
/// resolution, the engine's finest grain.
pub const UTC_MAX_PRECISION: u32 = 9;

fn giga() -> Decimal {
    Decimal::from(NANOS_PER_SECOND)
}

/// Exact `nanos / 10^9`. The quotient has at most nine fractional digits,
/// so the division never rounds.
pub fn fraction_from_nanos(nanos: u32) -> Decimal {
    Decimal::from(nanos) / giga()
}

/// `nanos / 10^9` rounded half-up to `precision` fractional digits.
pub fn fraction_from_nanos_rounded(nanos: u32, precision: u32) -> Result<Decimal> {
    check_precision(precision)?;
    Ok(round_half_up(fraction_from_nanos(nanos), precision))
}

/// Round a decimal half-up to `precision` fractional digits.
pub fn round_half_up(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn check_precision(precision: u32) -> Result<()> {
    if precision > UTC_MAX_PRECISION {
        return Err(TimeError::precision(format!(
            "requested fractional-second precision {precision} exceeds the supported maximum of {UTC_MAX_PRECISION}"
        )));
    }
    Ok(())
}

/// Half-up rounding of `fraction * 10^9` to a whole nanosecond count.
/// Digits below nanosecond resolution are lost here and nowhere else.
pub fn nanos_from_fraction(fraction: &Decimal) -> Result<i64> {
    fraction
        .checked_mul(giga())
        .map(|scaled| round_half_up(scaled, 0))
        .and_then(|nanos| nanos.to_i64())
        .ok_or_else(|| {
            TimeError::calendar(format!(
                "fractional second '{fraction}' is outside the convertible range"
            ))
        })
}

/// Split a decimal second into a whole-second part (floor) and a
/// nanosecond count (half-up). Rounding can carry a whole second:
/// `0.9999999996` splits to `(1, 0)`.
pub fn split_seconds_decimal(value: &Decimal) -> Result<(i64, u32)> {
    let whole = value.floor();
    let mut seconds = whole.to_i64().ok_or_else(|| {
        TimeError::calendar(format!(
            "second value '{value}' is outside the convertible range"
        ))
    })?;
    let mut nanos = (*value - whole)
        .checked_mul(giga())
        .map(|scaled| round_half_up(scaled, 0))
        .and_then(|rounded| rounded.to_u32())
        .ok_or_else(|| {
            TimeError::calendar(format!(
                "second value '{value}' has an unconvertible fractional part"
            ))
        })?;
    if nanos >= NANOS_PER_SECOND {
        seconds = seconds.checked_add(1).ok_or_else(|| {
            TimeError::calendar(format!(
                "second value '{value}' is outside the convertible range"
            ))
        })?;
        nanos -= NANOS_PER_SECOND;
    }
    Ok((seconds, nanos))
}
