//! The UTC instant tuple and its codecs.

use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::decimal::{self, NANOS_PER_SECOND, UTC_MAX_PRECISION};
use crate::error::{classify_parse_error, Result, TimeError};

/// Seconds since the epoch plus a decimal fraction of the following
/// second.
///
/// The external form is a one- or two-element sequence, `[seconds]` or
/// `[seconds, fraction]`; a missing fraction deserializes as zero. The
/// fraction is nominally in `[0, 1)` but is not enforced on construction:
/// conversions normalize by carrying whole seconds, the way the engine's
/// epoch-second constructor does.
///
/// `seconds` may be negative for instants before the epoch, in which case
/// the fraction still counts forward from that second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcInstant {
    pub seconds: i64,
    pub fraction: Decimal,
}

impl UtcInstant {
    pub fn new(seconds: i64, fraction: Decimal) -> UtcInstant {
        UtcInstant { seconds, fraction }
    }

    /// A whole-second instant with a zero fraction.
    pub fn from_epoch_seconds(seconds: i64) -> UtcInstant {
        UtcInstant::new(seconds, Decimal::ZERO)
    }

    /// Capture an absolute instant without rounding: the fraction is the
    /// exact nanosecond count over `10^9`.
    pub fn from_datetime(instant: &DateTime<Utc>) -> UtcInstant {
        let (seconds, nanos) = normalized_parts(instant);
        UtcInstant::new(seconds, decimal::fraction_from_nanos(nanos))
    }

    /// Like [`UtcInstant::from_datetime`], with the fraction rounded
    /// half-up to `precision` digits (0 through 9).
    pub fn from_datetime_rounded(instant: &DateTime<Utc>, precision: u32) -> Result<UtcInstant> {
        let (seconds, nanos) = normalized_parts(instant);
        Ok(UtcInstant::new(
            seconds,
            decimal::fraction_from_nanos_rounded(nanos, precision)?,
        ))
    }

    /// Build from epoch milliseconds. Floor division keeps the fraction
    /// inside `[0, 1)` for pre-epoch values, and the fraction is settled
    /// at the maximum precision, matching the engine's millisecond
    /// constructor.
    ///
    /// ```
    /// use civiltime::UtcInstant;
    ///
    /// let utc = UtcInstant::from_epoch_millis(-1_500);
    /// assert_eq!(utc.seconds, -2);
    /// assert_eq!(utc.fraction, "0.5".parse().unwrap());
    /// ```
    pub fn from_epoch_millis(millis: i64) -> UtcInstant {
        let seconds = millis.div_euclid(1000);
        let fraction = Decimal::from(millis.rem_euclid(1000)) / Decimal::from(1000);
        UtcInstant::new(seconds, decimal::round_half_up(fraction, UTC_MAX_PRECISION))
    }

    /// Reconstruct the absolute instant. Digits below nanosecond
    /// resolution round half-up; whole seconds in an out-of-range
    /// fraction carry into the seconds field first.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let nanos = decimal::nanos_from_fraction(&self.fraction)?;
        let seconds = self
            .seconds
            .checked_add(nanos.div_euclid(i64::from(NANOS_PER_SECOND)))
            .ok_or_else(|| {
                TimeError::calendar(format!(
                    "instant [{}, {}] overflows the epoch-second range",
                    self.seconds, self.fraction
                ))
            })?;
        let subsec = nanos.rem_euclid(i64::from(NANOS_PER_SECOND)) as u32;
        Utc.timestamp_opt(seconds, subsec).single().ok_or_else(|| {
            TimeError::calendar(format!(
                "epoch second {seconds} is outside the supported instant range"
            ))
        })
    }

    /// Shift by a decimal number of seconds, negative to step back. The
    /// whole part of the shifted total moves into `seconds` by floor, so
    /// the fraction stays in `[0, 1)` for either sign of `delta`.
    pub fn add_seconds(&self, delta: Decimal) -> Result<UtcInstant> {
        let total = Decimal::from(self.seconds)
            .checked_add(self.fraction)
            .and_then(|total| total.checked_add(delta))
            .ok_or_else(|| {
                TimeError::calendar(format!("adding {delta} seconds overflows the decimal range"))
            })?;
        let whole = total.floor();
        let seconds = whole.to_i64().ok_or_else(|| {
            TimeError::calendar(format!(
                "adding {delta} seconds leaves the epoch-second range"
            ))
        })?;
        Ok(UtcInstant::new(seconds, total - whole))
    }

    /// The signed decimal seconds from `other` up to `self`.
    pub fn diff_seconds(&self, other: &UtcInstant) -> Decimal {
        let this = Decimal::from(self.seconds) + self.fraction;
        let that = Decimal::from(other.seconds) + other.fraction;
        this - that
    }

    /// Parse an RFC 3339 instant string. A leap-second notation is a
    /// calendar error: the tuple has no way to hold a 61st second.
    pub fn from_iso_text(text: &str) -> Result<UtcInstant> {
        let instant = DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|err| classify_parse_error(text, err))?;
        if instant.timestamp_subsec_nanos() >= NANOS_PER_SECOND {
            return Err(TimeError::calendar(format!(
                "'{text}' names a leap second, which the instant tuple cannot carry"
            )));
        }
        Ok(UtcInstant::from_datetime(&instant))
    }

    /// The canonical `Z`-suffixed RFC 3339 form. The fraction prints in
    /// the engine's millisecond, microsecond, or nanosecond groups, and
    /// not at all when zero.
    pub fn to_iso_text(&self) -> Result<String> {
        Ok(self
            .to_datetime()?
            .to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Epoch seconds and sub-second nanos, folding the engine's leap-second
/// representation (nanos of `10^9` and above) into the next second so the
/// fraction stays below one.
fn normalized_parts(instant: &DateTime<Utc>) -> (i64, u32) {
    let mut seconds = instant.timestamp();
    let mut nanos = instant.timestamp_subsec_nanos();
    if nanos >= NANOS_PER_SECOND {
        seconds += 1;
        nanos -= NANOS_PER_SECOND;
    }
    (seconds, nanos)
}

impl Serialize for UtcInstant {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.seconds)?;
        seq.serialize_element(&self.fraction)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for UtcInstant {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TupleVisitor;

        impl<'de> Visitor<'de> for TupleVisitor {
            type Value = UtcInstant;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence [seconds] or [seconds, fraction]")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<UtcInstant, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let seconds: i64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let fraction: Option<Decimal> = seq.next_element()?;
                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(UtcInstant::new(seconds, fraction.unwrap_or_default()))
            }
        }

        deserializer.deserialize_seq(TupleVisitor)
    }
}
