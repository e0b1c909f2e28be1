//! Zone qualifiers: fixed offsets and named registry zones.
//!
//! Zone data comes from the compiled IANA registry in [`chrono_tz`], so
//! lookups are immutable and free of I/O. A qualifier is either a fixed
//! displacement from UTC or a named zone whose displacement depends on
//! the instant being projected.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, TimeError};
use crate::offset::{self, canonical_offset_text};

/// How [`CivilTime::to_zoned`](crate::CivilTime::to_zoned) picks the
/// target zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneHandling {
    /// Build a fixed offset from the record's `utc_offset` fields, which
    /// must be present.
    PreferOffset,
    /// Resolve the record's `time_abbrev` text as a zone id or an offset
    /// literal.
    PreferZoneId,
}

/// A resolved zone qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRef {
    Fixed(FixedOffset),
    Named(Tz),
}

impl ZoneRef {
    /// The `Z` zone: a zero fixed offset whose canonical name is `"Z"`.
    pub fn utc() -> ZoneRef {
        ZoneRef::Fixed(Utc.fix())
    }

    /// Resolve zone text the way the engine's id lookup does: `Z` and
    /// signed offset literals become fixed offsets, anything else is
    /// looked up in the zone registry. Unresolvable text is a calendar
    /// error.
    pub fn resolve(text: &str) -> Result<ZoneRef> {
        let trimmed = text.trim();
        if trimmed == "Z" {
            return Ok(ZoneRef::utc());
        }
        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            let fixed = offset::parse_offset_text(trimmed)?.to_fixed_offset()?;
            return Ok(ZoneRef::Fixed(fixed));
        }
        trimmed
            .parse::<Tz>()
            .map(ZoneRef::Named)
            .map_err(|_| TimeError::calendar(format!("unknown zone id '{trimmed}'")))
    }

    /// Canonical text form: `Z` for the zero offset, `±HH:MM[:SS]` for
    /// other fixed offsets, the IANA id for named zones.
    pub fn canonical(&self) -> String {
        match self {
            ZoneRef::Fixed(fixed) => canonical_offset_text(fixed.local_minus_utc()),
            ZoneRef::Named(tz) => tz.name().to_string(),
        }
    }

    /// The displacement from UTC this zone applies at `instant`, in
    /// seconds.
    pub fn offset_seconds_at(&self, instant: &DateTime<Utc>) -> i32 {
        match self {
            ZoneRef::Fixed(fixed) => fixed.local_minus_utc(),
            ZoneRef::Named(tz) => instant.with_timezone(tz).offset().fix().local_minus_utc(),
        }
    }

    /// Project an instant into this zone's local calendar fields.
    pub(crate) fn local_datetime(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            ZoneRef::Fixed(fixed) => instant.with_timezone(fixed).naive_local(),
            ZoneRef::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Attach this zone to local calendar fields, producing the instant.
    /// A local time made ambiguous by clocks rolling back resolves to the
    /// earlier instant; one skipped by clocks jumping forward is a
    /// calendar error.
    pub(crate) fn instant_of_local(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        let earliest = match self {
            ZoneRef::Fixed(fixed) => fixed
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            ZoneRef::Named(tz) => tz
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        };
        earliest.ok_or_else(|| {
            TimeError::calendar(format!(
                "local time {local} does not exist in zone '{}'",
                self.canonical()
            ))
        })
    }
}

/// An absolute instant together with the zone qualifier it was expressed
/// in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedInstant {
    pub instant: DateTime<Utc>,
    pub zone: ZoneRef,
}

impl ZonedInstant {
    pub fn new(instant: DateTime<Utc>, zone: ZoneRef) -> ZonedInstant {
        ZonedInstant { instant, zone }
    }

    /// The instant qualified by the `Z` zone.
    pub fn at_utc(instant: DateTime<Utc>) -> ZonedInstant {
        ZonedInstant::new(instant, ZoneRef::utc())
    }
}
