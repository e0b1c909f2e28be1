//! Civil calendar records and their builders.
//!
//! A [`CivilTime`] is a wall-clock reading: the local year through minute
//! fields, an optional decimal second, a zone qualifier in text form, and
//! optionally the numeric offset the reading was taken at. Which of the
//! optional fields are populated depends on the entry point that built
//! the record, so a record can be carried back to text without inventing
//! fields its source never had.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike,
    Utc, Weekday,
};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::decimal::{self, NANOS_PER_SECOND};
use crate::dialect;
use crate::error::{classify_parse_error, Result, TimeError};
use crate::offset::{self, UtcOffset};
use crate::utc::UtcInstant;
use crate::zone::{ZoneHandling, ZoneRef, ZonedInstant};

// ── day of week ──────────────────────────────────────────────────────────

/// Day of the week in the record's numbering: Sunday is 0, Saturday is 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    /// Map the engine's weekday (Monday 1 through Sunday 7) onto the
    /// record numbering by reducing modulo seven.
    pub fn from_weekday(weekday: Weekday) -> DayOfWeek {
        match weekday.number_from_monday() % 7 {
            0 => DayOfWeek::Sunday,
            1 => DayOfWeek::Monday,
            2 => DayOfWeek::Tuesday,
            3 => DayOfWeek::Wednesday,
            4 => DayOfWeek::Thursday,
            5 => DayOfWeek::Friday,
            _ => DayOfWeek::Saturday,
        }
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(DayOfWeek::Sunday),
            1 => Ok(DayOfWeek::Monday),
            2 => Ok(DayOfWeek::Tuesday),
            3 => Ok(DayOfWeek::Wednesday),
            4 => Ok(DayOfWeek::Thursday),
            5 => Ok(DayOfWeek::Friday),
            6 => Ok(DayOfWeek::Saturday),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(u64::from(other)),
                &"a day-of-week number from 0 to 6",
            )),
        }
    }
}

// ── the civil record ─────────────────────────────────────────────────────

/// A wall-clock calendar record with a zone qualifier.
///
/// Serialization uses the record's camelCase key names (`timeAbbrev`,
/// `utcOffset`, `dayOfWeek`) and omits absent optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Whole seconds and fraction in one decimal, integer part 0 to 60.
    /// Present only when the source carried an explicit seconds field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<Decimal>,
    /// Zone qualifier text: an IANA id or the canonical offset form.
    #[serde(default)]
    pub time_abbrev: String,
    /// Numeric offset fields. Present only when the source text carried
    /// an explicit offset or zone annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<UtcOffset>,
    /// Computed by the builders, never read back from input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
}

impl CivilTime {
    /// Read the civil record of a zoned instant.
    ///
    /// `second` is always populated here, whole seconds and nanosecond
    /// fraction combined in one exact decimal. `utc_offset` never is:
    /// the zone qualifier itself is the context, and only the text entry
    /// points record an explicit offset.
    pub fn from_zoned(zoned: &ZonedInstant) -> CivilTime {
        let local = zoned.zone.local_datetime(&zoned.instant);
        let second =
            Decimal::from(local.second()) + decimal::fraction_from_nanos(local.nanosecond());
        CivilTime {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: Some(second),
            time_abbrev: zoned.zone.canonical(),
            utc_offset: None,
            day_of_week: Some(DayOfWeek::from_weekday(local.weekday())),
        }
    }

    /// Parse a strict ISO 8601 extended zoned string.
    ///
    /// The [`IsoDialect`](crate::dialect::IsoDialect) of the raw text
    /// decides the optional fields:
    /// a bare-UTC string without seconds leaves `second` absent, any
    /// bare-UTC string leaves `utc_offset` absent, and offset-qualified
    /// text records the offset that applies at the parsed instant. When
    /// the text carries both an offset and a bracketed zone annotation,
    /// the offset fixes the instant and the named zone supplies the local
    /// fields and the qualifier text.
    ///
    /// ```
    /// use civiltime::CivilTime;
    ///
    /// let civil = CivilTime::from_iso_text("2021-04-12T23:20:50.52+05:30").unwrap();
    /// assert_eq!((civil.year, civil.month, civil.day), (2021, 4, 12));
    /// assert_eq!(civil.time_abbrev, "+05:30");
    /// assert_eq!(civil.second, Some("50.52".parse().unwrap()));
    ///
    /// let bare = CivilTime::from_iso_text("2021-04-12T23:20Z").unwrap();
    /// assert_eq!(bare.second, None);
    /// assert_eq!(bare.utc_offset, None);
    /// ```
    pub fn from_iso_text(text: &str) -> Result<CivilTime> {
        let (dialect, parts) = dialect::classify_iso(text)?;
        let local = parse_local_part(parts.datetime, dialect.has_explicit_seconds())?;
        if local.nanosecond() >= NANOS_PER_SECOND {
            return Err(TimeError::calendar(format!(
                "'{text}' names a leap second, which the civil record cannot place"
            )));
        }

        let fixed = offset::parse_offset_text(parts.offset)?.to_fixed_offset()?;
        let instant = local
            .checked_sub_signed(Duration::seconds(i64::from(fixed.local_minus_utc())))
            .ok_or_else(|| {
                TimeError::calendar(format!("'{text}' is outside the supported instant range"))
            })?
            .and_utc();
        let zone = match parts.zone_id {
            Some(id) => ZoneRef::resolve(id)?,
            None => ZoneRef::Fixed(fixed),
        };

        let mut civil = CivilTime::from_zoned(&ZonedInstant::new(instant, zone));
        if !dialect.has_explicit_seconds() {
            civil.second = None;
        }
        if dialect.has_explicit_offset() {
            civil.utc_offset = Some(record_offset(zone.offset_seconds_at(&instant))?);
        }
        Ok(civil)
    }

    /// Parse the fixed email layout (`Thu, 3 Jun 2021 11:05:30 +0530`).
    ///
    /// The layout always carries a seconds field and a numeric offset, so
    /// both `second` and `utc_offset` are populated. A day-of-week name
    /// that contradicts the date is a calendar error, like any impossible
    /// field value; text that does not follow the layout is a format
    /// error.
    pub fn from_email_text(text: &str) -> Result<CivilTime> {
        let parsed = DateTime::parse_from_str(text, dialect::EMAIL_LAYOUT)
            .map_err(|err| classify_parse_error(text, err))?;
        if parsed.timestamp_subsec_nanos() >= NANOS_PER_SECOND {
            return Err(TimeError::calendar(format!(
                "'{text}' names a leap second, which the civil record cannot place"
            )));
        }
        let offset = *parsed.offset();
        let mut civil = CivilTime::from_zoned(&ZonedInstant::new(
            parsed.with_timezone(&Utc),
            ZoneRef::Fixed(offset),
        ));
        civil.utc_offset = Some(record_offset(offset.local_minus_utc())?);
        Ok(civil)
    }

    /// Materialize the record as a zoned instant.
    ///
    /// The decimal second splits into a whole second by floor and a
    /// nanosecond fraction rounded half-up; an absent second counts as
    /// zero. With [`ZoneHandling::PreferOffset`] the target zone is a
    /// fixed offset built from `utc_offset`, which must be present; with
    /// [`ZoneHandling::PreferZoneId`] the `time_abbrev` text resolves
    /// through the zone registry or as an offset literal. Out-of-range
    /// calendar fields, unresolvable zone text, and local times skipped
    /// by a zone transition are calendar errors.
    pub fn to_zoned(&self, handling: ZoneHandling) -> Result<ZonedInstant> {
        let (whole_second, nanos) = decimal::split_seconds_decimal(&self.second.unwrap_or_default())?;
        let zone = match handling {
            ZoneHandling::PreferOffset => {
                let utc_offset = self.utc_offset.as_ref().ok_or_else(|| {
                    TimeError::format(
                        "the civil record carries no utcOffset to build a fixed-offset zone from",
                    )
                })?;
                ZoneRef::Fixed(utc_offset.to_fixed_offset()?)
            }
            ZoneHandling::PreferZoneId => ZoneRef::resolve(&self.time_abbrev)?,
        };
        let local = self.local_datetime(whole_second, nanos)?;
        let instant = zone.instant_of_local(local)?;
        Ok(ZonedInstant::new(instant, zone))
    }

    /// RFC 3339 text of the record's instant under the chosen zone
    /// handling; the zero offset prints as `Z`.
    pub fn to_iso_text(&self, handling: ZoneHandling) -> Result<String> {
        let zoned = self.to_zoned(handling)?;
        Ok(match zoned.zone {
            ZoneRef::Fixed(fixed) => zoned
                .instant
                .with_timezone(&fixed)
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ZoneRef::Named(tz) => zoned
                .instant
                .with_timezone(&tz)
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        })
    }

    /// The fixed email layout of the record's instant under the chosen
    /// zone handling. Fractional seconds do not survive this layout.
    pub fn to_email_text(&self, handling: ZoneHandling) -> Result<String> {
        let zoned = self.to_zoned(handling)?;
        Ok(match zoned.zone {
            ZoneRef::Fixed(fixed) => zoned
                .instant
                .with_timezone(&fixed)
                .format(dialect::EMAIL_LAYOUT)
                .to_string(),
            ZoneRef::Named(tz) => zoned
                .instant
                .with_timezone(&tz)
                .format(dialect::EMAIL_LAYOUT)
                .to_string(),
        })
    }

    fn local_datetime(&self, whole_second: i64, nanos: u32) -> Result<NaiveDateTime> {
        let second = u32::try_from(whole_second).map_err(|_| {
            TimeError::calendar(format!(
                "second {whole_second} is outside the calendar range"
            ))
        })?;
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            TimeError::calendar(format!(
                "{:04}-{:02}-{:02} is not a valid calendar date",
                self.year, self.month, self.day
            ))
        })?;
        let time = NaiveTime::from_hms_nano_opt(self.hour, self.minute, second, nanos)
            .ok_or_else(|| {
                TimeError::calendar(format!(
                    "{:02}:{:02}:{:02} is not a valid time of day",
                    self.hour, self.minute, second
                ))
            })?;
        Ok(NaiveDateTime::new(date, time))
    }
}

// ── compositions ─────────────────────────────────────────────────────────

/// View a UTC tuple as civil time at the `Z` zone.
pub fn utc_to_civil(utc: &UtcInstant) -> Result<CivilTime> {
    Ok(CivilTime::from_zoned(&ZonedInstant::at_utc(
        utc.to_datetime()?,
    )))
}

/// Collapse a civil record carrying an explicit `utc_offset` back to the
/// UTC tuple, exact to the nanosecond.
pub fn civil_to_utc(civil: &CivilTime) -> Result<UtcInstant> {
    let zoned = civil.to_zoned(ZoneHandling::PreferOffset)?;
    Ok(UtcInstant::from_datetime(&zoned.instant))
}

// ── helpers ──────────────────────────────────────────────────────────────

const LOCAL_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";
const LOCAL_NO_SECONDS: &str = "%Y-%m-%dT%H:%M";

fn parse_local_part(text: &str, has_seconds: bool) -> Result<NaiveDateTime> {
    let layout = if has_seconds {
        LOCAL_WITH_SECONDS
    } else {
        LOCAL_NO_SECONDS
    };
    NaiveDateTime::parse_from_str(text, layout).map_err(|err| classify_parse_error(text, err))
}

/// The record's offset fields come from stringifying the resolved offset
/// and re-reading it, so they follow the canonical form's field
/// population, not the source text's.
fn record_offset(offset_seconds: i32) -> Result<UtcOffset> {
    let canonical = offset::canonical_offset_text(offset_seconds);
    Ok(UtcOffset::from_components(offset::parse_offset_text(
        &canonical,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // ── ISO dialect field population ────────────────────────────────────

    #[test]
    fn test_bare_utc_with_fraction() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50.52Z").unwrap();
        assert_eq!((civil.year, civil.month, civil.day), (2021, 4, 12));
        assert_eq!((civil.hour, civil.minute), (23, 20));
        assert_eq!(civil.second, Some(dec("50.52")));
        assert_eq!(civil.time_abbrev, "Z");
        assert_eq!(civil.utc_offset, None);
        // April 12 2021 is a Monday
        assert_eq!(civil.day_of_week, Some(DayOfWeek::Monday));
    }

    #[test]
    fn test_bare_utc_without_seconds() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20Z").unwrap();
        assert_eq!(civil.second, None);
        assert_eq!(civil.utc_offset, None);
        assert_eq!(civil.time_abbrev, "Z");
        assert_eq!((civil.hour, civil.minute), (23, 20));
    }

    #[test]
    fn test_bare_utc_seconds_without_fraction() {
        // Seconds alone, without a fraction, still stay a bare-UTC form
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50Z").unwrap();
        assert_eq!(civil.second, Some(dec("50")));
        assert_eq!(civil.utc_offset, None);
        assert_eq!(civil.time_abbrev, "Z");
    }

    #[test]
    fn test_offset_text_populates_offset_fields() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50.52+05:30").unwrap();
        assert_eq!(civil.time_abbrev, "+05:30");
        let offset = civil.utc_offset.unwrap();
        assert_eq!((offset.hour, offset.minute, offset.second), (5, 30, None));
        // Local fields stay as written
        assert_eq!((civil.hour, civil.minute), (23, 20));
        assert_eq!(civil.second, Some(dec("50.52")));
    }

    #[test]
    fn test_offset_without_minutes_defaults_them() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20-08").unwrap();
        assert_eq!(civil.time_abbrev, "-08:00");
        let offset = civil.utc_offset.unwrap();
        assert_eq!((offset.hour, offset.minute, offset.second), (-8, 0, None));
        assert_eq!(civil.second, None);
    }

    #[test]
    fn test_zero_offset_canonicalizes_to_z() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50+00:00").unwrap();
        assert_eq!(civil.time_abbrev, "Z");
        let offset = civil.utc_offset.unwrap();
        assert_eq!((offset.hour, offset.minute, offset.second), (0, 0, None));
    }

    #[test]
    fn test_bracketed_zone_supplies_local_fields() {
        // 23:20:50 at +01:00 is 22:20:50 UTC, which Colombo (+05:30)
        // reads as 03:50:50 the next day
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50+01:00[Asia/Colombo]").unwrap();
        assert_eq!(civil.time_abbrev, "Asia/Colombo");
        assert_eq!((civil.year, civil.month, civil.day), (2021, 4, 13));
        assert_eq!((civil.hour, civil.minute), (3, 50));
        assert_eq!(civil.second, Some(dec("50")));
        let offset = civil.utc_offset.unwrap();
        assert_eq!((offset.hour, offset.minute), (5, 30));
        assert_eq!(civil.day_of_week, Some(DayOfWeek::Tuesday));
    }

    #[test]
    fn test_bracketed_zone_with_matching_offset() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50+05:30[Asia/Colombo]").unwrap();
        assert_eq!((civil.hour, civil.minute), (23, 20));
        let zoned = civil.to_zoned(ZoneHandling::PreferZoneId).unwrap();
        assert_eq!(
            zoned.instant,
            Utc.with_ymd_and_hms(2021, 4, 12, 17, 50, 50).unwrap()
        );
    }

    #[test]
    fn test_day_of_week_numbering_starts_at_sunday() {
        let sunday = CivilTime::from_iso_text("2021-04-11T00:00:00Z").unwrap();
        assert_eq!(sunday.day_of_week, Some(DayOfWeek::Sunday));
        assert_eq!(sunday.day_of_week.unwrap().number(), 0);

        let saturday = CivilTime::from_iso_text("2021-04-10T23:59:59Z").unwrap();
        assert_eq!(saturday.day_of_week, Some(DayOfWeek::Saturday));
        assert_eq!(saturday.day_of_week.unwrap().number(), 6);
    }

    // ── email layout ────────────────────────────────────────────────────

    #[test]
    fn test_email_layout_populates_every_field() {
        let civil = CivilTime::from_email_text("Thu, 3 Jun 2021 11:05:30 +0530").unwrap();
        assert_eq!((civil.year, civil.month, civil.day), (2021, 6, 3));
        assert_eq!((civil.hour, civil.minute), (11, 5));
        assert_eq!(civil.second, Some(dec("30")));
        assert_eq!(civil.time_abbrev, "+05:30");
        let offset = civil.utc_offset.unwrap();
        assert_eq!((offset.hour, offset.minute), (5, 30));
        assert_eq!(civil.day_of_week, Some(DayOfWeek::Thursday));
    }

    #[test]
    fn test_email_weekday_must_match_the_date() {
        // June 3 2021 is a Thursday, not a Monday
        let err = CivilTime::from_email_text("Mon, 3 Jun 2021 11:05:30 +0530").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calendar);
    }

    #[test]
    fn test_email_layout_mismatch_is_a_format_error() {
        for text in ["2021-06-03T11:05:30Z", "garbage", "Thu, 3 Jun 2021 11:05 +0530"] {
            let err = CivilTime::from_email_text(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{text}");
        }
    }

    #[test]
    fn test_email_impossible_date_is_a_calendar_error() {
        let err = CivilTime::from_email_text("Tue, 30 Feb 2021 10:00:00 +0000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calendar);
    }

    // ── error classification ────────────────────────────────────────────

    #[test]
    fn test_out_of_range_text_fields_are_calendar_errors() {
        for text in ["2021-13-12T23:20:50Z", "2021-02-30T00:00:00Z", "2021-04-12T24:20:50Z"] {
            let err = CivilTime::from_iso_text(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Calendar, "{text}");
        }
    }

    #[test]
    fn test_out_of_range_record_fields_are_calendar_errors() {
        let mut civil = CivilTime::from_iso_text("2021-04-12T23:20:50Z").unwrap();
        civil.month = 13;
        let err = civil.to_zoned(ZoneHandling::PreferZoneId).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calendar);
    }

    #[test]
    fn test_prefer_offset_requires_the_offset_fields() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50Z").unwrap();
        let err = civil.to_zoned(ZoneHandling::PreferOffset).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_unknown_zone_id_is_a_calendar_error() {
        let mut civil = CivilTime::from_iso_text("2021-04-12T23:20:50Z").unwrap();
        civil.time_abbrev = "Mars/Olympus".to_string();
        let err = civil.to_zoned(ZoneHandling::PreferZoneId).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calendar);
    }

    #[test]
    fn test_leap_second_text_is_a_calendar_error() {
        let err = CivilTime::from_iso_text("1990-12-31T23:59:60Z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calendar);
    }

    #[test]
    fn test_oversized_offset_minute_is_a_calendar_error() {
        // Both text layouts reject minute 99 instead of reading +06:39
        let err = CivilTime::from_iso_text("2021-04-12T23:20:50+05:99").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calendar);
        let err = CivilTime::from_email_text("Mon, 12 Apr 2021 23:20:50 +0599").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calendar);
    }

    // ── zone transitions ────────────────────────────────────────────────

    #[test]
    fn test_ambiguous_local_time_takes_the_earlier_instant() {
        // November 7 2021, 01:30 in New York happens twice; the earlier
        // pass is still EDT (UTC-4), so the instant is 05:30 UTC
        let mut civil = CivilTime::from_iso_text("2021-11-07T01:30:00Z").unwrap();
        civil.time_abbrev = "America/New_York".to_string();
        let zoned = civil.to_zoned(ZoneHandling::PreferZoneId).unwrap();
        assert_eq!(
            zoned.instant,
            Utc.with_ymd_and_hms(2021, 11, 7, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_skipped_local_time_is_a_calendar_error() {
        // March 14 2021, 02:30 never happens in New York
        let mut civil = CivilTime::from_iso_text("2021-03-14T02:30:00Z").unwrap();
        civil.time_abbrev = "America/New_York".to_string();
        let err = civil.to_zoned(ZoneHandling::PreferZoneId).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calendar);
    }

    // ── second splitting ────────────────────────────────────────────────

    #[test]
    fn test_second_rounding_can_carry_into_the_minute() {
        let mut civil = CivilTime::from_iso_text("2021-04-12T23:20:30Z").unwrap();
        civil.second = Some(dec("30.9999999996"));
        let zoned = civil.to_zoned(ZoneHandling::PreferZoneId).unwrap();
        assert_eq!(
            zoned.instant,
            Utc.with_ymd_and_hms(2021, 4, 12, 23, 20, 31).unwrap()
        );
    }

    #[test]
    fn test_absent_second_counts_as_zero() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20Z").unwrap();
        let zoned = civil.to_zoned(ZoneHandling::PreferZoneId).unwrap();
        assert_eq!(
            zoned.instant,
            Utc.with_ymd_and_hms(2021, 4, 12, 23, 20, 0).unwrap()
        );
    }

    // ── text round trips ────────────────────────────────────────────────

    #[test]
    fn test_iso_text_round_trip() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50.52+05:30").unwrap();
        assert_eq!(
            civil.to_iso_text(ZoneHandling::PreferOffset).unwrap(),
            "2021-04-12T23:20:50.520+05:30"
        );
    }

    #[test]
    fn test_email_text_round_trip() {
        let text = "Thu, 3 Jun 2021 11:05:30 +0530";
        let civil = CivilTime::from_email_text(text).unwrap();
        assert_eq!(civil.to_email_text(ZoneHandling::PreferOffset).unwrap(), text);
    }

    #[test]
    fn test_email_text_in_a_named_zone() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50+05:30[Asia/Colombo]").unwrap();
        assert_eq!(
            civil.to_email_text(ZoneHandling::PreferZoneId).unwrap(),
            "Mon, 12 Apr 2021 23:20:50 +0530"
        );
    }

    // ── compositions with the UTC tuple ─────────────────────────────────

    #[test]
    fn test_utc_to_civil_reads_at_z() {
        let utc = UtcInstant::from_datetime(&Utc.with_ymd_and_hms(2021, 4, 11, 0, 0, 0).unwrap());
        let civil = utc_to_civil(&utc).unwrap();
        assert_eq!(civil.time_abbrev, "Z");
        assert_eq!(civil.second, Some(Decimal::ZERO));
        assert_eq!(civil.utc_offset, None);
        assert_eq!(civil.day_of_week, Some(DayOfWeek::Sunday));
    }

    #[test]
    fn test_civil_to_utc_collapses_the_offset() {
        let civil = CivilTime::from_iso_text("2021-04-12T23:20:50.52+05:30").unwrap();
        let utc = civil_to_utc(&civil).unwrap();
        assert_eq!(
            utc.seconds,
            Utc.with_ymd_and_hms(2021, 4, 12, 17, 50, 50).unwrap().timestamp()
        );
        assert_eq!(utc.fraction, dec("0.52"));
    }

    #[test]
    fn test_from_zoned_in_a_named_zone() {
        // 12:00 UTC in mid-January is 07:00 in New York (EST, UTC-5)
        let zone = ZoneRef::resolve("America/New_York").unwrap();
        let instant = Utc.with_ymd_and_hms(2021, 1, 15, 12, 0, 0).unwrap();
        let civil = CivilTime::from_zoned(&ZonedInstant::new(instant, zone));
        assert_eq!(civil.hour, 7);
        assert_eq!(civil.time_abbrev, "America/New_York");
        assert_eq!(civil.utc_offset, None);
        assert_eq!(civil.second, Some(Decimal::ZERO));
    }
}
