//! Zone-offset text and offset records.
//!
//! Offset text comes in up to three colon-separated fields behind a single
//! leading sign (`-05:30`, `+02`, `+05:30:20`). The sign is scanned once
//! and applied uniformly to every field that is present; text with no
//! leading sign carries no numeric offset at all.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeError};

const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_MINUTE: i64 = 60;

/// The fields found in a signed offset string. Only fields present in the
/// source text are populated; each populated field carries the offset's
/// overall sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<i64>,
}

impl OffsetComponents {
    pub fn is_empty(&self) -> bool {
        self.hour.is_none() && self.minute.is_none() && self.second.is_none()
    }

    /// Total displacement in seconds, with absent fields counted as zero.
    /// Saturates rather than wraps, so oversized fields stay oversized for
    /// the range checks downstream.
    pub fn total_seconds(&self) -> i64 {
        self.hour
            .unwrap_or(0)
            .saturating_mul(SECS_PER_HOUR)
            .saturating_add(self.minute.unwrap_or(0).saturating_mul(SECS_PER_MINUTE))
            .saturating_add(self.second.unwrap_or(0))
    }

    /// Build the engine's fixed offset. The populated fields must share
    /// one sign and keep minute and second magnitudes below sixty;
    /// totals outside the engine's range are calendar errors.
    pub fn to_fixed_offset(&self) -> Result<FixedOffset> {
        check_offset_fields(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        )?;
        fixed_offset_from_seconds(self.total_seconds())
    }
}

/// Parse a signed offset string into its components.
///
/// Trailing fields may be omitted (`-05:30`, `+14`). Text without a
/// leading sign (`Z`, a zone id, plain digits) carries no numeric offset
/// and yields the empty component set; callers decide which absent fields
/// to default.
///
/// ```
/// use civiltime::parse_offset_text;
///
/// let parsed = parse_offset_text("-05:30").unwrap();
/// assert_eq!(parsed.hour, Some(-5));
/// assert_eq!(parsed.minute, Some(-30));
/// assert_eq!(parsed.second, None);
/// ```
pub fn parse_offset_text(text: &str) -> Result<OffsetComponents> {
    let trimmed = text.trim();
    let (negative, magnitudes) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => return Ok(OffsetComponents::default()),
    };

    let mut fields: [Option<i64>; 3] = [None; 3];
    let pieces: Vec<&str> = magnitudes.split(':').collect();
    if pieces.len() > fields.len() {
        return Err(TimeError::format(format!(
            "offset '{trimmed}' has more than three colon-separated fields"
        )));
    }
    for (slot, piece) in fields.iter_mut().zip(&pieces) {
        if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::format(format!(
                "offset field '{piece}' in '{trimmed}' is not an unsigned integer"
            )));
        }
        let magnitude: i64 = piece.parse().map_err(|_| {
            TimeError::format(format!(
                "offset field '{piece}' in '{trimmed}' is too large"
            ))
        })?;
        *slot = Some(if negative { -magnitude } else { magnitude });
    }

    Ok(OffsetComponents {
        hour: fields[0],
        minute: fields[1],
        second: fields[2],
    })
}

/// A civil record's explicit UTC offset: hour and minute are always
/// present (defaulted to zero when the source text omitted them), the
/// second only when the source carried one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcOffset {
    pub hour: i64,
    pub minute: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<i64>,
}

impl UtcOffset {
    /// The defaulting rule of the civil builders: absent hour and minute
    /// fields become zero, an absent second stays absent.
    pub fn from_components(components: OffsetComponents) -> UtcOffset {
        UtcOffset {
            hour: components.hour.unwrap_or(0),
            minute: components.minute.unwrap_or(0),
            second: components.second,
        }
    }

    /// Total displacement from UTC in seconds. Saturates rather than
    /// wraps, so oversized fields stay oversized for the range checks
    /// downstream.
    pub fn total_seconds(&self) -> i64 {
        self.hour
            .saturating_mul(SECS_PER_HOUR)
            .saturating_add(self.minute.saturating_mul(SECS_PER_MINUTE))
            .saturating_add(self.second.unwrap_or(0))
    }

    /// Build the engine's fixed offset. The populated fields must share
    /// one sign and keep minute and second magnitudes below sixty;
    /// totals outside the engine's range are calendar errors.
    pub fn to_fixed_offset(&self) -> Result<FixedOffset> {
        check_offset_fields(self.hour, self.minute, self.second.unwrap_or(0))?;
        fixed_offset_from_seconds(self.total_seconds())
    }
}

/// The field rules of the engine's offset constructor: one sign across
/// every populated field, and minute and second magnitudes below sixty.
/// Violations are calendar errors.
fn check_offset_fields(hour: i64, minute: i64, second: i64) -> Result<()> {
    let has_positive = hour > 0 || minute > 0 || second > 0;
    let has_negative = hour < 0 || minute < 0 || second < 0;
    if has_positive && has_negative {
        return Err(TimeError::calendar(format!(
            "offset fields must share one sign, got hour {hour}, minute {minute}, second {second}"
        )));
    }
    if minute.unsigned_abs() >= 60 || second.unsigned_abs() >= 60 {
        return Err(TimeError::calendar(format!(
            "offset minute and second fields must stay below sixty, got minute {minute}, second {second}"
        )));
    }
    Ok(())
}

/// `FixedOffset` from a total displacement, or a calendar error outside
/// the engine's exclusive one-day bound.
fn fixed_offset_from_seconds(total: i64) -> Result<FixedOffset> {
    i32::try_from(total)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            TimeError::calendar(format!(
                "zone offset of {total} seconds is outside the supported range"
            ))
        })
}

/// The canonical rendering of a fixed offset: `Z` for zero, otherwise
/// `±HH:MM` with a seconds field only when nonzero.
pub(crate) fn canonical_offset_text(total_seconds: i32) -> String {
    if total_seconds == 0 {
        return "Z".to_string();
    }
    let sign = if total_seconds < 0 { '-' } else { '+' };
    let magnitude = total_seconds.unsigned_abs();
    let hours = magnitude / 3600;
    let minutes = (magnitude % 3600) / 60;
    let seconds = magnitude % 60;
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}
