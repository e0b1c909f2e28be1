//! # civiltime
//!
//! Conversions between three representations of the same moment: the UTC
//! instant tuple (`[epoch seconds, decimal fraction]`), the civil
//! wall-clock record (year through second with a zone qualifier), and two
//! textual dialects, ISO 8601 extended and the email layout.
//!
//! What makes the conversions more than arithmetic is bookkeeping: the
//! civil record only carries the optional fields its source actually had,
//! fractional seconds travel as exact decimals and round only half-up at
//! explicit precision requests, and splitting seconds uses floor so
//! instants before the epoch behave like any others.
//!
//! ## Modules
//!
//! - [`utc`] — the UTC instant tuple, its arithmetic and RFC 3339 codec
//! - [`civil`] — civil records: builders from zoned instants and text,
//!   and the way back to instants and text
//! - [`dialect`] — structural classification of the ISO textual layouts
//! - [`offset`] — zone-offset text parsing and offset records
//! - [`zone`] — zone qualifiers: fixed offsets and IANA registry zones
//! - [`decimal`] — fractional-second decimal arithmetic
//! - [`error`] — the error taxonomy
//!
//! ## Example
//!
//! ```
//! use civiltime::{CivilTime, ZoneHandling};
//!
//! let civil = CivilTime::from_iso_text("2021-04-12T23:20:50.52+05:30").unwrap();
//! assert_eq!(civil.hour, 23);
//! assert_eq!(civil.time_abbrev, "+05:30");
//!
//! let offset = civil.utc_offset.unwrap();
//! assert_eq!((offset.hour, offset.minute), (5, 30));
//!
//! let zoned = civil.to_zoned(ZoneHandling::PreferOffset).unwrap();
//! assert_eq!(zoned.instant.timestamp(), 1_618_249_850);
//! ```
//!
//! ## Design principle
//!
//! Every conversion is a pure, synchronous value transform: no system
//! clock, no I/O, no shared state. Zone data comes from the compiled IANA
//! registry. A conversion that cannot complete returns a typed
//! [`TimeError`] rather than a partial record.

pub mod civil;
pub mod decimal;
pub mod dialect;
pub mod error;
pub mod offset;
pub mod utc;
pub mod zone;

pub use civil::{civil_to_utc, utc_to_civil, CivilTime, DayOfWeek};
pub use decimal::UTC_MAX_PRECISION;
pub use dialect::IsoDialect;
pub use error::{ErrorKind, Result, TimeError};
pub use offset::{parse_offset_text, OffsetComponents, UtcOffset};
pub use utc::UtcInstant;
pub use zone::{ZoneHandling, ZoneRef, ZonedInstant};
