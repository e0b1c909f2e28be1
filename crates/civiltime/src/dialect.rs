//! Textual dialect detection for the ISO extended layout.
//!
//! Which optional fields a civil record carries depends on the shape of
//! the source text, not on the parsed values: `…T10:15Z` has no seconds
//! field even though a parse would default one. Classification therefore
//! runs over the raw text as a single anchored scan, ahead of the engine
//! parse, and the resulting [`IsoDialect`] is the one authority the civil
//! builders consult.

use crate::error::{Result, TimeError};

/// Strftime layout of the email dialect (`Thu, 3 Jun 2021 11:05:30 +0530`):
/// day-of-week name, unpadded day, month name, year, time, numeric offset.
pub(crate) const EMAIL_LAYOUT: &str = "%a, %-d %b %Y %H:%M:%S %z";

/// The recognized shapes of an ISO extended zoned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoDialect {
    /// `YYYY-MM-DDTHH:MMZ`. No seconds field, no explicit local offset.
    BareUtcNoSeconds,
    /// `YYYY-MM-DDTHH:MM:SS[.fff]Z`. Seconds (with or without a fraction),
    /// still no explicit local offset.
    BareUtcWithSeconds,
    /// Text carrying a signed numeric offset, a bracketed zone annotation,
    /// or both.
    OffsetQualified { has_seconds: bool },
}

impl IsoDialect {
    /// Classify ISO text without parsing its field values.
    pub fn classify(text: &str) -> Result<IsoDialect> {
        classify_iso(text).map(|(dialect, _)| dialect)
    }

    pub fn has_explicit_seconds(&self) -> bool {
        match self {
            IsoDialect::BareUtcNoSeconds => false,
            IsoDialect::BareUtcWithSeconds => true,
            IsoDialect::OffsetQualified { has_seconds } => *has_seconds,
        }
    }

    pub fn has_explicit_offset(&self) -> bool {
        matches!(self, IsoDialect::OffsetQualified { .. })
    }
}

/// The structural slices of a classified ISO string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IsoParts<'a> {
    /// `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the local calendar text.
    pub(crate) datetime: &'a str,
    /// The offset suffix: `Z` or a signed `±HH[:MM[:SS]]`.
    pub(crate) offset: &'a str,
    /// The id inside a trailing `[…]` annotation, when present.
    pub(crate) zone_id: Option<&'a str>,
}

/// Scan `text` against the ISO extended layout, yielding its dialect and
/// slices. The scan is anchored at both ends; any deviation from the
/// layout is a format error.
pub(crate) fn classify_iso(text: &str) -> Result<(IsoDialect, IsoParts<'_>)> {
    let mut scan = Scanner::new(text);
    scan.digits("a four-digit year", 4)?;
    scan.literal(b'-')?;
    scan.digits("a two-digit month", 2)?;
    scan.literal(b'-')?;
    scan.digits("a two-digit day", 2)?;
    scan.literal(b'T')?;
    scan.digits("a two-digit hour", 2)?;
    scan.literal(b':')?;
    scan.digits("a two-digit minute", 2)?;

    let mut has_seconds = false;
    if scan.peek() == Some(b':') {
        scan.bump();
        scan.digits("a two-digit second", 2)?;
        has_seconds = true;
        if scan.peek() == Some(b'.') {
            scan.bump();
            let count = scan.digit_run();
            if count == 0 {
                return Err(TimeError::format(format!(
                    "'{text}' has a fraction point with no digits after it"
                )));
            }
            if count > 9 {
                return Err(TimeError::format(format!(
                    "'{text}' carries {count} fractional-second digits, more than the nine the engine resolves"
                )));
            }
        }
    }
    let datetime = scan.taken();

    let offset_start = scan.position();
    match scan.peek() {
        Some(b'Z') => scan.bump(),
        Some(b'+') | Some(b'-') => {
            scan.bump();
            scan.digits("a two-digit offset hour", 2)?;
            if scan.peek() == Some(b':') {
                scan.bump();
                scan.digits("a two-digit offset minute", 2)?;
                if scan.peek() == Some(b':') {
                    scan.bump();
                    scan.digits("a two-digit offset second", 2)?;
                }
            }
        }
        _ => {
            return Err(TimeError::format(format!(
                "'{text}' carries no offset or zone suffix after the time fields"
            )))
        }
    }
    let offset = scan.since(offset_start);

    let zone_id = if scan.peek() == Some(b'[') {
        scan.bump();
        let rest = scan.rest();
        let end = match rest.find(']') {
            Some(end) => end,
            None => {
                return Err(TimeError::format(format!(
                    "'{text}' has an unterminated zone annotation"
                )))
            }
        };
        if end == 0 {
            return Err(TimeError::format(format!(
                "'{text}' has an empty zone annotation"
            )));
        }
        scan.advance(end + 1);
        Some(&rest[..end])
    } else {
        None
    };

    if !scan.done() {
        return Err(TimeError::format(format!(
            "unexpected trailing text '{}' in '{text}'",
            scan.rest()
        )));
    }

    let dialect = if offset == "Z" && zone_id.is_none() {
        if has_seconds {
            IsoDialect::BareUtcWithSeconds
        } else {
            IsoDialect::BareUtcNoSeconds
        }
    } else {
        IsoDialect::OffsetQualified { has_seconds }
    };
    Ok((dialect, IsoParts { datetime, offset, zone_id }))
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Scanner<'a> {
        Scanner { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn advance(&mut self, count: usize) {
        self.pos += count;
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn done(&self) -> bool {
        self.pos == self.text.len()
    }

    // Slicing here is safe: the scan only ever advances past matched ASCII
    // bytes or to an index found on a char boundary.
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn taken(&self) -> &'a str {
        &self.text[..self.pos]
    }

    fn since(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }

    fn digits(&mut self, what: &str, count: usize) -> Result<()> {
        for _ in 0..count {
            match self.peek() {
                Some(byte) if byte.is_ascii_digit() => self.bump(),
                _ => {
                    return Err(TimeError::format(format!(
                        "expected {what} at byte {} of '{}'",
                        self.pos, self.text
                    )))
                }
            }
        }
        Ok(())
    }

    fn literal(&mut self, expected: u8) -> Result<()> {
        match self.peek() {
            Some(byte) if byte == expected => {
                self.bump();
                Ok(())
            }
            _ => Err(TimeError::format(format!(
                "expected '{}' at byte {} of '{}'",
                expected as char, self.pos, self.text
            ))),
        }
    }

    fn digit_run(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(byte) if byte.is_ascii_digit()) {
            self.bump();
        }
        self.pos - start
    }
}
