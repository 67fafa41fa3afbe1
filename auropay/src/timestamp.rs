//! Payment-link expiry timestamps.
//!
//! The gateway takes expiry as `DD-MM-YYYY hh:mm:ss` wall-clock text. The
//! text is interpreted as UTC and compared against the current time at
//! whole-second resolution.

use std::fmt;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::catalog::CatalogCode;
use crate::error::ValidationError;
use crate::validation::{EXPIRE_ON, fail, match_pattern};

const EXPIRE_ON_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year] [hour]:[minute]:[second]");

/// A validated expiry moment, kept alongside the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpireOn {
    text: String,
    moment: PrimitiveDateTime,
}

impl ExpireOn {
    /// Parses `text` without checking it against the current time.
    ///
    /// # Errors
    ///
    /// Returns `SE0001` if the text is not `DD-MM-YYYY hh:mm:ss` or does not
    /// name a real calendar moment.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        match_pattern(text, &EXPIRE_ON, CatalogCode::ExpireOnFormat)?;
        let moment = PrimitiveDateTime::parse(text, EXPIRE_ON_FORMAT)
            .map_err(|_| fail(CatalogCode::ExpireOnFormat))?;
        Ok(Self {
            text: text.to_owned(),
            moment,
        })
    }

    /// Parses `text` and requires it to be no earlier than `now`.
    ///
    /// # Errors
    ///
    /// Returns `SE0001` for malformed text, then `SE0024` for a moment in
    /// the past.
    pub fn parse_not_before(text: &str, now: OffsetDateTime) -> Result<Self, ValidationError> {
        let expire_on = Self::parse(text)?;
        let now = now.replace_nanosecond(0).unwrap_or(now);
        if expire_on.moment.assume_utc() < now {
            return Err(fail(CatalogCode::ExpireOnInPast));
        }
        Ok(expire_on)
    }

    /// Parses `text` and requires it to be no earlier than the current UTC time.
    ///
    /// # Errors
    ///
    /// See [`ExpireOn::parse_not_before`].
    pub fn parse_future(text: &str) -> Result<Self, ValidationError> {
        Self::parse_not_before(text, OffsetDateTime::now_utc())
    }

    /// Formats `moment` in the gateway's expiry layout.
    #[must_use]
    pub fn format(moment: OffsetDateTime) -> String {
        let utc = moment.to_offset(time::UtcOffset::UTC);
        utc.format(EXPIRE_ON_FORMAT).unwrap_or_default()
    }

    /// Returns the text as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the parsed moment, interpreted as UTC.
    #[must_use]
    pub const fn moment(&self) -> OffsetDateTime {
        self.moment.assume_utc()
    }
}

impl fmt::Display for ExpireOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_parse_valid() {
        let expire_on = ExpireOn::parse("05-03-2031 14:30:00").unwrap();
        assert_eq!(expire_on.moment(), datetime!(2031-03-05 14:30:00 UTC));
        assert_eq!(expire_on.as_str(), "05-03-2031 14:30:00");
    }

    #[test]
    fn test_malformed_is_format_error() {
        for text in ["2024/01/01", "1-1-2031 00:00:00", "01-01-2031T00:00:00", ""] {
            let err = ExpireOn::parse(text).unwrap_err();
            assert_eq!(err.code(), CatalogCode::ExpireOnFormat, "{text}");
        }
    }

    #[test]
    fn test_impossible_date_is_format_error() {
        let err = ExpireOn::parse("31-02-2031 00:00:00").unwrap_err();
        assert_eq!(err.code(), CatalogCode::ExpireOnFormat);
        let err = ExpireOn::parse("01-01-2031 25:00:00").unwrap_err();
        assert_eq!(err.code(), CatalogCode::ExpireOnFormat);
    }

    #[test]
    fn test_not_before_boundaries() {
        let now = datetime!(2030-06-15 10:00:00.250 UTC);
        assert!(ExpireOn::parse_not_before("15-06-2030 10:00:01", now).is_ok());
        // Same second counts as present.
        assert!(ExpireOn::parse_not_before("15-06-2030 10:00:00", now).is_ok());
        let err = ExpireOn::parse_not_before("15-06-2030 09:59:59", now).unwrap_err();
        assert_eq!(err.code(), CatalogCode::ExpireOnInPast);
    }

    #[test]
    fn test_format_check_runs_before_past_check() {
        let now = datetime!(2030-06-15 10:00:00 UTC);
        let err = ExpireOn::parse_not_before("2000/01/01", now).unwrap_err();
        assert_eq!(err.code(), CatalogCode::ExpireOnFormat);
    }

    #[test]
    fn test_parse_future_against_clock() {
        let now = OffsetDateTime::now_utc();
        let past = ExpireOn::format(now - Duration::seconds(1));
        let err = ExpireOn::parse_future(&past).unwrap_err();
        assert_eq!(err.code(), CatalogCode::ExpireOnInPast);

        let future = ExpireOn::format(now + Duration::minutes(5));
        assert!(ExpireOn::parse_future(&future).is_ok());
    }
}
