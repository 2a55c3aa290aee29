//! Timestamp parsing for post keys.
//!
//! Posts are keyed by a calendar date and time with minute precision. Callers
//! supply the key as text in a fixed format, by default `D/M/YYYY HH:MM`
//! (day and month may be one or two digits, 24-hour clock, no seconds, no
//! timezone). Every public index operation parses its timestamp arguments
//! through a [`TimestampParser`] before touching any internal structure.
//!
//! # Example
//!
//! ```rust
//! use postindex::timestamp::TimestampParser;
//!
//! let parser = TimestampParser::default();
//! let ts = parser.parse("17/1/2024 15:00")?;
//! assert_eq!(parser.format(&ts), "17/01/2024 15:00");
//! # Ok::<(), postindex::error::ParseError>(())
//! ```

use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};

use crate::error::{ParseError, ParseErrorKind};

/// Default key format: `day/month/year hour:minute`.
pub const DEFAULT_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Parses and renders post timestamps using a `strftime`-style format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParser {
    format: String,
}

impl TimestampParser {
    /// Creates a parser for the given format string.
    ///
    /// The format is not checked here; see
    /// [`IndexConfig::validate`](crate::IndexConfig::validate).
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Returns the format string this parser uses.
    pub fn format_str(&self) -> &str {
        &self.format
    }

    /// Parses `text` into a timestamp.
    ///
    /// With the default format the year must be exactly four digits and the
    /// date and time must be separated by whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if `text` does not match the format or names an
    /// impossible date or time (month 13, 31 February, hour 24).
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime, ParseError> {
        if self.format == DEFAULT_FORMAT {
            check_default_layout(text).map_err(|kind| self.error(text, kind))?;
        }
        NaiveDateTime::parse_from_str(text, &self.format)
            .map_err(|source| self.error(text, source.into()))
    }

    /// Renders a timestamp with this parser's format.
    ///
    /// Output is zero-padded (`01/01/2024 08:30`) and parses back to the same
    /// value. Falls back to chrono's ISO rendering if the format string
    /// contains an unknown specifier.
    pub fn format(&self, ts: &NaiveDateTime) -> String {
        if has_invalid_specifier(&self.format) {
            return ts.to_string();
        }
        ts.format_with_items(StrftimeItems::new(&self.format)).to_string()
    }

    fn error(&self, text: &str, kind: ParseErrorKind) -> ParseError {
        ParseError {
            input: text.to_string(),
            format: self.format_str().to_string(),
            kind,
        }
    }
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

/// Enforces the parts of `D/M/YYYY HH:MM` that chrono's `%Y` and its space
/// matching leave loose: a signed or short year, or no gap before the time.
fn check_default_layout(text: &str) -> Result<(), ParseErrorKind> {
    let Some((date, _)) = text.split_once(char::is_whitespace) else {
        return Err(ParseErrorKind::MissingSeparator);
    };
    if let Some((_, year)) = date.rsplit_once('/')
        && !(year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(ParseErrorKind::YearWidth {
            year: year.to_string(),
        });
    }
    Ok(())
}

/// Returns true if `format` contains a specifier chrono cannot interpret.
pub(crate) fn has_invalid_specifier(format: &str) -> bool {
    StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
