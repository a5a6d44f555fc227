use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, offset};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Offset of Korea Standard Time, the exchange's local clock.
pub const KST: UtcOffset = offset!(+9);

const COMPACT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year][month][day]");

/// Trading calendar date carried in compact `YYYYMMDD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    /// Parse a strict `YYYYMMDD` string. Separators, signs and whitespace are rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let well_formed = input.len() == 8 && input.bytes().all(|byte| byte.is_ascii_digit());
        if !well_formed {
            return Err(ValidationError::InvalidDateFormat {
                value: input.to_owned(),
            });
        }

        Date::parse(input, COMPACT_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidCalendarDate {
                value: input.to_owned(),
            })
    }

    /// Current calendar date on the exchange's clock.
    pub fn today_kst() -> Self {
        Self::from_instant(OffsetDateTime::now_utc())
    }

    pub fn from_instant(instant: OffsetDateTime) -> Self {
        Self(instant.to_offset(KST).date())
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub fn as_compact(self) -> String {
        format!(
            "{:04}{:02}{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_compact())
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_compact())
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
