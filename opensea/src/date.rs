use serde::{Deserialize, Deserializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

// OpenSea's v1 `created_date` carries no offset ("2021-09-20T04:06:23.919954")
// and is always UTC. The fractional part is omitted when it is zero.
const NAIVE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    version = 2,
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime(pub OffsetDateTime);

impl DateTime {
    pub fn unix(&self) -> i64 {
        self.0.unix_timestamp()
    }
}

impl From<OffsetDateTime> for DateTime {
    fn from(datetime: OffsetDateTime) -> Self {
        Self(datetime)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        OffsetDateTime::parse(&raw, &Rfc3339)
            .or_else(|_| PrimitiveDateTime::parse(&raw, NAIVE_FORMAT).map(|dt| dt.assume_utc()))
            .map(DateTime)
            .map_err(serde::de::Error::custom)
    }
}
