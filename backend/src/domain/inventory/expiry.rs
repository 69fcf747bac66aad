//! Expiry date parsing and window classification.

use chrono::{DateTime, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Horizon, in days after today, for the "expiring soon" listing.
pub const EXPIRING_SOON_DAYS: u32 = 4;

/// Window, in days after today, used to pick suggestion candidates.
pub const SUGGESTION_WINDOW_DAYS: u32 = 20;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d-%m-%Y"];

/// Parse a stored expiry string into a calendar date.
///
/// Accepts ISO dates (`2025-06-01`), day-first dates (`01-06-2025`) and
/// RFC 3339 timestamps, of which only the date part is kept. Anything else
/// yields `None`; callers exclude such entries from classification.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pantry::domain::parse_expiry_date;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 6, 1);
/// assert_eq!(parse_expiry_date("2025-06-01"), expected);
/// assert_eq!(parse_expiry_date("01-06-2025"), expected);
/// assert_eq!(parse_expiry_date("not-a-date"), None);
/// ```
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Which expiry bucket to select, relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryFilter {
    /// Strictly after today and on or before `today + horizon_days`.
    ExpiringSoon { horizon_days: u32 },
    /// Strictly before today.
    Expired,
    /// On or before `today + days`, already-expired entries included.
    WithinWindow { days: u32 },
}

impl ExpiryFilter {
    /// The "expiring soon" bucket with the default horizon.
    pub const fn expiring_soon() -> Self {
        Self::ExpiringSoon {
            horizon_days: EXPIRING_SOON_DAYS,
        }
    }

    /// Whether `expiry` falls inside this bucket for the given `today`.
    pub fn matches(&self, expiry: NaiveDate, today: NaiveDate) -> bool {
        match *self {
            Self::ExpiringSoon { horizon_days } => {
                expiry > today && expiry <= offset(today, horizon_days)
            }
            Self::Expired => expiry < today,
            Self::WithinWindow { days } => expiry <= offset(today, days),
        }
    }
}

fn offset(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// An item name paired with its stored expiry string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExpiringItem {
    #[schema(example = "milk")]
    pub name: String,
    #[schema(example = "2025-06-05")]
    pub expiry: String,
}
