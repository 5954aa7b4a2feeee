//! Weekly business-hours templates.
//!
//! A [`BusinessHours`] record is a passive lookup table: one optional
//! open/close pair per weekday, all interpreted in a single IANA timezone.
//! JSON payloads from the provider store go through [`BusinessHours::from_json`]
//! so that nothing loosely typed reaches slot generation.

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::Hhmm;
use crate::error::{Result, SlotError};
use crate::timezone::parse_timezone;

/// Opening hours for a single day, in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayHours {
    pub open: Hhmm,
    pub close: Hhmm,
}

impl DayHours {
    pub fn new(open: Hhmm, close: Hhmm) -> Self {
        Self { open, close }
    }

    /// Parse from `"HH:MM"` strings.
    pub fn parse(open: &str, close: &str) -> Result<Self> {
        Ok(Self {
            open: open.parse()?,
            close: close.parse()?,
        })
    }

    /// An entry is usable only when it opens strictly before it closes.
    pub fn is_valid(&self) -> bool {
        self.open < self.close
    }
}

/// A provider's weekly template. A missing day means closed.
///
/// Unknown keys such as `"Monday"` or `"mon"` are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusinessHours {
    /// IANA timezone governing every open/close time below.
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayHours>,
}

impl BusinessHours {
    /// A template in `timezone` with every day closed.
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
            sunday: None,
            monday: None,
            tuesday: None,
            wednesday: None,
            thursday: None,
            friday: None,
            saturday: None,
        }
    }

    /// Builder-style setter for one weekday.
    pub fn with_day(mut self, weekday: Weekday, hours: DayHours) -> Self {
        *self.entry_mut(weekday) = Some(hours);
        self
    }

    /// Parse and validate a JSON business-hours payload.
    ///
    /// Times must be canonical `HH:MM`, keys must be known field names, and
    /// the timezone must resolve. Days whose open time is not before their
    /// close time are kept as given but logged, and [`BusinessHours::day`]
    /// treats them as closed.
    ///
    /// # Errors
    ///
    /// [`SlotError::InvalidArgument`] for malformed JSON, unknown keys, or times,
    /// [`SlotError::InvalidTimeZone`] for an unknown timezone.
    pub fn from_json(json: &str) -> Result<Self> {
        let hours: BusinessHours = serde_json::from_str(json)
            .map_err(|e| SlotError::InvalidArgument(format!("business hours JSON: {}", e)))?;
        hours.tz()?;

        for weekday in WEEK {
            if let Some(entry) = hours.entry(weekday) {
                if !entry.is_valid() {
                    tracing::warn!(
                        ?weekday,
                        open = %entry.open,
                        close = %entry.close,
                        "open is not before close; day treated as closed"
                    );
                }
            }
        }

        Ok(hours)
    }

    /// Resolve [`BusinessHours::timezone`].
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// The raw entry for `weekday`, valid or not.
    pub fn entry(&self, weekday: Weekday) -> Option<&DayHours> {
        match weekday {
            Weekday::Sun => self.sunday.as_ref(),
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
        }
    }

    /// The usable hours for `weekday`: `None` if closed or if open >= close.
    pub fn day(&self, weekday: Weekday) -> Option<&DayHours> {
        self.entry(weekday).filter(|hours| hours.is_valid())
    }

    fn entry_mut(&mut self, weekday: Weekday) -> &mut Option<DayHours> {
        match weekday {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        }
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];
