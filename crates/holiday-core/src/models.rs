use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::flags::flag_or_fallback;

/// Glyph used when no flag can be derived for a country.
pub const FALLBACK_EMOJI: &str = "🎉";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_GLYPHS: [&str; 12] = [
    "❄️", "💝", "🌸", "🌷", "🌻", "☀️", "🏖️", "🌅", "🍂", "🎃", "🦃", "🎄",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub emoji: String,
}

impl Country {
    pub fn new(code: &str, name: &str, emoji: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
        }
    }

    /// Country whose emoji is derived from its code.
    pub fn from_code(code: &str, name: &str) -> Self {
        Self::new(code, name, &flag_or_fallback(code))
    }
}

/// One holiday as returned by the public holiday API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHoliday {
    pub date: NaiveDate,
    #[serde(default)]
    pub local_name: String,
    pub name: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub counties: Option<Vec<String>>,
    #[serde(default)]
    pub launch_year: Option<i32>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl RawHoliday {
    pub fn new(date: NaiveDate, name: &str) -> Self {
        Self {
            date,
            local_name: String::new(),
            name: name.to_string(),
            country_code: None,
            fixed: false,
            global: true,
            counties: None,
            launch_year: None,
            types: Vec::new(),
        }
    }

    pub fn is_weekday(&self) -> bool {
        !matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// A nationwide holiday that lands on a working day.
    pub fn is_day_off(&self) -> bool {
        self.global && self.is_weekday()
    }

    /// Local name when the API provides one, English name otherwise.
    pub fn display_name(&self) -> &str {
        if self.local_name.is_empty() {
            &self.name
        } else {
            &self.local_name
        }
    }
}

/// Which holidays count towards a country's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountRule {
    /// Every holiday the API returns.
    Raw,
    /// Only global holidays falling Monday to Friday.
    #[default]
    DaysOff,
}

impl CountRule {
    pub fn counts(&self, holiday: &RawHoliday) -> bool {
        match self {
            CountRule::Raw => true,
            CountRule::DaysOff => holiday.is_day_off(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountRule::Raw => "holidays",
            CountRule::DaysOff => "days off",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryHolidays {
    pub code: String,
    pub name: String,
    pub emoji: String,
    pub holiday_count: usize,
    pub holidays: Vec<RawHoliday>,
}

impl CountryHolidays {
    /// Score `holidays` for `country` under `rule`.
    pub fn new(country: Country, holidays: Vec<RawHoliday>, rule: CountRule) -> Self {
        let holiday_count = holidays.iter().filter(|h| rule.counts(h)).count();
        Self {
            code: country.code,
            name: country.name,
            emoji: country.emoji,
            holiday_count,
            holidays,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthStats {
    pub month: &'static str,
    pub count: usize,
    pub index: usize,
}

impl MonthStats {
    pub fn short_name(&self) -> &'static str {
        &self.month[..3]
    }

    pub fn glyph(&self) -> &'static str {
        MONTH_GLYPHS[self.index % 12]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingHoliday {
    pub date: NaiveDate,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub days_until: i64,
    pub emoji: String,
}

impl UpcomingHoliday {
    pub fn is_today(&self) -> bool {
        self.days_until == 0
    }

    pub fn days_label(&self) -> String {
        match self.days_until {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            n => format!("in {} days", n),
        }
    }
}
