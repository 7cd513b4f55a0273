//! Locale-dependent labels and number formatting shared by the report
//! shaping code and the dashboard renderer.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

const ES_MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];
const ES_MONTHS_LONG: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const EN_MONTHS_LONG: [&str; 12] = [
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

#[derive(Debug, thiserror::Error)]
#[error("unsupported locale '{0}'")]
pub struct UnknownLocale(String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "es-es" | "es-co" => Ok(Locale::Es),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

impl Locale {
    /// Abbreviated month name for a zero-based month index (0 = January).
    pub fn month_short(self, month0: u32) -> Option<&'static str> {
        let table = match self {
            Locale::Es => &ES_MONTHS_SHORT,
            Locale::En => &EN_MONTHS_SHORT,
        };
        table.get(month0 as usize).copied()
    }

    /// Full month name for a zero-based month index (0 = January).
    pub fn month_long(self, month0: u32) -> Option<&'static str> {
        let table = match self {
            Locale::Es => &ES_MONTHS_LONG,
            Locale::En => &EN_MONTHS_LONG,
        };
        table.get(month0 as usize).copied()
    }

    fn thousands_separator(self) -> char {
        match self {
            Locale::Es => '.',
            Locale::En => ',',
        }
    }

    /// Format a count with the locale's thousands separator.
    pub fn format_count(self, value: u64) -> String {
        let digits = value.to_string();
        let separator = self.thousands_separator();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(separator);
            }
            out.push(ch);
        }
        out
    }

    /// "ene 2025" style period label.
    pub fn period_label(self, year: i32, month0: u32) -> Option<String> {
        self.month_short(month0).map(|name| format!("{name} {year}"))
    }

    /// Short day label used on the daily chart axis ("5 ene" / "Jan 5").
    pub fn day_label(self, date: NaiveDate) -> String {
        let month = self.month_short(date.month0()).unwrap_or_default();
        match self {
            Locale::Es => format!("{} {}", date.day(), month),
            Locale::En => format!("{} {}", month, date.day()),
        }
    }

    /// Month name with the first letter capitalized ("Octubre").
    pub fn month_title(self, month0: u32) -> String {
        let name = self.month_long(month0).unwrap_or_default();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Twelve-hour clock, the way browsers print `toLocaleString` for
    /// es-CO and en-US.
    pub fn format_timestamp<Tz: TimeZone>(self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let (pm, _) = at.hour12();
        match self {
            Locale::Es => format!(
                "{} {}",
                at.format("%-d/%-m/%Y, %-I:%M:%S"),
                if pm { "p. m." } else { "a. m." }
            ),
            Locale::En => format!(
                "{} {}",
                at.format("%-m/%-d/%Y, %-I:%M:%S"),
                if pm { "PM" } else { "AM" }
            ),
        }
    }
}
