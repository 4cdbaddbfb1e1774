//! Date and label rendering for the view models.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::time::shift_month;
use crate::domain::TransactionType;
use crate::errors::TogetherError;

/// Cells in a six-week month view.
pub const CALENDAR_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Ko
    }
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Ko => "ko-KR",
            Locale::En => "en-US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = TogetherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let language = value
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "ko" => Ok(Locale::Ko),
            "en" => Ok(Locale::En),
            _ => Err(TogetherError::InvalidInput(format!(
                "unsupported locale `{value}`"
            ))),
        }
    }
}

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short month name: `"2월"` or `"Feb"`.
pub fn month_label(month: u32, locale: Locale) -> String {
    match locale {
        Locale::Ko => format!("{month}월"),
        Locale::En => EN_MONTHS
            .get(month.saturating_sub(1) as usize)
            .map(|name| name.to_string())
            .unwrap_or_else(|| month.to_string()),
    }
}

pub fn weekday_name(weekday: Weekday, locale: Locale) -> &'static str {
    match locale {
        Locale::Ko => match weekday {
            Weekday::Sun => "일요일",
            Weekday::Mon => "월요일",
            Weekday::Tue => "화요일",
            Weekday::Wed => "수요일",
            Weekday::Thu => "목요일",
            Weekday::Fri => "금요일",
            Weekday::Sat => "토요일",
        },
        Locale::En => match weekday {
            Weekday::Sun => "Sunday",
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
        },
    }
}

pub fn type_label(kind: TransactionType, locale: Locale) -> &'static str {
    match (locale, kind) {
        (Locale::Ko, TransactionType::Expense) => "지출",
        (Locale::Ko, TransactionType::Income) => "수입",
        (Locale::Ko, TransactionType::Savings) => "저축",
        (Locale::Ko, TransactionType::Investment) => "투자",
        (Locale::En, TransactionType::Expense) => "Expense",
        (Locale::En, TransactionType::Income) => "Income",
        (Locale::En, TransactionType::Savings) => "Savings",
        (Locale::En, TransactionType::Investment) => "Investment",
    }
}

/// `"2월 10일"` or `"Feb 10"`.
pub fn month_day(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Ko => format!("{}월 {}일", date.month(), date.day()),
        Locale::En => format!("{} {}", month_label(date.month(), locale), date.day()),
    }
}

/// Recent dates read as today / yesterday / N days ago; anything a week or
/// more old, or in the future, falls back to the month and day.
pub fn relative_date_label(date: NaiveDate, today: NaiveDate, locale: Locale) -> String {
    let days = (today - date).num_days();
    match (days, locale) {
        (0, Locale::Ko) => "오늘".into(),
        (0, Locale::En) => "Today".into(),
        (1, Locale::Ko) => "어제".into(),
        (1, Locale::En) => "Yesterday".into(),
        (2..=6, Locale::Ko) => format!("{days}일 전"),
        (2..=6, Locale::En) => format!("{days} days ago"),
        _ => month_day(date, locale),
    }
}

/// History section header: `"2월 10일 화요일"` or `"Tuesday, Feb 10"`.
pub fn day_header(date: NaiveDate, locale: Locale) -> String {
    let weekday = weekday_name(date.weekday(), locale);
    match locale {
        Locale::Ko => format!("{} {}", month_day(date, locale), weekday),
        Locale::En => format!("{}, {}", weekday, month_day(date, locale)),
    }
}

/// `"+12.5%"`, `"-11.2%"`, `"0.0%"`, or `"-"` when there is no baseline.
pub fn percent_change_label(change: Option<f64>) -> String {
    match change {
        Some(value) if value > 0.0 => format!("+{value:.1}%"),
        Some(value) if value == 0.0 => "0.0%".into(),
        Some(value) => format!("{value:.1}%"),
        None => "-".into(),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MonthPosition {
    Previous,
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub position: MonthPosition,
}

/// Six Sunday-first weeks covering `month`, padded with the neighbouring months.
pub fn calendar_grid(year: i32, month: u32) -> Result<Vec<CalendarCell>, TogetherError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TogetherError::InvalidInput(format!("invalid month {year}-{month}")))?;
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells = Vec::with_capacity(CALENDAR_CELLS);
    let grid_start = first - chrono::Duration::days(leading as i64);
    for date in grid_start.iter_days().take(CALENDAR_CELLS) {
        let position = if date < first {
            MonthPosition::Previous
        } else if date >= shift_month(first, 1) {
            MonthPosition::Next
        } else {
            MonthPosition::Current
        };
        cells.push(CalendarCell { date, position });
    }
    Ok(cells)
}
