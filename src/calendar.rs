// src/calendar.rs

use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Study and quiz only run Monday to Friday.
pub fn is_study_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
