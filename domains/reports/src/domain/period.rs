//! Report periods
//!
//! A period is an inclusive date range, usually one calendar month.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use artmart_client::DateRange;

use crate::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportPeriod {
    /// The whole calendar month
    pub fn month(year: i32, month: u32) -> Result<Self, ReportError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ReportError::Period(format!("Invalid month: {}-{:02}", year, month)))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| ReportError::Period(format!("Month out of range: {}-{:02}", year, month)))?;
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM`
    pub fn parse_month(value: &str) -> Result<Self, ReportError> {
        let (year, month) = value
            .trim()
            .split_once('-')
            .ok_or_else(|| ReportError::Period(format!("Expected YYYY-MM, got {:?}", value)))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| ReportError::Period(format!("Invalid year in {:?}", value)))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| ReportError::Period(format!("Invalid month in {:?}", value)))?;
        Self::month(year, month)
    }

    /// Arbitrary inclusive range
    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if end < start {
            return Err(ReportError::Period(format!(
                "Period ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the period covers exactly one calendar month
    pub fn is_calendar_month(&self) -> bool {
        Self::month(self.start.year(), self.start.month())
            .map(|month| month == *self)
            .unwrap_or(false)
    }

    /// "October 2026", or "2026-10-01 to 2026-10-15" for other ranges
    pub fn label(&self) -> String {
        if self.is_calendar_month() {
            self.start.format("%B %Y").to_string()
        } else {
            format!(
                "{} to {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }

    /// Filename-safe form: "2026-10" or "2026-10-01_2026-10-15"
    pub fn slug(&self) -> String {
        if self.is_calendar_month() {
            self.start.format("%Y-%m").to_string()
        } else {
            format!(
                "{}_{}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}
