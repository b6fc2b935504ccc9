//! Historic data query parameters accepted by the market API.

use std::fmt;
use std::str::FromStr;

use super::AppError;

/// Spacing between historic data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    OneDay,
    OneWeek,
    OneMonth,
}

impl Interval {
    pub const ALL: [Interval; 6] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::OneDay,
        Interval::OneWeek,
        Interval::OneMonth,
    ];

    const EXPECTED: &'static str = "1m, 5m, 15m, 1d, 1wk, 1mo";

    /// Wire token used by the market API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::OneDay => "1d",
            Interval::OneWeek => "1wk",
            Interval::OneMonth => "1mo",
        }
    }
}

impl FromStr for Interval {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Interval::ALL.into_iter().find(|interval| interval.as_str() == token).ok_or_else(|| {
            AppError::InvalidQuery { kind: "interval", value: s.to_string(), expected: Self::EXPECTED }
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time span covered by a historic data query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
    Max,
}

impl HistoryRange {
    pub const ALL: [HistoryRange; 8] = [
        HistoryRange::OneDay,
        HistoryRange::FiveDays,
        HistoryRange::OneMonth,
        HistoryRange::ThreeMonths,
        HistoryRange::SixMonths,
        HistoryRange::OneYear,
        HistoryRange::FiveYears,
        HistoryRange::Max,
    ];

    const EXPECTED: &'static str = "1d, 5d, 1mo, 3mo, 6mo, 1y, 5y, max";

    /// Wire token used by the market API.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneDay => "1d",
            HistoryRange::FiveDays => "5d",
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
            HistoryRange::FiveYears => "5y",
            HistoryRange::Max => "max",
        }
    }
}

impl FromStr for HistoryRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        HistoryRange::ALL.into_iter().find(|range| range.as_str() == token).ok_or_else(|| {
            AppError::InvalidQuery { kind: "range", value: s.to_string(), expected: Self::EXPECTED }
        })
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
