//! Shared domain types.
//!
//! These types are intentionally small and copyable so they can be passed
//! between the fetch, transform, and presentation stages without ceremony.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Constant subtracted from every retained date key before plotting.
///
/// `20210101 - KEY_SHIFT = 210101`, which keeps the labels short on the x axis.
pub const KEY_SHIFT: i64 = 20_000_000;

/// Lower bound used when no start date is given.
pub const DEFAULT_MIN: i64 = 0;

/// Upper bound used when no end date is given.
pub const DEFAULT_MAX: i64 = 22_000_000;

/// An 8-digit `yyyymmdd` date key.
///
/// Ordering on the numeric value is identical to lexicographic ordering of the
/// fixed-width strings, so a `BTreeMap<DateKey, _>` is chronologically sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(u32);

impl DateKey {
    pub const WIDTH: usize = 8;

    pub fn new(raw: u32) -> Result<Self, AppError> {
        if raw > 99_999_999 {
            return Err(AppError::InvalidDateKey(raw.to_string()));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Key with [`KEY_SHIFT`] removed.
    pub fn shifted(self) -> i64 {
        i64::from(self.0) - KEY_SHIFT
    }

    /// Calendar date, when the key names a real day.
    pub fn as_date(self) -> Option<NaiveDate> {
        let (year, month, day) = (self.0 / 10_000, self.0 / 100 % 100, self.0 % 100);
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
    }
}

impl FromStr for DateKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // No trimming: padded spellings would collapse onto the same key.
        if s.len() != Self::WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::InvalidDateKey(s.to_string()));
        }
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| AppError::InvalidDateKey(s.to_string()))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

/// Per-date count as delivered by the download endpoints.
pub type Count = i64;

/// How values are presented on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Per-date count, unmodified.
    #[value(name = "daily", alias = "0")]
    DailyIncrease,
    /// Running total of counts up to and including each date.
    #[value(name = "accumulation", alias = "1")]
    Accumulation,
}

impl Mode {
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::DailyIncrease => "Daily increase",
            Mode::Accumulation => "Accumulation",
        }
    }

    /// Numeric selector used by the interactive prompt (`0`/`1`).
    pub fn from_selector(value: u8) -> Option<Self> {
        match value {
            0 => Some(Mode::DailyIncrease),
            1 => Some(Mode::Accumulation),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::DailyIncrease => Mode::Accumulation,
            Mode::Accumulation => Mode::DailyIncrease,
        }
    }
}

/// Exclusive `(min, max)` bounds on raw date keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub min: i64,
    pub max: i64,
}

impl DateWindow {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// `min < key < max`; both ends are excluded.
    pub fn contains(&self, key: DateKey) -> bool {
        let k = i64::from(key.get());
        self.min < k && k < self.max
    }

    /// True when no integer key can satisfy [`DateWindow::contains`].
    pub fn is_empty(&self) -> bool {
        self.max.saturating_sub(self.min) <= 1
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::new(DEFAULT_MIN, DEFAULT_MAX)
    }
}

/// A single plotted pair: shifted key label and (possibly accumulated) value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Count,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: Count) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Which download endpoint(s) to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Registered users per day.
    User,
    /// Tournament, bracket, and their log/archive tables, merged.
    Tournament,
    /// Explicit endpoint URLs.
    Urls(Vec<String>),
}

impl Source {
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::User => "user",
            Source::Tournament => "tournament",
            Source::Urls(_) => "custom",
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub source: Source,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub input: Option<PathBuf>,
    pub window: DateWindow,
    pub mode: Mode,
    pub save_raw: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub export_svg: Option<PathBuf>,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            source: Source::User,
            base_url: None,
            timeout_secs: 30,
            input: None,
            window: DateWindow::default(),
            mode: Mode::DailyIncrease,
            save_raw: None,
            export_csv: None,
            export_svg: None,
            plot_width: 80,
            plot_height: 20,
        }
    }
}

/// Chart title: date range on the first line, mode on the second.
pub fn chart_title(window: &DateWindow, mode: Mode) -> String {
    format!(
        "Duration : {} - {}\nMode : {}",
        window.min,
        window.max,
        mode.display_name()
    )
}
