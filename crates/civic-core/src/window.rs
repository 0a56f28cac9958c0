//! Trailing time windows used by the inquiry filters and dashboard counters.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Months, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
  #[default]
  All,
  /// Since midnight UTC of the current day.
  Today,
  /// The trailing seven days.
  Week,
  /// The trailing calendar month.
  Month,
}

impl TimeWindow {
  pub const ALL: [TimeWindow; 4] = [Self::All, Self::Today, Self::Week, Self::Month];

  /// Earliest `created_at` still inside the window, or `None` for [`All`](Self::All).
  pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match self {
      Self::All => None,
      Self::Today => Some(now.date_naive().and_time(NaiveTime::MIN).and_utc()),
      Self::Week => Some(now - TimeDelta::days(7)),
      // Clamps to the end of a shorter month (Mar 31 → Feb 28/29).
      Self::Month => Some(now.checked_sub_months(Months::new(1)).unwrap_or(now)),
    }
  }

  /// Whether `created_at` falls inside the window. The cutoff itself is
  /// inside.
  pub fn contains(self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    self.cutoff(now).is_none_or(|cutoff| created_at >= cutoff)
  }

  /// Query-string value.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::All => "all",
      Self::Today => "today",
      Self::Week => "week",
      Self::Month => "month",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::All => "All Time",
      Self::Today => "Today",
      Self::Week => "This Week",
      Self::Month => "This Month",
    }
  }
}

impl fmt::Display for TimeWindow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for TimeWindow {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "" | "all" => Ok(Self::All),
      "today" => Ok(Self::Today),
      "week" => Ok(Self::Week),
      "month" => Ok(Self::Month),
      _ => Err(Error::UnknownWindow(s.to_owned())),
    }
  }
}
