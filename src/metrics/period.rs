use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Lead status excluded from the historical aggregates.
pub const CLOSED_MERCHANT: &str = "Closed Merchant";

/// A calendar month, the bucket accounts are aggregated into by deal-signed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1-based.
    pub month: u32,
}

impl CalendarMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// `YYYY-MM`, matched as a prefix of the deal-signed date.
    pub fn date_prefix(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.date_prefix())
    }
}

/// One of the three aggregate windows shown on the dashboard.
///
/// The current month counts every lead status; the two historical windows drop
/// [`CLOSED_MERCHANT`] rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodQuery {
    CurrentMonth(CalendarMonth),
    PreviousMonth(CalendarMonth),
    PreviousYear(i32),
}

impl PeriodQuery {
    pub fn date_prefix(&self) -> String {
        match self {
            PeriodQuery::CurrentMonth(m) | PeriodQuery::PreviousMonth(m) => m.date_prefix(),
            PeriodQuery::PreviousYear(year) => format!("{year:04}"),
        }
    }

    pub fn excludes_closed_merchant(&self) -> bool {
        !matches!(self, PeriodQuery::CurrentMonth(_))
    }
}

/// The three windows relative to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardPeriods {
    pub current: PeriodQuery,
    pub last_month: PeriodQuery,
    pub last_year: PeriodQuery,
}

impl DashboardPeriods {
    pub fn for_date(today: NaiveDate) -> Self {
        let month = CalendarMonth::of(today);
        Self {
            current: PeriodQuery::CurrentMonth(month),
            last_month: PeriodQuery::PreviousMonth(month.previous()),
            last_year: PeriodQuery::PreviousYear(month.year - 1),
        }
    }
}
