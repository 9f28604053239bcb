use super::format;
use crate::metrics::{AccountCount, DashboardData, MetricSummary};
use serde::Serialize;
use std::f64::consts::PI;

pub const ACCOUNTS_GOAL: f64 = 50.0;
pub const REVENUE_GOAL: f64 = 1_000_000.0;

/// Radius of the SVG progress circle in the dashboard shell.
pub const RING_RADIUS: f64 = 35.0;

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Stroke state of a circular progress ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRing {
    /// `current / goal * 100`, not clamped.
    pub percentage: f64,
    /// `stroke-dashoffset`; the fill is clamped at 100%.
    pub offset: f64,
    pub circumference: f64,
    pub label: String,
    pub percent_label: String,
}

impl ProgressRing {
    pub fn new(current: f64, goal: f64, label: String) -> Self {
        let percentage = current / goal * 100.0;
        let circumference = ring_circumference();
        let offset = circumference * (1.0 - percentage.min(100.0) / 100.0);
        Self {
            percentage,
            offset,
            circumference,
            label,
            percent_label: format!("{percentage:.0}%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Positive,
    Negative,
    Flat,
}

impl TrendDirection {
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            TrendDirection::Positive
        } else if change < 0.0 {
            TrendDirection::Negative
        } else {
            TrendDirection::Flat
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TrendDirection::Positive => "↗",
            TrendDirection::Negative => "↘",
            TrendDirection::Flat => "→",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            TrendDirection::Positive => "comparison-trend positive",
            TrendDirection::Negative => "comparison-trend negative",
            TrendDirection::Flat => "comparison-trend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendIndicator {
    pub direction: TrendDirection,
    pub icon: &'static str,
    pub css_class: &'static str,
    pub text: String,
}

impl TrendIndicator {
    pub fn new(change: f64) -> Self {
        let direction = TrendDirection::of(change);
        Self {
            direction,
            icon: direction.icon(),
            css_class: direction.css_class(),
            text: format::signed_percent(change),
        }
    }
}

/// Headline month-over-month change under the big number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeIndicator {
    /// `"+5.7%"` for counts, `"+$7,000"` for revenue.
    pub value: String,
    /// Always the percentage, parenthesised: `"(+5.7%)"`.
    pub percent: String,
    pub css_class: &'static str,
}

impl ChangeIndicator {
    pub fn percentage(change: f64) -> Self {
        Self::with_value(format::signed_percent(change), change)
    }

    pub fn currency(delta: f64, change: f64) -> Self {
        Self::with_value(format::signed_currency(delta), change)
    }

    fn with_value(value: String, change: f64) -> Self {
        let css_class = match TrendDirection::of(change) {
            TrendDirection::Positive => "metric-change positive",
            TrendDirection::Negative => "metric-change negative",
            TrendDirection::Flat => "metric-change",
        };
        Self {
            value,
            percent: format!("({})", format::signed_percent(change)),
            css_class,
        }
    }
}

/// Everything one metric card shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub value: String,
    pub last_month: String,
    pub last_year: String,
    pub ring: ProgressRing,
    pub change: ChangeIndicator,
    pub month_trend: TrendIndicator,
    pub year_trend: TrendIndicator,
}

/// Body of `GET /api/dashboard-tiles`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardTiles {
    pub accounts: Tile,
    pub revenue: Tile,
}

impl DashboardTiles {
    pub fn from_data(data: &DashboardData) -> Self {
        Self {
            accounts: accounts_tile(&data.accounts),
            revenue: revenue_tile(&data.revenue),
        }
    }
}

fn accounts_tile(m: &MetricSummary<AccountCount>) -> Tile {
    let current = f64::from(m.current);
    Tile {
        value: format::group_thousands(m.current.0),
        last_month: format::group_thousands(m.last_month.0),
        last_year: format::group_thousands(m.last_year.0),
        ring: ProgressRing::new(current, ACCOUNTS_GOAL, m.current.0.to_string()),
        change: ChangeIndicator::percentage(m.change),
        month_trend: TrendIndicator::new(m.change),
        year_trend: TrendIndicator::new(m.year_change),
    }
}

fn revenue_tile(m: &MetricSummary<f64>) -> Tile {
    Tile {
        value: format::currency(m.current),
        last_month: format::currency(m.last_month),
        last_year: format::currency(m.last_year),
        ring: ProgressRing::new(m.current, REVENUE_GOAL, format::compact_revenue(m.current)),
        change: ChangeIndicator::currency(m.current - m.last_month, m.change),
        month_trend: TrendIndicator::new(m.change),
        year_trend: TrendIndicator::new(m.year_change),
    }
}
