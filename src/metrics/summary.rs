use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Count and summed monthly card volume for one aggregate window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PeriodTotals {
    pub account_count: i64,
    pub total_volume: f64,
}

/// Percentage change from `prior` to `current`.
///
/// Zero when `prior` is zero. That is a display convention, not "no change".
#[allow(clippy::float_cmp)]
pub fn percent_change(current: f64, prior: f64) -> f64 {
    if prior == 0.0 {
        0.0
    } else {
        (current - prior) / prior * 100.0
    }
}

/// One dashboard tile's numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary<T> {
    pub current: T,
    pub last_month: T,
    pub last_year: T,
    pub change: f64,
    pub year_change: f64,
}

impl<T: Copy + Into<f64>> MetricSummary<T> {
    pub fn new(current: T, last_month: T, last_year: T) -> Self {
        Self {
            current,
            last_month,
            last_year,
            change: percent_change(current.into(), last_month.into()),
            year_change: percent_change(current.into(), last_year.into()),
        }
    }
}

/// Body of `GET /api/dashboard-data`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub accounts: MetricSummary<AccountCount>,
    pub revenue: MetricSummary<f64>,
}

/// Account count as carried in JSON (an integer), convertible for percentage math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountCount(pub i64);

impl From<AccountCount> for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: AccountCount) -> Self {
        value.0 as f64
    }
}

impl DashboardData {
    pub fn from_totals(
        current: PeriodTotals,
        last_month: PeriodTotals,
        last_year: PeriodTotals,
    ) -> Self {
        Self {
            accounts: MetricSummary::new(
                AccountCount(current.account_count),
                AccountCount(last_month.account_count),
                AccountCount(last_year.account_count),
            ),
            revenue: MetricSummary::new(
                current.total_volume,
                last_month.total_volume,
                last_year.total_volume,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_is_zero_for_zero_prior() {
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(42.0, 0.0), 0.0);
        assert_eq!(percent_change(-3.5, 0.0), 0.0);
    }

    #[test]
    fn percent_change_matches_formula_exactly() {
        for (c, p) in [(12.0, 10.0), (5.0, 20.0), (1.0, 3.0), (250_000.5, 125_000.25)] {
            assert_eq!(percent_change(c, p), (c - p) / p * 100.0);
        }
        assert_eq!(percent_change(15.0, 10.0), 50.0);
        assert_eq!(percent_change(5.0, 10.0), -50.0);
    }

    #[test]
    fn dashboard_data_serializes_contract_shape() {
        let data = DashboardData::from_totals(
            PeriodTotals {
                account_count: 3,
                total_volume: 1500.0,
            },
            PeriodTotals::default(),
            PeriodTotals {
                account_count: 2,
                total_volume: 1000.0,
            },
        );

        let json = serde_json::to_value(data).expect("serializable");
        assert_eq!(json["accounts"]["current"], 3);
        assert_eq!(json["accounts"]["lastMonth"], 0);
        assert_eq!(json["accounts"]["lastYear"], 2);
        assert_eq!(json["accounts"]["change"], 0.0);
        assert_eq!(json["accounts"]["yearChange"], 50.0);
        assert_eq!(json["revenue"]["current"], 1500.0);
        assert_eq!(json["revenue"]["yearChange"], 50.0);
    }
}
