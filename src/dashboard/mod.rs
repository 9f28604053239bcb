//! Server-side tile model for the dashboard shell: formatted values, progress rings and
//! trend arrows derived from [`crate::metrics::DashboardData`].

mod format;
mod tiles;

pub use format::{compact_revenue, currency, group_thousands, signed_currency, signed_percent};
pub use tiles::{
    ACCOUNTS_GOAL, ChangeIndicator, DashboardTiles, ProgressRing, REVENUE_GOAL, RING_RADIUS, Tile, TrendDirection,
    TrendIndicator, ring_circumference,
};
