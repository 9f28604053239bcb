use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbAccount {
    pub id: i64,
    /// CRM record id; unique.
    pub zoho_id: String,
    pub account_name: String,
    pub deal_signed_date: String,
    pub monthly_card_volume: f64,
    pub lead_status: String,
    pub created_date: String,
    pub modified_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DbMonthlyMetric {
    #[serde(skip_serializing)]
    pub id: i64,
    pub year: i64,
    pub month: i64,
    pub account_count: i64,
    pub total_volume: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fetched CRM record, already coerced for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountCreate {
    pub zoho_id: String,
    pub account_name: String,
    pub deal_signed_date: String,
    pub monthly_card_volume: f64,
    pub lead_status: String,
    pub created_date: String,
    pub modified_date: String,
}
