use crate::db::AccountCreate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Fields requested from the `Accounts` module.
pub const ACCOUNT_FIELDS: &str =
    "id,Account_Name,Deal_Signed,Monthly_Card_Volume,Lead_Status,Created_Time,Modified_Time";

/// `GET /Accounts` body. `data` is absent when the module has no records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZohoAccountList {
    #[serde(default)]
    pub data: Option<Vec<ZohoAccount>>,
}

/// One CRM account as returned by the REST API, with missing or odd fields already coerced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ZohoAccount {
    #[serde(default, deserialize_with = "lax_text")]
    pub id: String,

    #[serde(rename = "Account_Name", default, deserialize_with = "lax_text")]
    pub account_name: String,

    #[serde(rename = "Deal_Signed", default, deserialize_with = "lax_text")]
    pub deal_signed: String,

    #[serde(rename = "Monthly_Card_Volume", default, deserialize_with = "lax_number")]
    pub monthly_card_volume: f64,

    #[serde(rename = "Lead_Status", default, deserialize_with = "lax_text")]
    pub lead_status: String,

    #[serde(rename = "Created_Time", default, deserialize_with = "lax_text")]
    pub created_time: String,

    #[serde(rename = "Modified_Time", default, deserialize_with = "lax_text")]
    pub modified_time: String,
}

impl From<ZohoAccount> for AccountCreate {
    fn from(a: ZohoAccount) -> Self {
        Self {
            zoho_id: a.id,
            account_name: a.account_name,
            deal_signed_date: a.deal_signed,
            monthly_card_volume: a.monthly_card_volume,
            lead_status: a.lead_status,
            created_date: a.created_time,
            modified_date: a.modified_time,
        }
    }
}

/// Strings pass through, scalars are stringified, anything else becomes `""`.
fn lax_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Numbers pass through, strings are parsed by their numeric prefix, anything else is `0`.
fn lax_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_numeric_prefix(&s),
        _ => 0.0,
    })
}

/// Parses the longest leading numeric prefix (`"1250.5 USD"` -> `1250.5`); `0` when none.
pub(crate) fn parse_numeric_prefix(raw: &str) -> f64 {
    let s = raw.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .map_or(s.len(), |(idx, _)| idx);
    let candidate = &s[..end];

    (1..=candidate.len())
        .rev()
        .filter_map(|len| candidate[..len].parse::<f64>().ok())
        .find(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_coerce_to_defaults() {
        let list: ZohoAccountList = serde_json::from_value(json!({
            "data": [
                { "id": "4876876000000624001" },
                {
                    "id": 4876876000000624002_u64,
                    "Account_Name": "Acme Coffee",
                    "Deal_Signed": "2026-10-03",
                    "Monthly_Card_Volume": 12500.75,
                    "Lead_Status": "Closed Merchant",
                    "Created_Time": "2026-09-30T10:00:00-05:00",
                    "Modified_Time": null
                }
            ],
            "info": { "per_page": 200, "more_records": false }
        }))
        .expect("account list should deserialize");

        let data = list.data.expect("data present");
        assert_eq!(data.len(), 2);

        let bare = AccountCreate::from(data[0].clone());
        assert_eq!(bare.zoho_id, "4876876000000624001");
        assert_eq!(bare.account_name, "");
        assert_eq!(bare.deal_signed_date, "");
        assert_eq!(bare.monthly_card_volume, 0.0);
        assert_eq!(bare.lead_status, "");

        let full = AccountCreate::from(data[1].clone());
        assert_eq!(full.zoho_id, "4876876000000624002");
        assert_eq!(full.account_name, "Acme Coffee");
        assert_eq!(full.monthly_card_volume, 12500.75);
        assert_eq!(full.lead_status, "Closed Merchant");
        assert_eq!(full.modified_date, "");
    }

    #[test]
    fn absent_data_means_no_records() {
        let list: ZohoAccountList = serde_json::from_value(json!({})).expect("empty object");
        assert!(list.data.unwrap_or_default().is_empty());
    }

    #[test]
    fn string_volumes_use_numeric_prefix() {
        assert_eq!(parse_numeric_prefix("1250.5"), 1250.5);
        assert_eq!(parse_numeric_prefix("  42 USD"), 42.0);
        assert_eq!(parse_numeric_prefix("1,234"), 1.0);
        assert_eq!(parse_numeric_prefix("-3e2x"), -300.0);
        assert_eq!(parse_numeric_prefix("12e"), 12.0);
        assert_eq!(parse_numeric_prefix("n/a"), 0.0);
        assert_eq!(parse_numeric_prefix(""), 0.0);

        let a: ZohoAccount = serde_json::from_value(json!({
            "id": "1",
            "Monthly_Card_Volume": "900.25"
        }))
        .expect("account should deserialize");
        assert_eq!(a.monthly_card_volume, 900.25);

        let a: ZohoAccount = serde_json::from_value(json!({
            "id": "2",
            "Monthly_Card_Volume": { "amount": 5 }
        }))
        .expect("account should deserialize");
        assert_eq!(a.monthly_card_volume, 0.0);
    }
}
