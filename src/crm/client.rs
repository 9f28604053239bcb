use super::records::{ACCOUNT_FIELDS, ZohoAccount, ZohoAccountList};
use crate::config::ZohoConfig;
use crate::error::DashboardError;
use oauth2::AccessToken;
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{debug, info};
use url::Url;

/// Characters of an upstream error body kept in error messages and logs.
pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 500;

/// Read-only client for the CRM `Accounts` module.
///
/// One unpaginated request per call; no retry.
pub struct ZohoClient {
    client: reqwest::Client,
    accounts_url: Url,
    organization_id: Option<String>,
}

impl ZohoClient {
    pub fn new(cfg: &ZohoConfig, client: reqwest::Client) -> Self {
        let organization_id = Some(cfg.organization_id.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            client,
            accounts_url: cfg.accounts_url(),
            organization_id,
        }
    }

    pub fn build_accounts_request(
        &self,
        token: &AccessToken,
    ) -> Result<reqwest::Request, reqwest::Error> {
        let mut req = self
            .client
            .get(self.accounts_url.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Zoho-oauthtoken {}", token.secret()),
            )
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(&[("fields", ACCOUNT_FIELDS)]);

        if let Some(org) = self.organization_id.as_deref() {
            req = req.header("X-CRM-ORG", org);
        }
        req.build()
    }

    pub async fn fetch_accounts(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ZohoAccount>, DashboardError> {
        let start = Instant::now();
        let req = self.build_accounts_request(token)?;
        let resp = self.client.execute(req).await?;
        let status = resp.status();

        // Zoho answers 204 with an empty body when the module has no records.
        if status == StatusCode::NO_CONTENT {
            info!(took_ms = elapsed_ms(start), "CRM returned no accounts");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) => format!("{:.len$}", text, len = UPSTREAM_BODY_PREVIEW_CHARS),
                Err(e) => format!("<failed to read body: {e}>"),
            };
            debug!(%status, body = %body, "CRM accounts request failed");
            return Err(DashboardError::UpstreamStatus { status, body });
        }

        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        let list: ZohoAccountList = serde_json::from_slice(&bytes)?;
        let accounts = list.data.unwrap_or_default();

        info!(
            count = accounts.len(),
            took_ms = elapsed_ms(start),
            "Fetched accounts from CRM"
        );
        Ok(accounts)
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
