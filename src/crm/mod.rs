//! Zoho CRM integration: OAuth code exchange and the `Accounts` fetch.

mod client;
mod oauth;
mod records;

pub use client::{UPSTREAM_BODY_PREVIEW_CHARS, ZohoClient};
pub use oauth::{ZohoOauth, ZohoTokenFields, ZohoTokenResponse};
pub use records::{ACCOUNT_FIELDS, ZohoAccount, ZohoAccountList};
