mod dashboard;
mod oauth;

pub use dashboard::{ApiErrorBody, DashboardError};
pub use oauth::OauthError;
