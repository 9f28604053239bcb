pub mod config;
pub mod crm;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod metrics;
pub mod server;
pub mod session;
pub mod sync;
pub mod utils;

pub use error::DashboardError;
pub use session::Session;
