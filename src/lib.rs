pub mod app;
pub mod client;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod device;
pub mod error;
pub mod event;
pub mod poller;
pub mod ui;
pub mod util;

pub use app::App;
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
