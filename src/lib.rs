pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use config::AppConfig;
pub use error::{MartError, Result};
pub use models::{Product, WeeklyPlan};
