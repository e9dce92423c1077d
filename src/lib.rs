pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod services;
pub mod store;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use response::ApiResponse;
