//! # Catering HTTP Server Module
//!
//! Axum router over the repositories.
//!
//! # Endpoints
//!
//! - `/` - Welcome message
//! - `/health` - Health check
//! - `/companies` - Create and list companies
//! - `/employees` - Create and list employees
//! - `/meals` - Meal CRUD and `/meals/by_month/{year}/{month}`

pub mod company_routes;
pub mod config;
pub mod employee_routes;
pub mod errors;
pub mod extract;
pub mod health_routes;
pub mod meal_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{shutdown_signal, HttpServer};
pub use state::AppState;
