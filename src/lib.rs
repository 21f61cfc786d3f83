//! catering - record-management API for a catering business
//!
//! Companies, their employees and the meals served to them, kept in a
//! document store and exposed over HTTP.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod repository;
pub mod schema;
pub mod storage;
