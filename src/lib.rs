pub mod app;
pub mod auth;
pub mod blog;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod memory;
pub mod portfolio;
pub mod state;
pub mod telemetry;
