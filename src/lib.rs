//! Linear automation service for the trading desk.

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod telemetry;
