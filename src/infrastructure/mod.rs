pub mod config;
pub mod linear;
pub mod state;
