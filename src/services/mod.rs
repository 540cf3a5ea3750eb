pub mod errors;
pub mod journal;
pub mod monitor;
