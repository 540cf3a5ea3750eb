use std::sync::Arc;

use crate::infrastructure::{config::Config, linear::LinearGateway};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub linear: Arc<dyn LinearGateway>,
}

impl AppState {
    pub fn new(config: Arc<Config>, linear: Arc<dyn LinearGateway>) -> Self {
        Self { config, linear }
    }
}
