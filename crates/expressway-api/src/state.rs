use std::sync::Arc;

use expressway_core::ports::FeatureStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FeatureStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn FeatureStore>) -> Self {
        Self { store }
    }
}
