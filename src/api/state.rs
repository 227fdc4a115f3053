use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::agents::backend::VisionBackend;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn VisionBackend>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(backend: Arc<dyn VisionBackend>) -> Self {
        Self {
            backend,
            started_at: Utc::now(),
        }
    }
}
