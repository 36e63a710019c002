use crate::render::Dashboard;
use crate::storage::FileStore;
use crate::tracker::Tracker;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type WebTracker = Tracker<FileStore, Dashboard>;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<WebTracker>>,
}

impl AppState {
    pub fn new(tracker: WebTracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }
}
