pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod render;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::Config;
pub use render::{Dashboard, RenderPort};
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage};
pub use tracker::Tracker;
