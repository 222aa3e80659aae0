pub mod app;
pub mod checklist;
pub mod config;
pub mod engagement;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod prefs;
pub mod state;
pub mod storage;
pub mod team;
pub mod ui;
pub mod week;

pub use app::router;
pub use config::Config;
pub use engagement::{reconcile, EngagementController};
pub use state::AppState;
pub use storage::{load_store, KeyValueStore, LocalStore};
pub use team::TeamData;
