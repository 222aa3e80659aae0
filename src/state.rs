use crate::storage::LocalStore;
use crate::team::TeamData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<LocalStore>>,
    pub team: Arc<TeamData>,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: LocalStore, team: TeamData) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(store)),
            team: Arc::new(team),
        }
    }
}
