use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::landing))
        .route("/select", post(handlers::select))
        .route("/theme", post(handlers::toggle_theme))
        .route("/member/:id", get(handlers::dashboard))
        .route("/member/:id/tasks/:task_id", post(handlers::toggle_task))
        .route("/member/:id/checklist/collapse", post(handlers::toggle_collapse))
        .route("/api/members", get(handlers::list_members))
        .route(
            "/api/members/:id/checklist",
            get(handlers::get_checklist).post(handlers::post_checklist),
        )
        .with_state(state)
}
