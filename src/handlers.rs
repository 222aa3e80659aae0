use crate::engagement::EngagementController;
use crate::errors::AppError;
use crate::models::{
    ChecklistResponse, DashboardQuery, MemberSummary, SelectForm, TaskStatus, ThemeForm,
    ToggleForm, ToggleRequest,
};
use crate::prefs;
use crate::state::AppState;
use crate::storage::{persist_store, LocalStore};
use crate::team::TeamMember;
use crate::ui::{member_path, render_dashboard, render_landing, render_not_found, DashboardView};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use tracing::{debug, error, info};

pub async fn landing(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let resume = prefs::selected_user(&*store).and_then(|id| state.team.member(&id));
    Html(render_landing(&state.team, prefs::theme(&*store), resume))
}

pub async fn select(
    State(state): State<AppState>,
    Form(form): Form<SelectForm>,
) -> Result<Redirect, AppError> {
    let member = find_member(&state, &form.member_id)?;
    let mut store = state.store.lock().await;
    prefs::set_selected_user(&mut *store, &member.id);
    persist_store(&state.data_path, &store).await?;

    info!(member_id = %member.id, "selected team member");
    Ok(Redirect::to(&member_path(&member.id)))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let mut store = state.store.lock().await;
    let Some(member) = state.team.member(&id) else {
        debug!(member_id = %id, "dashboard requested for unknown member");
        let page = render_not_found(prefs::theme(&*store));
        return (StatusCode::NOT_FOUND, Html(page)).into_response();
    };

    prefs::set_selected_user(&mut *store, &member.id);
    let controller = open_controller(&state, &mut store, member);
    persist_or_log(&state, &store).await;

    let view = DashboardView {
        member,
        controller: &controller,
        new_week_notice: controller.show_new_week_notice() || query.is_new_week(),
        theme: prefs::theme(&*store),
        checklist_collapsed: prefs::checklist_collapsed(&*store),
        now: Utc::now(),
    };
    Html(render_dashboard(&view)).into_response()
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    let member = find_member(&state, &id)?;
    let mut store = state.store.lock().await;
    let mut controller = open_controller(&state, &mut store, member);
    controller.toggle(&mut *store, &task_id, form.is_done())?;
    persist_store(&state.data_path, &store).await?;

    // The rollover already happened here, so the dashboard would not see it on reopen.
    let notice = if controller.show_new_week_notice() { "?new_week=1" } else { "" };
    Ok(Redirect::to(&format!("{}{notice}#checklist", member_path(&member.id))))
}

pub async fn toggle_collapse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let member = find_member(&state, &id)?;
    let mut store = state.store.lock().await;
    let collapsed = !prefs::checklist_collapsed(&*store);
    prefs::set_checklist_collapsed(&mut *store, collapsed);
    persist_store(&state.data_path, &store).await?;

    Ok(Redirect::to(&format!("{}#checklist", member_path(&member.id))))
}

pub async fn toggle_theme(
    State(state): State<AppState>,
    Form(form): Form<ThemeForm>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    let theme = prefs::theme(&*store).toggled();
    prefs::set_theme(&mut *store, theme);
    persist_store(&state.data_path, &store).await?;

    Ok(Redirect::to(safe_next(form.next.as_deref())))
}

pub async fn list_members(State(state): State<AppState>) -> Json<Vec<MemberSummary>> {
    let members = state
        .team
        .team_members
        .iter()
        .map(|member| MemberSummary {
            id: member.id.clone(),
            name: member.name.clone(),
            role: member.role.clone(),
            avatar: member.avatar.clone(),
        })
        .collect();
    Json(members)
}

pub async fn get_checklist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChecklistResponse>, AppError> {
    let member = find_member(&state, &id)?;
    let mut store = state.store.lock().await;
    let controller = open_controller(&state, &mut store, member);
    persist_or_log(&state, &store).await;

    Ok(Json(to_response(&controller)))
}

pub async fn post_checklist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ChecklistResponse>, AppError> {
    let task_id = payload.task_id.trim();
    if task_id.is_empty() {
        return Err(AppError::bad_request("task_id must not be empty"));
    }

    let member = find_member(&state, &id)?;
    let mut store = state.store.lock().await;
    let mut controller = open_controller(&state, &mut store, member);
    controller.toggle(&mut *store, task_id, payload.done)?;
    persist_store(&state.data_path, &store).await?;

    Ok(Json(to_response(&controller)))
}

fn find_member<'a>(state: &'a AppState, id: &str) -> Result<&'a TeamMember, AppError> {
    state
        .team
        .member(id)
        .ok_or_else(|| AppError::not_found(format!("team member not found: {id}")))
}

fn open_controller(
    state: &AppState,
    store: &mut LocalStore,
    member: &TeamMember,
) -> EngagementController {
    let mut controller =
        EngagementController::new(member.id.clone(), state.team.engagement_checklist.clone());
    controller.open(store);
    controller
}

fn to_response(controller: &EngagementController) -> ChecklistResponse {
    let progress = controller.progress();
    ChecklistResponse {
        member_id: controller.user_id().to_string(),
        week_start: controller
            .week_start()
            .map(|at| at.to_rfc3339())
            .unwrap_or_default(),
        tasks: controller
            .tasks()
            .iter()
            .map(|task| TaskStatus {
                id: task.id.clone(),
                label: task.label.clone(),
                done: controller.is_done(&task.id),
            })
            .collect(),
        completed: progress.completed,
        total: progress.total,
        all_complete: progress.all_complete,
        new_week: controller.show_new_week_notice(),
    }
}

/// Views keep rendering from memory when the snapshot cannot be written.
async fn persist_or_log(state: &AppState, store: &LocalStore) {
    if let Err(err) = persist_store(&state.data_path, store).await {
        error!(path = %state.data_path.display(), "failed to persist state: {}", err.message);
    }
}

/// Only same-site absolute paths are followed after a theme switch.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_next_rejects_offsite_targets() {
        assert_eq!(safe_next(Some("/member/maya")), "/member/maya");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}
