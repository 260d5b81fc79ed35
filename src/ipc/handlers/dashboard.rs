use crate::ipc::helpers::{reply, screen};
use crate::ipc::types::{AppState, Request};
use crate::views::dashboard::dashboard_view;
use crate::views::teacher_area::teacher_area_view;

fn handle_dashboard_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, screen(dashboard_view(&state.store, &state.session)))
}

fn handle_teacher_area_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, screen(teacher_area_view(&state.store, &state.session)))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.stats" => Some(handle_dashboard_stats(state, req)),
        "teacherArea.open" => Some(handle_teacher_area_open(state, req)),
        _ => None,
    }
}
