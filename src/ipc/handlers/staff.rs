use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_params, reply, screen};
use crate::ipc::types::{AppState, Request};
use crate::views::staff::{staff_view, StaffQuery};
use crate::views::teachers::{teachers_view, TeacherQuery};

fn list_teachers(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let query: TeacherQuery = parse_params(params)?;
    screen(teachers_view(&state.store, &state.session, &query))
}

fn list_staff(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let query: StaffQuery = parse_params(params)?;
    screen(staff_view(&state.store, &state.session, &query))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teachers.list" => Some(reply(&req.id, list_teachers(state, &req.params))),
        "staff.list" => Some(reply(&req.id, list_staff(state, &req.params))),
        _ => None,
    }
}
