use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_params, reply, screen};
use crate::ipc::types::{AppState, Request};
use crate::views::schedule::{schedule_view, ScheduleQuery};

fn list_schedule(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let query: ScheduleQuery = parse_params(params)?;
    screen(schedule_view(&state.store, &state.session, &query))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "schedule.list" => Some(reply(&req.id, list_schedule(state, &req.params))),
        _ => None,
    }
}
