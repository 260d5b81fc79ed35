use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_params, reply, screen};
use crate::ipc::types::{AppState, Request};
use crate::views::schools::{schools_view, SchoolQuery};

fn list_schools(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let query: SchoolQuery = parse_params(params)?;
    screen(schools_view(&state.store, &state.session, &query))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "schools.list" => Some(reply(&req.id, list_schools(state, &req.params))),
        _ => None,
    }
}
