use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::reply;
use crate::ipc::types::{AppState, Request};
use crate::navigation;
use serde_json::json;

fn resolve(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let path = params
        .get("path")
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::bad_params("missing path"))?;
    Ok(serde_json::to_value(navigation::resolve(path, &state.session))?)
}

fn handle_menu(state: &mut AppState, req: &Request) -> serde_json::Value {
    let menu = navigation::menu(&state.store, &state.session);
    reply(&req.id, serde_json::to_value(menu).map_err(HandlerErr::from))
}

fn handle_modules(state: &mut AppState, req: &Request) -> serde_json::Value {
    let modules = navigation::modules(&state.session);
    reply(&req.id, Ok(json!({ "modules": modules })))
}

fn handle_resolve(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, resolve(state, &req.params))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "navigation.menu" => Some(handle_menu(state, req)),
        "navigation.modules" => Some(handle_modules(state, req)),
        "navigation.resolve" => Some(handle_resolve(state, req)),
        _ => None,
    }
}
