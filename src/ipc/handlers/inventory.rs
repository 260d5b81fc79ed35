use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_params, reply, screen};
use crate::ipc::types::{AppState, Request};
use crate::views::inventory::{inventory_view, InventoryQuery};

fn list_inventory(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let query: InventoryQuery = parse_params(params)?;
    screen(inventory_view(&state.store, &state.session, &query))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "inventory.list" => Some(reply(&req.id, list_inventory(state, &req.params))),
        _ => None,
    }
}
