use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_params, reply, screen};
use crate::ipc::types::{AppState, Request};
use crate::views::finance::{finance_view, FinanceQuery};

fn list_finance(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let query: FinanceQuery = parse_params(params)?;
    screen(finance_view(&state.store, &state.session, &query))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "finance.list" => Some(reply(&req.id, list_finance(state, &req.params))),
        _ => None,
    }
}
