use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_params, reply};
use crate::ipc::types::{AppState, Request};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
struct LoginParams {
    email: Option<String>,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectSchoolParams {
    /// Null or empty restores the network-wide view.
    school_id: Option<String>,
}

fn me(state: &AppState) -> serde_json::Value {
    json!({
        "user": state.session.user(),
        "selectedSchool": state.session.selected_school(),
    })
}

fn session_login(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let p: LoginParams = parse_params(params)?;
    let Some(email) = p.email else {
        return Err(HandlerErr::bad_params("missing email"));
    };
    state.session.login(&state.store, &email, &p.password)?;
    state.conversation.reset();
    Ok(me(state))
}

fn session_select_school(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let p: SelectSchoolParams = parse_params(params)?;
    let school_id = p.school_id.as_deref().filter(|s| !s.trim().is_empty());
    state.session.set_selected_school(&state.store, school_id)?;
    Ok(me(state))
}

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, session_login(state, &req.params))
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.session.logout();
    state.conversation.reset();
    reply(&req.id, Ok(me(state)))
}

fn handle_me(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, Ok(me(state)))
}

fn handle_select_school(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, session_select_school(state, &req.params))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.login" => Some(handle_login(state, req)),
        "session.logout" => Some(handle_logout(state, req)),
        "session.me" => Some(handle_me(state, req)),
        "session.selectSchool" => Some(handle_select_school(state, req)),
        _ => None,
    }
}
