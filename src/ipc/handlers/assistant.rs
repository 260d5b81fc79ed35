use crate::access::{self, Capability};
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_params, reply};
use crate::ipc::types::{AppState, Request};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
struct SendParams {
    #[serde(default)]
    content: String,
}

fn history(state: &AppState) -> serde_json::Value {
    json!({
        "conversationId": state.conversation.id(),
        "messages": state.conversation.messages(),
        "busy": state.conversation.is_busy(),
    })
}

fn assistant_history(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    access::require(&state.session, Capability::UseAssistant)?;
    Ok(history(state))
}

fn assistant_send(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    access::require(&state.session, Capability::UseAssistant)?;
    let p: SendParams = parse_params(params)?;
    let answer = state
        .conversation
        .send(state.chat.as_ref(), &p.content)?
        .clone();
    Ok(json!({
        "reply": answer,
        "conversation": history(state),
    }))
}

fn assistant_reset(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    access::require(&state.session, Capability::UseAssistant)?;
    state.conversation.reset();
    Ok(history(state))
}

fn handle_history(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, assistant_history(state))
}

fn handle_send(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, assistant_send(state, &req.params))
}

fn handle_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    reply(&req.id, assistant_reset(state))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "assistant.history" => Some(handle_history(state, req)),
        "assistant.send" => Some(handle_send(state, req)),
        "assistant.reset" => Some(handle_reset(state, req)),
        _ => None,
    }
}
