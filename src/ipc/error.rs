use crate::access::AccessError;
use crate::assistant::AssistantError;
use crate::session::{LoginError, ScopeError};
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

#[derive(Debug)]
pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_params(message: impl Into<String>) -> Self {
        Self::new("bad_params", message)
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<AccessError> for HandlerErr {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => HandlerErr::new("unauthenticated", "sign in first"),
            AccessError::Denied(cap) => HandlerErr {
                code: "forbidden",
                message: e.to_string(),
                details: Some(json!({ "capability": cap })),
            },
        }
    }
}

impl From<LoginError> for HandlerErr {
    fn from(e: LoginError) -> Self {
        HandlerErr::new("invalid_credentials", e.to_string())
    }
}

impl From<ScopeError> for HandlerErr {
    fn from(e: ScopeError) -> Self {
        let code = match &e {
            ScopeError::Unauthenticated => "unauthenticated",
            ScopeError::NotSecretary => "forbidden",
            ScopeError::UnknownSchool(_) => "not_found",
        };
        HandlerErr::new(code, e.to_string())
    }
}

impl From<AssistantError> for HandlerErr {
    fn from(e: AssistantError) -> Self {
        let code = match &e {
            AssistantError::EmptyMessage => "bad_params",
            AssistantError::Busy => "assistant_busy",
            _ => "internal",
        };
        HandlerErr::new(code, e.to_string())
    }
}

impl From<serde_json::Error> for HandlerErr {
    fn from(e: serde_json::Error) -> Self {
        HandlerErr::new("internal", e.to_string())
    }
}
