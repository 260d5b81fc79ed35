use super::error::{ok, HandlerErr};
use crate::access::AccessError;
use crate::views::Screen;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Missing or null params fall back to the type's default.
pub fn parse_params<T>(params: &serde_json::Value) -> Result<T, HandlerErr>
where
    T: DeserializeOwned + Default,
{
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params.clone()).map_err(|e| HandlerErr::bad_params(e.to_string()))
}

/// Denial renders as a notice; only a missing session becomes an error envelope.
pub fn screen<T: Serialize>(res: Result<T, AccessError>) -> Result<serde_json::Value, HandlerErr> {
    let screen = Screen::from_access(res)?;
    Ok(serde_json::to_value(screen)?)
}

pub fn reply(id: &str, res: Result<serde_json::Value, HandlerErr>) -> serde_json::Value {
    match res {
        Ok(result) => ok(id, result),
        Err(error) => error.response(id),
    }
}
