//! Per-screen view models.
//!
//! A view function takes the store, the caller's session and the screen's
//! local filters, and returns everything the screen renders. Role scoping
//! always comes from `access`; views only add their own filters on top.

pub mod dashboard;
pub mod finance;
pub mod inventory;
pub mod schedule;
pub mod schools;
pub mod staff;
pub mod students;
pub mod teacher_area;
pub mod teachers;

use crate::access::AccessError;
use serde::Serialize;

/// What a screen shows: its content, or the access-denied notice in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "access", rename_all = "lowercase")]
pub enum Screen<T> {
    Granted(T),
    Denied { notice: String },
}

impl<T> Screen<T> {
    /// Denial becomes a rendered notice; a missing session stays an error.
    pub fn from_access(res: Result<T, AccessError>) -> Result<Screen<T>, AccessError> {
        match res {
            Ok(v) => Ok(Screen::Granted(v)),
            Err(AccessError::Denied(cap)) => Ok(Screen::Denied {
                notice: cap.denial_notice().to_string(),
            }),
            Err(e) => Err(e),
        }
    }
}

/// `Some(notice)` when a filtered list came back empty.
pub fn empty_notice<T>(rows: &[T], notice: &'static str) -> Option<&'static str> {
    rows.is_empty().then_some(notice)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}
