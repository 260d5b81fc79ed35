//! Role capabilities and record visibility.
//!
//! Every screen asks this module two questions: may the signed-in role open
//! the screen at all ([`require`]), and which records of a collection may it
//! see (the per-collection scope functions). Nothing else in the crate looks
//! at `Role` to decide visibility.
//!
//! School scoping is expressed once, as [`SchoolScope`]. A secretary sees the
//! whole network unless a school is selected; directors and teachers are
//! pinned to their affiliated schools. Records tied to several schools
//! (staff) are admitted when any of their schools is admitted; records tied
//! to one school are the one-element case of the same rule.

use crate::model::{Classroom, FinancialRecord, InventoryItem, Role, Schedule, School, Student, User};
use crate::session::Session;
use crate::store::EntityStore;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    ViewDashboard,
    SwitchSchoolScope,
    ViewStudents,
    ViewTeachers,
    ViewStaff,
    ViewSchedules,
    ViewInventory,
    ViewFinance,
    ViewSchools,
    ViewTeacherArea,
    UseAssistant,
}

impl Capability {
    pub fn denial_notice(self) -> &'static str {
        match self {
            Capability::ViewFinance => "Você não possui acesso ao módulo financeiro.",
            Capability::ViewSchools => "Você não possui acesso ao módulo de escolas.",
            Capability::ViewTeacherArea => {
                "Você não possui acesso a esta área ou não há nenhuma sala atribuída a você."
            }
            _ => "Você não possui acesso a este módulo.",
        }
    }
}

/// The capability matrix.
pub fn allows(role: Role, capability: Capability) -> bool {
    use Capability::*;
    match capability {
        ViewDashboard | ViewStudents | ViewSchedules | ViewInventory | UseAssistant => true,
        // Teachers keep these screens, narrowed to their own schools.
        ViewTeachers | ViewStaff => true,
        SwitchSchoolScope | ViewSchools => role == Role::Secretary,
        ViewFinance => matches!(role, Role::Secretary | Role::Director),
        ViewTeacherArea => role == Role::Teacher,
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("{}", .0.denial_notice())]
    Denied(Capability),
}

pub fn require(session: &Session, capability: Capability) -> Result<&User, AccessError> {
    let user = session.user().ok_or(AccessError::Unauthenticated)?;
    if !allows(user.role, capability) {
        tracing::info!(
            user_id = %user.id,
            role = user.role.as_str(),
            capability = ?capability,
            "access denied"
        );
        return Err(AccessError::Denied(capability));
    }
    Ok(user)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchoolScope {
    All,
    Only(BTreeSet<String>),
}

impl SchoolScope {
    pub fn for_session(session: &Session) -> Result<SchoolScope, AccessError> {
        let user = session.user().ok_or(AccessError::Unauthenticated)?;
        Ok(match user.role {
            Role::Secretary => match session.selected_school() {
                Some(s) => SchoolScope::Only(BTreeSet::from([s.id.clone()])),
                None => SchoolScope::All,
            },
            Role::Director | Role::Teacher => {
                SchoolScope::Only(user.school_ids.iter().cloned().collect())
            }
        })
    }

    pub fn admits(&self, school_id: &str) -> bool {
        match self {
            SchoolScope::All => true,
            SchoolScope::Only(ids) => ids.contains(school_id),
        }
    }

    pub fn admits_any<'a, I>(&self, school_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        match self {
            SchoolScope::All => true,
            SchoolScope::Only(ids) => school_ids.into_iter().any(|id| ids.contains(id)),
        }
    }
}

pub fn students<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a Student>, AccessError> {
    let user = require(session, Capability::ViewStudents)?;
    if user.role == Role::Teacher {
        let own = store.classroom_for_teacher(&user.id).map(|c| c.id.as_str());
        return Ok(store
            .students()
            .iter()
            .filter(|s| Some(s.classroom_id.as_str()) == own)
            .collect());
    }
    let scope = SchoolScope::for_session(session)?;
    Ok(store
        .students()
        .iter()
        .filter(|s| scope.admits(&s.school_id))
        .collect())
}

/// Directors and teachers, never the secretary.
pub fn staff<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a User>, AccessError> {
    require(session, Capability::ViewStaff)?;
    let scope = SchoolScope::for_session(session)?;
    Ok(store
        .users()
        .iter()
        .filter(|u| u.role != Role::Secretary)
        .filter(|u| scope.admits_any(&u.school_ids))
        .collect())
}

pub fn teachers<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a User>, AccessError> {
    require(session, Capability::ViewTeachers)?;
    let scope = SchoolScope::for_session(session)?;
    Ok(store
        .users()
        .iter()
        .filter(|u| u.role == Role::Teacher)
        .filter(|u| scope.admits_any(&u.school_ids))
        .collect())
}

pub fn classrooms<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a Classroom>, AccessError> {
    let user = session.user().ok_or(AccessError::Unauthenticated)?;
    if user.role == Role::Teacher {
        return Ok(store
            .classrooms()
            .iter()
            .filter(|c| c.teacher_id == user.id)
            .collect());
    }
    let scope = SchoolScope::for_session(session)?;
    Ok(store
        .classrooms()
        .iter()
        .filter(|c| scope.admits(&c.school_id))
        .collect())
}

pub fn schedules<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a Schedule>, AccessError> {
    let user = require(session, Capability::ViewSchedules)?;
    if user.role == Role::Teacher {
        return Ok(store
            .schedules()
            .iter()
            .filter(|s| s.teacher_id == user.id)
            .collect());
    }
    let rooms: BTreeSet<&str> = classrooms(store, session)?
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    Ok(store
        .schedules()
        .iter()
        .filter(|s| rooms.contains(s.classroom_id.as_str()))
        .collect())
}

pub fn inventory<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a InventoryItem>, AccessError> {
    require(session, Capability::ViewInventory)?;
    let scope = SchoolScope::for_session(session)?;
    Ok(store
        .inventory()
        .iter()
        .filter(|i| scope.admits(&i.school_id))
        .collect())
}

/// Teachers are refused before any record is looked at.
pub fn finance<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a FinancialRecord>, AccessError> {
    require(session, Capability::ViewFinance)?;
    let scope = SchoolScope::for_session(session)?;
    Ok(store
        .finance()
        .iter()
        .filter(|r| scope.admits(&r.school_id))
        .collect())
}

/// The Schools screen lists the whole network regardless of the selected school.
pub fn schools<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a School>, AccessError> {
    require(session, Capability::ViewSchools)?;
    Ok(store.schools().iter().collect())
}

/// Schools the session is scoped to, for headline counts.
pub fn scoped_schools<'a>(store: &'a EntityStore, session: &Session) -> Result<Vec<&'a School>, AccessError> {
    let scope = SchoolScope::for_session(session)?;
    Ok(store
        .schools()
        .iter()
        .filter(|s| scope.admits(&s.id))
        .collect())
}
