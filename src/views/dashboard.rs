use crate::access::{self, AccessError, Capability};
use crate::model::{AttendanceStatus, Role};
use crate::session::Session;
use crate::store::EntityStore;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_teachers: usize,
    pub total_classrooms: usize,
    pub total_schools: usize,
    /// Students whose latest attendance record is `present`.
    pub active_students: usize,
    /// Placeholder figure shown on the course card: 80% of the roster, floored.
    pub completed_courses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub user_name: String,
    pub role: Role,
    /// Selected school name, or `None` for the network-wide view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub stats: DashboardStats,
}

pub fn dashboard_view(store: &EntityStore, session: &Session) -> Result<DashboardView, AccessError> {
    let user = access::require(session, Capability::ViewDashboard)?;

    let students = access::students(store, session)?;
    let total_teachers = match user.role {
        Role::Teacher => 1,
        Role::Director | Role::Secretary => access::teachers(store, session)?.len(),
    };
    let active_students = students
        .iter()
        .filter(|s| s.latest_attendance().map(|a| a.status) == Some(AttendanceStatus::Present))
        .count();

    Ok(DashboardView {
        user_name: user.name.clone(),
        role: user.role,
        scope: session.selected_school().map(|s| s.name.clone()),
        stats: DashboardStats {
            total_students: students.len(),
            total_teachers,
            total_classrooms: access::classrooms(store, session)?.len(),
            total_schools: access::scoped_schools(store, session)?.len(),
            active_students,
            completed_courses: students.len() * 4 / 5,
        },
    })
}
