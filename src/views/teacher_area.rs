use super::students::{latest, LatestAttendance};
use crate::access::{self, AccessError, Capability};
use crate::aggregate::{self, AttendanceSummary};
use crate::model::{Grade, Schedule, Student};
use crate::session::Session;
use crate::store::EntityStore;
use serde::Serialize;

pub const NO_SCHEDULE_NOTICE: &str = "Nenhum horário registrado para esta sala.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomCard {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub school_id: String,
    pub school_name: String,
    pub enrolled: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub grade: Grade,
    pub latest_attendance: Option<LatestAttendance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAreaView {
    pub classroom: ClassroomCard,
    pub schedules: Vec<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules_notice: Option<&'static str>,
    pub attendance: AttendanceSummary,
    pub students: Vec<RosterRow>,
}

/// A teacher without a classroom gets the same notice as any other role.
pub fn teacher_area_view(store: &EntityStore, session: &Session) -> Result<TeacherAreaView, AccessError> {
    let user = access::require(session, Capability::ViewTeacherArea)?;
    let classroom = store
        .classroom_for_teacher(&user.id)
        .ok_or(AccessError::Denied(Capability::ViewTeacherArea))?;

    let roster: Vec<&Student> = store
        .students()
        .iter()
        .filter(|s| s.classroom_id == classroom.id)
        .collect();
    let schedules: Vec<Schedule> = store
        .schedules()
        .iter()
        .filter(|s| s.classroom_id == classroom.id)
        .cloned()
        .collect();

    Ok(TeacherAreaView {
        classroom: ClassroomCard {
            id: classroom.id.clone(),
            name: classroom.name.clone(),
            capacity: classroom.capacity,
            school_id: classroom.school_id.clone(),
            school_name: store.school_name(&classroom.school_id),
            enrolled: roster.len(),
        },
        schedules_notice: schedules.is_empty().then_some(NO_SCHEDULE_NOTICE),
        schedules,
        attendance: aggregate::latest_attendance_summary(roster.iter().copied()),
        students: roster
            .iter()
            .map(|s| RosterRow {
                id: s.id.clone(),
                name: s.name.clone(),
                email: s.email.clone(),
                grade: s.grade,
                latest_attendance: latest(s),
                profile_picture: s.profile_picture.clone(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, User};
    use crate::seed;
    use crate::store::Dataset;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        seed::generate(5, NaiveDate::from_ymd_opt(2025, 3, 31).expect("date"))
    }

    fn signed_in(store: &EntityStore, email: &str) -> Session {
        let mut s = Session::new();
        s.login(store, email, "pw").expect("login");
        s
    }

    #[test]
    fn teacher_gets_own_classroom_roster_and_schedule() {
        let store = EntityStore::load(dataset()).expect("load");
        let session = signed_in(&store, "carlos@estacaotech.com");
        let v = teacher_area_view(&store, &session).expect("view");
        assert_eq!(v.classroom.id, "classroom1");
        assert_eq!(v.classroom.school_name, "Escola Estação Central");
        assert_eq!(v.students.len(), 10);
        assert_eq!(v.schedules.len(), 2);
        assert!(v.schedules_notice.is_none());
        let a = &v.attendance;
        assert_eq!(a.total, 10);
        assert_eq!(a.present + a.late + a.absent, 10);
    }

    #[test]
    fn teacher_without_timetable_gets_schedule_notice() {
        let store = EntityStore::load(dataset()).expect("load");
        let session = signed_in(&store, "paulo@estacaotech.com");
        let v = teacher_area_view(&store, &session).expect("view");
        assert!(v.schedules.is_empty());
        assert_eq!(v.schedules_notice, Some(NO_SCHEDULE_NOTICE));
    }

    #[test]
    fn non_teacher_and_teacher_without_classroom_are_denied() {
        let mut ds = dataset();
        ds.users.push(User {
            id: "user99".to_string(),
            name: "Sem Sala".to_string(),
            email: "semsala@estacaotech.com".to_string(),
            role: Role::Teacher,
            school_ids: vec!["school1".to_string()],
            profile_picture: None,
        });
        let store = EntityStore::load(ds).expect("load");

        let director = signed_in(&store, "maria@estacaotech.com");
        assert_eq!(
            teacher_area_view(&store, &director).err(),
            Some(AccessError::Denied(Capability::ViewTeacherArea))
        );
        let roomless = signed_in(&store, "semsala@estacaotech.com");
        assert_eq!(
            teacher_area_view(&store, &roomless).err(),
            Some(AccessError::Denied(Capability::ViewTeacherArea))
        );
    }
}
