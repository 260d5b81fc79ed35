use super::{empty_notice, NamedRef};
use crate::access::{self, AccessError};
use crate::aggregate::{self, RosterSummary};
use crate::filters::{self, Search};
use crate::model::{AttendanceStatus, Grade, Student};
use crate::session::Session;
use crate::store::EntityStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const EMPTY_NOTICE: &str = "Nenhum aluno encontrado com os filtros aplicados.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentQuery {
    pub search: Option<String>,
    pub classroom_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestAttendance {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub school_id: String,
    pub classroom_id: String,
    pub classroom_name: String,
    pub grade: Grade,
    pub attendance_percent: f64,
    pub latest_attendance: Option<LatestAttendance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentsView {
    pub rows: Vec<StudentRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub summary: RosterSummary,
    /// Options for the classroom filter, already narrowed to the caller's scope.
    pub classrooms: Vec<NamedRef>,
}

pub fn latest(student: &Student) -> Option<LatestAttendance> {
    student.latest_attendance().map(|a| LatestAttendance {
        date: a.date,
        status: a.status,
    })
}

pub fn students_view(
    store: &EntityStore,
    session: &Session,
    query: &StudentQuery,
) -> Result<StudentsView, AccessError> {
    let scoped = access::students(store, session)?;
    let available = access::classrooms(store, session)?;

    let classroom = filters::non_blank(query.classroom_id.as_deref());
    let search = Search::new(query.search.as_deref());
    let filtered: Vec<&Student> = scoped
        .into_iter()
        .filter(|s| filters::equals(classroom, s.classroom_id.as_str()))
        .filter(|s| search.matches([s.name.as_str(), s.email.as_str()]))
        .collect();

    let summary = aggregate::roster_summary(&filtered, available.len());
    let rows: Vec<StudentRow> = filtered
        .iter()
        .map(|s| StudentRow {
            id: s.id.clone(),
            name: s.name.clone(),
            email: s.email.clone(),
            school_id: s.school_id.clone(),
            classroom_id: s.classroom_id.clone(),
            classroom_name: store.classroom_name(&s.classroom_id),
            grade: s.grade,
            attendance_percent: aggregate::attendance_percent(s),
            latest_attendance: latest(s),
            profile_picture: s.profile_picture.clone(),
        })
        .collect();

    Ok(StudentsView {
        notice: empty_notice(&rows, EMPTY_NOTICE),
        rows,
        summary,
        classrooms: available
            .into_iter()
            .map(|c| NamedRef {
                id: c.id.clone(),
                name: c.name.clone(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn store() -> EntityStore {
        EntityStore::load(seed::generate(5, NaiveDate::from_ymd_opt(2025, 3, 31).expect("date")))
            .expect("load")
    }

    fn signed_in(store: &EntityStore, email: &str) -> Session {
        let mut s = Session::new();
        s.login(store, email, "pw").expect("login");
        s
    }

    #[test]
    fn teacher_classroom_filter_cannot_widen_scope() {
        let store = store();
        let session = signed_in(&store, "carlos@estacaotech.com");
        let q = StudentQuery {
            classroom_id: Some("classroom4".to_string()),
            ..Default::default()
        };
        let v = students_view(&store, &session, &q).expect("view");
        assert!(v.rows.is_empty());
        assert_eq!(v.notice, Some(EMPTY_NOTICE));
        assert_eq!(v.classrooms.len(), 1);
        assert_eq!(v.summary.grade_average, None);
    }

    #[test]
    fn director_search_stays_in_school() {
        let store = store();
        let session = signed_in(&store, "ana@estacaotech.com");
        let q = StudentQuery {
            search: Some("A".to_string()),
            ..Default::default()
        };
        let v = students_view(&store, &session, &q).expect("view");
        assert!(v.rows.iter().all(|r| r.school_id == "school3"));
        assert_eq!(v.classrooms.len(), 3);
    }

    #[test]
    fn same_query_twice_same_rows() {
        let store = store();
        let session = signed_in(&store, "secretario@estacaotech.com");
        let q = StudentQuery {
            search: Some("silva".to_string()),
            classroom_id: Some("classroom2".to_string()),
        };
        let a = students_view(&store, &session, &q).expect("a");
        let b = students_view(&store, &session, &q).expect("b");
        assert_eq!(a, b);
        assert!(a
            .rows
            .iter()
            .all(|r| r.classroom_id == "classroom2"
                && (r.name.to_lowercase().contains("silva")
                    || r.email.contains("silva"))));
    }

    #[test]
    fn summary_counts_filtered_roster() {
        let store = store();
        let session = signed_in(&store, "maria@estacaotech.com");
        let v = students_view(&store, &session, &StudentQuery::default()).expect("view");
        assert_eq!(v.summary.total_students, 30);
        assert_eq!(v.summary.active_classrooms, 3);
        let avg = v.summary.grade_average.expect("avg");
        assert!((1.0..=4.0).contains(&avg));
        assert!(v.notice.is_none());
    }
}
