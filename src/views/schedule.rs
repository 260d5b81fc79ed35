use super::empty_notice;
use crate::access::{self, AccessError};
use crate::filters::{self, Search};
use crate::model::{DayOfWeek, Schedule};
use crate::session::Session;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};

pub const EMPTY_NOTICE: &str = "Nenhum agendamento encontrado com os filtros aplicados.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleQuery {
    pub search: Option<String>,
    #[serde(deserialize_with = "filters::blank_as_none")]
    pub day_of_week: Option<DayOfWeek>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub teacher_name: String,
    pub classroom_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub day: DayOfWeek,
    pub rows: Vec<ScheduleRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub rows: Vec<ScheduleRow>,
    /// Same rows grouped Monday to Friday; days without lessons are omitted.
    pub by_day: Vec<DayGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub days: Vec<DayOfWeek>,
}

fn matches_search(store: &EntityStore, search: &Search, s: &Schedule) -> bool {
    if search.is_empty() {
        return true;
    }
    let classroom = store.classroom(&s.classroom_id).map(|c| c.name.as_str());
    let teacher = store.user(&s.teacher_id).map(|u| u.name.as_str());
    search.matches(std::iter::once(s.subject.as_str()).chain(classroom).chain(teacher))
}

pub fn schedule_view(
    store: &EntityStore,
    session: &Session,
    query: &ScheduleQuery,
) -> Result<ScheduleView, AccessError> {
    let search = Search::new(query.search.as_deref());
    let rows: Vec<ScheduleRow> = access::schedules(store, session)?
        .into_iter()
        .filter(|s| filters::equals(query.day_of_week.as_ref(), &s.day_of_week))
        .filter(|s| matches_search(store, &search, s))
        .map(|s| ScheduleRow {
            schedule: s.clone(),
            teacher_name: store.teacher_name(&s.teacher_id),
            classroom_name: store.classroom_name(&s.classroom_id),
        })
        .collect();

    let by_day = DayOfWeek::ALL
        .into_iter()
        .map(|day| DayGroup {
            day,
            rows: rows
                .iter()
                .filter(|r| r.schedule.day_of_week == day)
                .cloned()
                .collect(),
        })
        .filter(|g| !g.rows.is_empty())
        .collect();

    Ok(ScheduleView {
        notice: empty_notice(&rows, EMPTY_NOTICE),
        rows,
        by_day,
        days: DayOfWeek::ALL.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::NaiveDate;

    fn store() -> EntityStore {
        EntityStore::load(seed::generate(5, NaiveDate::from_ymd_opt(2025, 3, 31).expect("date")))
            .expect("load")
    }

    fn secretary(store: &EntityStore) -> Session {
        let mut session = Session::new();
        session
            .login(store, "secretario@estacaotech.com", "pw")
            .expect("login");
        session
    }

    #[test]
    fn groups_follow_weekday_order() {
        let store = store();
        let v = schedule_view(&store, &secretary(&store), &ScheduleQuery::default()).expect("view");
        assert_eq!(v.rows.len(), 6);
        let days: Vec<DayOfWeek> = v.by_day.iter().map(|g| g.day).collect();
        assert_eq!(
            days,
            vec![
                DayOfWeek::Monday,
                DayOfWeek::Tuesday,
                DayOfWeek::Wednesday,
                DayOfWeek::Thursday,
                DayOfWeek::Friday
            ]
        );
        assert_eq!(v.by_day[0].rows.len(), 2);
    }

    #[test]
    fn search_matches_teacher_and_classroom_names() {
        let store = store();
        let session = secretary(&store);
        let by_teacher = ScheduleQuery {
            search: Some("patrícia".to_string()),
            ..Default::default()
        };
        let v = schedule_view(&store, &session, &by_teacher).expect("view");
        assert!(v.rows.iter().all(|r| r.schedule.teacher_id == "user6"));
        assert_eq!(v.rows.len(), 2);

        let by_room = ScheduleQuery {
            search: Some("sala 103".to_string()),
            day_of_week: Some(DayOfWeek::Friday),
        };
        let v = schedule_view(&store, &session, &by_room).expect("view");
        assert_eq!(v.rows.len(), 1);
        assert_eq!(v.rows[0].schedule.id, "schedule6");
        assert_eq!(v.rows[0].classroom_name, "Sala 103");
    }

    #[test]
    fn director_without_timetable_gets_notice() {
        let store = store();
        let mut session = Session::new();
        session.login(&store, "joao@estacaotech.com", "pw").expect("login");
        let v = schedule_view(&store, &session, &ScheduleQuery::default()).expect("view");
        assert!(v.rows.is_empty());
        assert!(v.by_day.is_empty());
        assert_eq!(v.notice, Some(EMPTY_NOTICE));
    }
}
