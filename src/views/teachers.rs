use super::{empty_notice, NamedRef};
use crate::access::{self, AccessError};
use crate::filters::Search;
use crate::model::User;
use crate::session::Session;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};

pub const EMPTY_NOTICE: &str = "Nenhum professor encontrado com os filtros aplicados.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub schools: Vec<NamedRef>,
    pub classrooms: Vec<NamedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachersSummary {
    pub total_teachers: usize,
    pub average_classrooms_per_teacher: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachersView {
    pub rows: Vec<TeacherRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub summary: TeachersSummary,
}

pub fn teachers_view(
    store: &EntityStore,
    session: &Session,
    query: &TeacherQuery,
) -> Result<TeachersView, AccessError> {
    let search = Search::new(query.search.as_deref());
    let filtered: Vec<&User> = access::teachers(store, session)?
        .into_iter()
        .filter(|t| search.matches([t.name.as_str(), t.email.as_str()]))
        .collect();
    let classroom_count = access::classrooms(store, session)?.len();

    let rows: Vec<TeacherRow> = filtered
        .iter()
        .map(|t| TeacherRow {
            id: t.id.clone(),
            name: t.name.clone(),
            email: t.email.clone(),
            schools: t
                .school_ids
                .iter()
                .map(|id| NamedRef {
                    id: id.clone(),
                    name: store.school_name(id),
                })
                .collect(),
            classrooms: store
                .classrooms()
                .iter()
                .filter(|c| c.teacher_id == t.id)
                .map(|c| NamedRef {
                    id: c.id.clone(),
                    name: c.name.clone(),
                })
                .collect(),
            profile_picture: t.profile_picture.clone(),
        })
        .collect();

    let summary = TeachersSummary {
        total_teachers: rows.len(),
        average_classrooms_per_teacher: (!rows.is_empty())
            .then(|| classroom_count as f64 / rows.len() as f64),
    };
    Ok(TeachersView {
        notice: empty_notice(&rows, EMPTY_NOTICE),
        rows,
        summary,
    })
}
