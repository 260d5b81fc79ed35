use super::empty_notice;
use crate::access::{self, AccessError};
use crate::filters::Search;
use crate::model::Role;
use crate::session::Session;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};

pub const EMPTY_NOTICE: &str = "Nenhuma escola encontrada com os filtros aplicados.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRow {
    pub id: String,
    pub name: String,
    pub address: String,
    pub director_id: String,
    pub director_name: String,
    pub teachers: usize,
    pub classrooms: usize,
    pub students: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolsView {
    pub rows: Vec<SchoolRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

pub fn schools_view(
    store: &EntityStore,
    session: &Session,
    query: &SchoolQuery,
) -> Result<SchoolsView, AccessError> {
    let search = Search::new(query.search.as_deref());
    let rows: Vec<SchoolRow> = access::schools(store, session)?
        .into_iter()
        .filter(|s| search.matches([s.name.as_str(), s.address.as_str()]))
        .map(|s| SchoolRow {
            id: s.id.clone(),
            name: s.name.clone(),
            address: s.address.clone(),
            director_id: s.director_id.clone(),
            director_name: store.director_name(&s.director_id),
            teachers: store
                .users()
                .iter()
                .filter(|u| u.role == Role::Teacher && u.school_ids.contains(&s.id))
                .count(),
            classrooms: store
                .classrooms()
                .iter()
                .filter(|c| c.school_id == s.id)
                .count(),
            students: store
                .students()
                .iter()
                .filter(|st| st.school_id == s.id)
                .count(),
        })
        .collect();
    Ok(SchoolsView {
        notice: empty_notice(&rows, EMPTY_NOTICE),
        rows,
    })
}
