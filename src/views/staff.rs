use super::{empty_notice, NamedRef, SelectOption};
use crate::access::{self, AccessError};
use crate::filters::{self, Search};
use crate::model::{Role, User};
use crate::session::Session;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};

pub const EMPTY_NOTICE: &str = "Nenhum funcionário encontrado com os filtros aplicados.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffQuery {
    pub search: Option<String>,
    #[serde(deserialize_with = "filters::blank_as_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub role_label: &'static str,
    pub schools: Vec<NamedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffView {
    pub rows: Vec<StaffRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub roles: Vec<SelectOption>,
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Director => "Diretor",
        Role::Teacher => "Professor",
        Role::Secretary => "Secretário",
    }
}

pub fn staff_view(
    store: &EntityStore,
    session: &Session,
    query: &StaffQuery,
) -> Result<StaffView, AccessError> {
    let search = Search::new(query.search.as_deref());
    let filtered: Vec<&User> = access::staff(store, session)?
        .into_iter()
        .filter(|u| filters::equals(query.role.as_ref(), &u.role))
        .filter(|u| search.matches([u.name.as_str(), u.email.as_str()]))
        .collect();

    let rows: Vec<StaffRow> = filtered
        .into_iter()
        .map(|u| StaffRow {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            role_label: role_label(u.role),
            schools: u
                .school_ids
                .iter()
                .map(|id| NamedRef {
                    id: id.clone(),
                    name: store.school_name(id),
                })
                .collect(),
            profile_picture: u.profile_picture.clone(),
        })
        .collect();

    Ok(StaffView {
        notice: empty_notice(&rows, EMPTY_NOTICE),
        rows,
        roles: [Role::Director, Role::Teacher]
            .into_iter()
            .map(|r| SelectOption {
                value: r.as_str().to_string(),
                label: role_label(r).to_string(),
            })
            .collect(),
    })
}
