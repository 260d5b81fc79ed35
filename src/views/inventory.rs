use super::{empty_notice, NamedRef};
use crate::access::{self, AccessError};
use crate::aggregate::{self, StockStatus, StockSummary};
use crate::filters::{self, Search};
use crate::model::{InventoryItem, Role};
use crate::session::Session;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};

pub const EMPTY_NOTICE: &str = "Nenhum item encontrado com os filtros aplicados.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Narrows further inside the role scope; it never widens it.
    pub school_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub school_name: String,
    pub status: StockStatus,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub rows: Vec<InventoryRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub summary: StockSummary,
    pub categories: Vec<String>,
    /// Only populated for the secretary.
    pub schools: Vec<NamedRef>,
}

/// Distinct categories across the whole catalogue, first-seen order.
fn categories(store: &EntityStore) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in store.inventory() {
        if !out.contains(&item.category) {
            out.push(item.category.clone());
        }
    }
    out
}

pub fn inventory_view(
    store: &EntityStore,
    session: &Session,
    query: &InventoryQuery,
) -> Result<InventoryView, AccessError> {
    let scoped = access::inventory(store, session)?;

    let category = filters::non_blank(query.category.as_deref());
    let school = filters::non_blank(query.school_id.as_deref());
    let search = Search::new(query.search.as_deref());
    let filtered: Vec<&InventoryItem> = scoped
        .into_iter()
        .filter(|i| filters::equals(category, i.category.as_str()))
        .filter(|i| filters::equals(school, i.school_id.as_str()))
        .filter(|i| search.matches([i.name.as_str(), i.category.as_str()]))
        .collect();

    let summary = aggregate::stock_summary(filtered.iter().copied());
    let rows: Vec<InventoryRow> = filtered
        .into_iter()
        .map(|i| InventoryRow {
            item: i.clone(),
            school_name: store.school_name(&i.school_id),
            status: aggregate::stock_status(i.quantity, i.min_quantity),
            total_value: i.price * f64::from(i.quantity),
        })
        .collect();

    let schools = if session.role() == Some(Role::Secretary) {
        store
            .schools()
            .iter()
            .map(|s| NamedRef {
                id: s.id.clone(),
                name: s.name.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(InventoryView {
        notice: empty_notice(&rows, EMPTY_NOTICE),
        rows,
        summary,
        categories: categories(store),
        schools,
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

    fn signed_in(store: &EntityStore, email: &str) -> Session {
        let mut s = Session::new();
        s.login(store, email, "pw").expect("login");
        s
    }

    #[test]
    fn teacher_sees_own_school_stock() {
        let store = store();
        let session = signed_in(&store, "lucas@estacaotech.com");
        let v = inventory_view(&store, &session, &InventoryQuery::default()).expect("view");
        assert_eq!(v.rows.len(), 6);
        assert!(v.rows.iter().all(|r| r.item.school_id == "school3"));
        assert!(v.schools.is_empty());
        assert_eq!(v.categories, vec!["Materiais", "Didáticos", "Equipamentos"]);
    }

    #[test]
    fn director_school_filter_cannot_reach_other_schools() {
        let store = store();
        let session = signed_in(&store, "maria@estacaotech.com");
        let q = InventoryQuery {
            school_id: Some("school2".to_string()),
            ..Default::default()
        };
        let v = inventory_view(&store, &session, &q).expect("view");
        assert!(v.rows.is_empty());
        assert_eq!(v.notice, Some(EMPTY_NOTICE));
        assert_eq!(v.summary.total, 0);
    }

    #[test]
    fn category_then_search_with_totals() {
        let store = store();
        let session = signed_in(&store, "secretario@estacaotech.com");
        let q = InventoryQuery {
            search: Some("livros".to_string()),
            category: Some("Didáticos".to_string()),
            school_id: None,
        };
        let v = inventory_view(&store, &session, &q).expect("view");
        assert_eq!(v.rows.len(), 4);
        assert_eq!(v.schools.len(), 3);
        let port = v.rows.iter().find(|r| r.item.id == "item3").expect("item3");
        assert_eq!(port.total_value, 80.0 * 45.0);
        assert_eq!(port.status, StockStatus::Normal);
        assert_eq!(v.summary.total, 4);
        assert_eq!(v.summary.normal, 4);
    }
}
