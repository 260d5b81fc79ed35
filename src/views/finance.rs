use super::{empty_notice, NamedRef};
use crate::access::{self, AccessError};
use crate::aggregate::{self, CategoryTotal, FinanceSummary, TimelinePoint};
use crate::filters;
use crate::model::{FinancialRecord, RecordKind, Role};
use crate::session::Session;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};

pub const EMPTY_NOTICE: &str = "Nenhum registro financeiro encontrado com os filtros aplicados.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinanceQuery {
    pub school_id: Option<String>,
    #[serde(rename = "type", deserialize_with = "filters::blank_as_none")]
    pub kind: Option<RecordKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRow {
    #[serde(flatten)]
    pub record: FinancialRecord,
    pub school_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceView {
    /// Newest first.
    pub rows: Vec<FinanceRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub summary: FinanceSummary,
    pub category_totals: Vec<CategoryTotal>,
    pub timeline: Vec<TimelinePoint>,
    /// Only populated for the secretary.
    pub schools: Vec<NamedRef>,
}

pub fn finance_view(
    store: &EntityStore,
    session: &Session,
    query: &FinanceQuery,
) -> Result<FinanceView, AccessError> {
    let scoped = access::finance(store, session)?;

    let school = filters::non_blank(query.school_id.as_deref());
    let mut filtered: Vec<&FinancialRecord> = scoped
        .into_iter()
        .filter(|r| filters::equals(school, r.school_id.as_str()))
        .filter(|r| filters::equals(query.kind.as_ref(), &r.kind))
        .collect();
    // stable: same-day records keep catalogue order
    filtered.sort_by(|a, b| b.date.cmp(&a.date));

    let summary = aggregate::finance_summary(filtered.iter().copied());
    let category_totals = aggregate::category_totals(filtered.iter().copied());
    let timeline = aggregate::monthly_timeline(filtered.iter().copied());
    let rows: Vec<FinanceRow> = filtered
        .into_iter()
        .map(|r| FinanceRow {
            record: r.clone(),
            school_name: store.school_name(&r.school_id),
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

    Ok(FinanceView {
        notice: empty_notice(&rows, EMPTY_NOTICE),
        rows,
        summary,
        category_totals,
        timeline,
        schools,
    })
}
